//! Remote drive entry types.

use serde::{Deserialize, Serialize};

use crate::config::DOCUMENT_EXTENSIONS;

/// MIME marker the remote store uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Kind of a remote entry, derived from its MIME marker.
///
/// The kind never changes after creation; a folder cannot become a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// One remote node (file or folder) as returned by the proxy endpoints.
///
/// `id` is an opaque identifier, stable for the lifetime of the entry and
/// unique within the remote store. `name` is a display string and is not
/// guaranteed unique among siblings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// RFC 3339 timestamp, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    /// Byte count as a decimal string (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl DriveFile {
    pub fn kind(&self) -> EntryKind {
        if self.mime_type == FOLDER_MIME_TYPE {
            EntryKind::Folder
        } else {
            EntryKind::File
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == EntryKind::Folder
    }

    /// Whether this entry is visible in the tree: folders always are, files
    /// only when they carry a recognized document extension.
    pub fn is_visible(&self) -> bool {
        self.is_folder()
            || DOCUMENT_EXTENSIONS
                .iter()
                .any(|ext| self.name.ends_with(ext))
    }
}
