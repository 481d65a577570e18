//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`DriveFile`], [`EntryKind`] - remote drive entries
//! - [`RootConfig`] - the persisted root-folder selection

mod drive;
mod settings;

pub use drive::{DriveFile, EntryKind, FOLDER_MIME_TYPE};
pub use settings::RootConfig;
