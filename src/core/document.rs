//! Document naming rules and the new-file front-matter template.

use crate::config::{
    DEFAULT_DOCUMENT_EXTENSION, DOCUMENT_EXTENSIONS, FRONT_MATTER_AUTHOR, FRONT_MATTER_CATEGORY,
};
use crate::core::error::ApiError;

/// Normalize a new file name to carry a recognized document extension,
/// appending the default one when absent. Empty names are rejected before any
/// remote call.
pub fn normalize_document_name(raw: &str) -> Result<String, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::validation("File name must not be empty."));
    }
    if DOCUMENT_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}{DEFAULT_DOCUMENT_EXTENSION}"))
    }
}

/// Validate a new folder name.
pub fn validate_folder_name(raw: &str) -> Result<String, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Folder name must not be empty."));
    }
    Ok(name.to_string())
}

/// Validate a rename target against the current name. Empty and unchanged
/// names are rejected locally, without a remote call.
pub fn validate_rename(current: &str, raw: &str) -> Result<String, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::validation("File name must not be empty."));
    }
    if name == current {
        return Err(ApiError::validation("The name is unchanged."));
    }
    Ok(name.to_string())
}

/// Display title for a document: its name with the extension stripped.
pub fn title_from_name(name: &str) -> &str {
    for ext in DOCUMENT_EXTENSIONS {
        if let Some(stem) = name.strip_suffix(ext) {
            return stem;
        }
    }
    name
}

/// Front-matter template new files are pre-populated with. `date` is the
/// creation date as `YYYY-MM-DD`.
pub fn default_front_matter(file_name: &str, date: &str) -> String {
    let title = title_from_name(file_name);
    format!(
        "---\n\
         path: \"\"\n\
         author: \"{FRONT_MATTER_AUTHOR}\"\n\
         date: \"{date}\"\n\
         update: \"{date}\"\n\
         title: \"{title}\"\n\
         description: \"\"\n\
         tags: []\n\
         category: \"{FRONT_MATTER_CATEGORY}\"\n\
         series: \"\"\n\
         ---\n\n"
    )
}
