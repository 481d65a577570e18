//! Drive access seam.
//!
//! Everything that talks to the storage backend goes through the [`Drive`]
//! trait, so state logic can be exercised against an in-memory fake. The
//! production implementation lives in [`crate::core::api`].

use crate::config::{DRIVE_ROOT_ALIAS, WORKSPACE_FOLDER_NAME};
use crate::core::error::ApiError;
use crate::models::DriveFile;

/// Remote file operations the editor needs. One method per backend call;
/// every method resolves fully before any local state is touched.
pub trait Drive {
    /// Direct children of a folder, unfiltered and unordered.
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>, ApiError>;

    /// A file's metadata together with its full text content.
    async fn read_content(&self, file_id: &str) -> Result<(DriveFile, String), ApiError>;

    /// Overwrite a file's content. Last write wins.
    async fn write_content(&self, file_id: &str, content: &str) -> Result<DriveFile, ApiError>;

    /// Create a file under a parent, pre-populated with `content`.
    async fn create_file(
        &self,
        name: &str,
        parent_id: &str,
        content: &str,
    ) -> Result<DriveFile, ApiError>;

    /// Create an empty folder under a parent.
    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<DriveFile, ApiError>;

    /// Rename a file or folder. The id is stable across renames.
    async fn rename(&self, file_id: &str, name: &str) -> Result<DriveFile, ApiError>;

    /// Delete a file or folder (recursively, for folders).
    async fn delete(&self, file_id: &str) -> Result<(), ApiError>;

    /// Folders at the top level of the drive, for root selection.
    async fn list_root_folders(&self) -> Result<Vec<DriveFile>, ApiError>;
}

/// Find the well-known workspace folder at the drive's top level, creating it
/// if absent. Idempotent: running it again returns the existing folder
/// untouched, never a duplicate.
pub async fn find_or_create_workspace_folder<D: Drive>(drive: &D) -> Result<DriveFile, ApiError> {
    let folders = drive.list_root_folders().await?;
    if let Some(existing) = folders.into_iter().find(|f| f.name == WORKSPACE_FOLDER_NAME) {
        return Ok(existing);
    }
    drive
        .create_folder(WORKSPACE_FOLDER_NAME, DRIVE_ROOT_ALIAS)
        .await
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::models::FOLDER_MIME_TYPE;

    #[derive(Clone, Debug)]
    struct Entry {
        file: DriveFile,
        parent_id: String,
        content: String,
    }

    /// In-memory drive for state-machine tests. Individual calls can be
    /// forced to fail to exercise error paths.
    #[derive(Default)]
    pub struct FakeDrive {
        entries: RefCell<HashMap<String, Entry>>,
        next_id: RefCell<u64>,
        pub fail_next: RefCell<Option<ApiError>>,
    }

    impl FakeDrive {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_next_call(&self, error: ApiError) {
            *self.fail_next.borrow_mut() = Some(error);
        }

        fn take_failure(&self) -> Result<(), ApiError> {
            match self.fail_next.borrow_mut().take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        fn mint_id(&self) -> String {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            format!("id-{next}")
        }

        pub fn insert_file(&self, parent_id: &str, name: &str, content: &str) -> String {
            let id = self.mint_id();
            self.entries.borrow_mut().insert(
                id.clone(),
                Entry {
                    file: DriveFile {
                        id: id.clone(),
                        name: name.to_string(),
                        mime_type: "text/markdown".to_string(),
                        modified_time: None,
                        size: None,
                    },
                    parent_id: parent_id.to_string(),
                    content: content.to_string(),
                },
            );
            id
        }

        pub fn insert_folder(&self, parent_id: &str, name: &str) -> String {
            let id = self.mint_id();
            self.entries.borrow_mut().insert(
                id.clone(),
                Entry {
                    file: DriveFile {
                        id: id.clone(),
                        name: name.to_string(),
                        mime_type: FOLDER_MIME_TYPE.to_string(),
                        modified_time: None,
                        size: None,
                    },
                    parent_id: parent_id.to_string(),
                    content: String::new(),
                },
            );
            id
        }

        pub fn contains(&self, file_id: &str) -> bool {
            self.entries.borrow().contains_key(file_id)
        }

        pub fn content_of(&self, file_id: &str) -> Option<String> {
            self.entries.borrow().get(file_id).map(|e| e.content.clone())
        }
    }

    impl Drive for FakeDrive {
        async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>, ApiError> {
            self.take_failure()?;
            Ok(self
                .entries
                .borrow()
                .values()
                .filter(|e| e.parent_id == folder_id)
                .map(|e| e.file.clone())
                .collect())
        }

        async fn read_content(&self, file_id: &str) -> Result<(DriveFile, String), ApiError> {
            self.take_failure()?;
            let entries = self.entries.borrow();
            let entry = entries.get(file_id).ok_or(ApiError::NotFound)?;
            Ok((entry.file.clone(), entry.content.clone()))
        }

        async fn write_content(
            &self,
            file_id: &str,
            content: &str,
        ) -> Result<DriveFile, ApiError> {
            self.take_failure()?;
            let mut entries = self.entries.borrow_mut();
            let entry = entries.get_mut(file_id).ok_or(ApiError::NotFound)?;
            entry.content = content.to_string();
            Ok(entry.file.clone())
        }

        async fn create_file(
            &self,
            name: &str,
            parent_id: &str,
            content: &str,
        ) -> Result<DriveFile, ApiError> {
            self.take_failure()?;
            let id = self.insert_file(parent_id, name, content);
            Ok(self.entries.borrow()[&id].file.clone())
        }

        async fn create_folder(
            &self,
            name: &str,
            parent_id: &str,
        ) -> Result<DriveFile, ApiError> {
            self.take_failure()?;
            let id = self.insert_folder(parent_id, name);
            Ok(self.entries.borrow()[&id].file.clone())
        }

        async fn rename(&self, file_id: &str, name: &str) -> Result<DriveFile, ApiError> {
            self.take_failure()?;
            let mut entries = self.entries.borrow_mut();
            let entry = entries.get_mut(file_id).ok_or(ApiError::NotFound)?;
            entry.file.name = name.to_string();
            Ok(entry.file.clone())
        }

        async fn delete(&self, file_id: &str) -> Result<(), ApiError> {
            self.take_failure()?;
            let mut entries = self.entries.borrow_mut();
            if entries.remove(file_id).is_none() {
                return Err(ApiError::NotFound);
            }
            let orphans: Vec<String> = entries
                .values()
                .filter(|e| e.parent_id == file_id)
                .map(|e| e.file.id.clone())
                .collect();
            for id in orphans {
                entries.remove(&id);
            }
            Ok(())
        }

        async fn list_root_folders(&self) -> Result<Vec<DriveFile>, ApiError> {
            self.take_failure()?;
            Ok(self
                .entries
                .borrow()
                .values()
                .filter(|e| e.parent_id == DRIVE_ROOT_ALIAS && e.file.is_folder())
                .map(|e| e.file.clone())
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeDrive;
    use super::*;

    #[tokio::test]
    async fn test_workspace_folder_created_once() {
        let drive = FakeDrive::new();

        let created = find_or_create_workspace_folder(&drive).await.unwrap();
        assert_eq!(created.name, WORKSPACE_FOLDER_NAME);

        // Running onboarding again must return the same folder, not a twin.
        let again = find_or_create_workspace_folder(&drive).await.unwrap();
        assert_eq!(again.id, created.id);

        let roots = drive.list_root_folders().await.unwrap();
        assert_eq!(roots.len(), 1);
    }

    #[tokio::test]
    async fn test_workspace_folder_reuses_existing() {
        let drive = FakeDrive::new();
        let existing_id = drive.insert_folder(DRIVE_ROOT_ALIAS, WORKSPACE_FOLDER_NAME);

        let found = find_or_create_workspace_folder(&drive).await.unwrap();
        assert_eq!(found.id, existing_id);
    }

    #[tokio::test]
    async fn test_workspace_listing_failure_propagates() {
        let drive = FakeDrive::new();
        drive.fail_next_call(ApiError::Unauthenticated);
        assert_eq!(
            find_or_create_workspace_folder(&drive).await.unwrap_err(),
            ApiError::Unauthenticated
        );
        // Nothing was created.
        assert!(drive.list_root_folders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_overwrites_content() {
        let drive = FakeDrive::new();
        let id = drive.insert_file("p", "a.md", "v1");
        drive.write_content(&id, "v2").await.unwrap();
        assert_eq!(drive.content_of(&id).as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_delete_removes_descendants() {
        let drive = FakeDrive::new();
        let folder = drive.insert_folder("p", "drafts");
        let child = drive.insert_file(&folder, "a.md", "x");

        drive.delete(&folder).await.unwrap();
        assert!(!drive.contains(&folder));
        assert!(!drive.contains(&child));
    }
}
