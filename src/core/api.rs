//! HTTP implementation of the drive port.
//!
//! Talks to the same-origin proxy that holds the OAuth session and forwards
//! to the storage backend. Failure statuses map onto [`ApiError`] classes at
//! the call site; network-level failures fold into [`ApiError::Unknown`].

use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::config::DRIVE_ROOT_ALIAS;
use crate::core::drive::Drive;
use crate::core::error::ApiError;
use crate::models::DriveFile;

/// Drive access through the `/api` proxy endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpDrive;

#[derive(Deserialize)]
struct FilesResponse {
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct FileResponse {
    file: DriveFile,
}

#[derive(Deserialize)]
struct FolderResponse {
    folder: DriveFile,
}

#[derive(Deserialize)]
struct ReadResponse {
    file: DriveFile,
    content: String,
}

#[derive(Serialize)]
struct SaveBody<'a> {
    #[serde(rename = "fileId")]
    file_id: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CreateFileBody<'a> {
    name: &'a str,
    #[serde(rename = "parentId")]
    parent_id: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CreateFolderBody<'a> {
    name: &'a str,
    #[serde(rename = "parentId")]
    parent_id: &'a str,
}

#[derive(Serialize)]
struct RenameBody<'a> {
    #[serde(rename = "fileId")]
    file_id: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct DeleteBody<'a> {
    #[serde(rename = "fileId")]
    file_id: &'a str,
}

/// Decode a response body, turning failure statuses into error classes first.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::from_status(response.status()));
    }
    response.json::<T>().await.map_err(|_| ApiError::Unknown)
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|_| ApiError::Unknown)?;
    decode(response).await
}

async fn post_json<T: DeserializeOwned, B: Serialize>(url: &str, body: &B) -> Result<T, ApiError> {
    let response = Request::post(url)
        .json(body)
        .map_err(|_| ApiError::Unknown)?
        .send()
        .await
        .map_err(|_| ApiError::Unknown)?;
    decode(response).await
}

impl Drive for HttpDrive {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>, ApiError> {
        let url = format!(
            "/api/files?folderId={}",
            js_sys::encode_uri_component(folder_id)
        );
        get_json::<FilesResponse>(&url).await.map(|r| r.files)
    }

    async fn read_content(&self, file_id: &str) -> Result<(DriveFile, String), ApiError> {
        let url = format!(
            "/api/read?fileId={}",
            js_sys::encode_uri_component(file_id)
        );
        get_json::<ReadResponse>(&url)
            .await
            .map(|r| (r.file, r.content))
    }

    async fn write_content(&self, file_id: &str, content: &str) -> Result<DriveFile, ApiError> {
        post_json::<FileResponse, _>("/api/save", &SaveBody { file_id, content })
            .await
            .map(|r| r.file)
    }

    async fn create_file(
        &self,
        name: &str,
        parent_id: &str,
        content: &str,
    ) -> Result<DriveFile, ApiError> {
        post_json::<FileResponse, _>(
            "/api/create-file",
            &CreateFileBody {
                name,
                parent_id,
                content,
            },
        )
        .await
        .map(|r| r.file)
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<DriveFile, ApiError> {
        post_json::<FolderResponse, _>("/api/create-folder", &CreateFolderBody { name, parent_id })
            .await
            .map(|r| r.folder)
    }

    async fn rename(&self, file_id: &str, name: &str) -> Result<DriveFile, ApiError> {
        post_json::<FileResponse, _>("/api/rename", &RenameBody { file_id, name })
            .await
            .map(|r| r.file)
    }

    async fn delete(&self, file_id: &str) -> Result<(), ApiError> {
        let response = Request::post("/api/delete")
            .json(&DeleteBody { file_id })
            .map_err(|_| ApiError::Unknown)?
            .send()
            .await
            .map_err(|_| ApiError::Unknown)?;
        if !response.ok() {
            return Err(ApiError::from_status(response.status()));
        }
        Ok(())
    }

    // The proxy exposes no dedicated top-level listing; the drive accepts
    // "root" as a folder id, so this is an ordinary children listing filtered
    // to folders.
    async fn list_root_folders(&self) -> Result<Vec<DriveFile>, ApiError> {
        let files = self.list_children(DRIVE_ROOT_ALIAS).await?;
        Ok(files.into_iter().filter(DriveFile::is_folder).collect())
    }
}
