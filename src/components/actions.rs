//! Async glue between the drive and the reactive state.
//!
//! The sequencing itself lives in [`crate::core::mutation`]; these wrappers
//! bind it to the production drive, translate outcomes into notices, and
//! handle the view-side bookkeeping the flows don't know about (confirm
//! dialogs, the expanded set, the preview pipeline).

use leptos::prelude::*;

use crate::app::AppContext;
use crate::config::WORKSPACE_FOLDER_NAME;
use crate::core::document::{
    default_front_matter, normalize_document_name, validate_folder_name, validate_rename,
};
use crate::core::{
    ApiError, HttpDrive, PreviewPipeline, find_or_create_workspace_folder, mutation,
};
use crate::models::DriveFile;
use crate::utils::dom;

/// Surface a failure as a notice before handing it back to the caller.
fn reject(ctx: AppContext, err: ApiError) -> ApiError {
    ctx.notify.error(&err);
    err
}

/// Fetch a folder's children if the cache has nothing fresh for it.
pub async fn ensure_children(ctx: AppContext, parent_id: String) {
    if let Err(err) = mutation::fetch_children(&HttpDrive, &ctx.listings, &parent_id).await {
        leptos::logging::warn!("listing fetch failed for {parent_id}: {err}");
    }
}

/// Open a document as the active session. A stale read (the user clicked
/// another file meanwhile) is discarded inside the session.
pub async fn open_document(ctx: AppContext, file: DriveFile, parent_id: String) {
    if let Err(err) = mutation::open_document(&HttpDrive, &ctx.session, &file.id, &parent_id).await
    {
        ctx.notify.error(&err);
    }
}

/// Save the open document. A save while one is already in flight is
/// suppressed, not queued. On failure the document stays dirty.
pub async fn save_document(ctx: AppContext) {
    match mutation::save_document(&HttpDrive, &ctx.session).await {
        Ok(true) => ctx.notify.info("Saved."),
        Ok(false) => {}
        Err(err) => ctx.notify.error(&err),
    }
}

/// Create a document pre-populated with the front-matter template. Returns
/// `Err` so the caller can keep its input open for correction.
pub async fn create_document(
    ctx: AppContext,
    parent_id: String,
    raw_name: String,
) -> Result<(), ApiError> {
    let name = normalize_document_name(&raw_name).map_err(|e| reject(ctx, e))?;
    let content = default_front_matter(&name, &dom::today_iso());

    match mutation::create_file(&HttpDrive, &ctx.listings, &parent_id, &name, &content).await {
        Ok(created) => {
            ctx.notify.info(format!("Created \"{}\".", created.name));
            Ok(())
        }
        Err(err) => Err(reject(ctx, err)),
    }
}

/// Create a folder under a parent.
pub async fn create_folder(
    ctx: AppContext,
    parent_id: String,
    raw_name: String,
) -> Result<(), ApiError> {
    let name = validate_folder_name(&raw_name).map_err(|e| reject(ctx, e))?;

    match mutation::create_folder(&HttpDrive, &ctx.listings, &parent_id, &name).await {
        Ok(created) => {
            ctx.notify.info(format!("Created \"{}\".", created.name));
            Ok(())
        }
        Err(err) => Err(reject(ctx, err)),
    }
}

/// Rename an entry from its tree row.
pub async fn rename_entry(
    ctx: AppContext,
    file: DriveFile,
    parent_id: String,
    raw_name: String,
) -> Result<(), ApiError> {
    let name = validate_rename(&file.name, &raw_name).map_err(|e| reject(ctx, e))?;

    mutation::rename_entry(&HttpDrive, &ctx.listings, &ctx.session, &file.id, &parent_id, &name)
        .await
        .map(|_| ())
        .map_err(|err| reject(ctx, err))
}

/// Delete an entry after confirmation. Deleting the open document (or the
/// folder it lives in) also closes the session.
pub async fn delete_entry(ctx: AppContext, file: DriveFile, parent_id: String) {
    let prompt = format!("Delete \"{}\"? This cannot be undone.", file.name);
    if !dom::confirm(&prompt) {
        return;
    }

    match mutation::delete_entry(&HttpDrive, &ctx.listings, &ctx.session, &file, &parent_id).await
    {
        Ok(closed_session) => {
            if closed_session {
                ctx.preview.update(PreviewPipeline::reset);
            }
            if file.is_folder() {
                ctx.expanded.update(|set| {
                    set.remove(&file.id);
                });
            }
        }
        Err(err) => ctx.notify.error(&err),
    }
}

/// Rename the open document from the editor header. Same contract as
/// [`rename_entry`], with the target taken from the session.
pub async fn rename_open_document(ctx: AppContext, raw_name: String) -> Result<(), ApiError> {
    let target = ctx.session.with_untracked(|s| {
        match (s.file_id(), s.file_name(), s.parent_id()) {
            (Some(id), Some(name), Some(parent)) => {
                Some((id.to_string(), name.to_string(), parent.to_string()))
            }
            _ => None,
        }
    });
    let Some((file_id, current_name, parent_id)) = target else {
        return Ok(());
    };

    let name = validate_rename(&current_name, &raw_name).map_err(|e| reject(ctx, e))?;

    mutation::rename_entry(&HttpDrive, &ctx.listings, &ctx.session, &file_id, &parent_id, &name)
        .await
        .map(|_| ())
        .map_err(|err| reject(ctx, err))
}

/// One-click onboarding: reuse the well-known workspace folder at the drive's
/// top level, creating it only if absent, then select it as the root.
pub async fn use_workspace_folder(ctx: AppContext) {
    match find_or_create_workspace_folder(&HttpDrive).await {
        Ok(folder) => {
            ctx.settings.set_root(&folder);
            ctx.notify
                .info(format!("Using \"{WORKSPACE_FOLDER_NAME}\" as your content folder."));
        }
        Err(err) => ctx.notify.error(&err),
    }
}

/// Forget the root selection and return to onboarding.
pub fn change_root(ctx: AppContext) {
    ctx.settings.clear();
    ctx.reset_workspace();
}

/// End the session entirely: forget the root and hand off to the sign-out
/// endpoint, which clears the OAuth session.
pub fn sign_out(ctx: AppContext) {
    change_root(ctx);
    if let Some(window) = dom::window() {
        let _ = window.location().set_href("/api/auth/signout");
    }
}
