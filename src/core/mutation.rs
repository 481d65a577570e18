//! Mutation sequencing.
//!
//! Every remote mutation follows the same contract: the drive call resolves
//! first, and only a success touches the cache or session. Failures leave
//! local state exactly as it was. The flows are generic over the drive and
//! over how the state is held, so the identical code path runs in the app
//! (state behind signals) and in tests (state behind plain cells).

use leptos::prelude::*;

use crate::core::cache::ListingCache;
use crate::core::drive::Drive;
use crate::core::error::ApiError;
use crate::core::session::DocumentSession;
use crate::models::DriveFile;

/// A shared slot of mutable state. `None` from either accessor means the
/// slot is gone (a disposed signal); flows treat that as "do nothing".
pub trait StateCell<T> {
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
    fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T: Send + Sync + 'static> StateCell<T> for RwSignal<T> {
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Fetch a folder's children if the cache has nothing fresh for it. The
/// cache drops results that an invalidation or a root change superseded
/// while the fetch was in flight.
pub async fn fetch_children<D, L>(
    drive: &D,
    listings: &L,
    parent_id: &str,
) -> Result<(), ApiError>
where
    D: Drive,
    L: StateCell<ListingCache>,
{
    if listings.read(|c| c.needs_fetch(parent_id)) != Some(true) {
        return Ok(());
    }
    let Some(tag) = listings.write(|c| c.begin_fetch(parent_id)) else {
        return Ok(());
    };

    let result = drive.list_children(parent_id).await;
    let failure = result.as_ref().err().cloned();
    listings.write(|c| c.complete_fetch(parent_id, tag, result));
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Fetch a document's content and install it as the active session. A stale
/// read (another document was clicked meanwhile) is discarded inside the
/// session.
pub async fn open_document<D, S>(
    drive: &D,
    session: &S,
    file_id: &str,
    parent_id: &str,
) -> Result<(), ApiError>
where
    D: Drive,
    S: StateCell<DocumentSession>,
{
    if session.read(|s| s.is_open(file_id)) == Some(true) {
        return Ok(());
    }
    let Some(generation) = session.write(DocumentSession::begin_load) else {
        return Ok(());
    };

    match drive.read_content(file_id).await {
        Ok((meta, content)) => {
            session.write(|s| {
                s.finish_load(generation, meta.id, meta.name, parent_id.to_string(), content);
            });
            Ok(())
        }
        Err(err) => {
            session.write(|s| s.fail_load(generation));
            Err(err)
        }
    }
}

/// Write the open document's content back. Returns `Ok(false)` when no save
/// was admitted (nothing open, clean, or one already in flight). On failure
/// the document stays dirty.
pub async fn save_document<D, S>(drive: &D, session: &S) -> Result<bool, ApiError>
where
    D: Drive,
    S: StateCell<DocumentSession>,
{
    let Some(request) = session.write(DocumentSession::begin_save).flatten() else {
        return Ok(false);
    };

    match drive.write_content(&request.file_id, &request.content).await {
        Ok(_) => {
            session.write(|s| s.finish_save(&request.content));
            Ok(true)
        }
        Err(err) => {
            session.write(DocumentSession::fail_save);
            Err(err)
        }
    }
}

/// Create a file under a parent. The parent listing is invalidated only
/// after the remote create succeeds; a failure is a complete no-op locally.
pub async fn create_file<D, L>(
    drive: &D,
    listings: &L,
    parent_id: &str,
    name: &str,
    content: &str,
) -> Result<DriveFile, ApiError>
where
    D: Drive,
    L: StateCell<ListingCache>,
{
    let created = drive.create_file(name, parent_id, content).await?;
    listings.write(|c| c.invalidate(parent_id));
    Ok(created)
}

/// Create a folder under a parent. Same invalidate-on-success contract as
/// [`create_file`].
pub async fn create_folder<D, L>(
    drive: &D,
    listings: &L,
    parent_id: &str,
    name: &str,
) -> Result<DriveFile, ApiError>
where
    D: Drive,
    L: StateCell<ListingCache>,
{
    let created = drive.create_folder(name, parent_id).await?;
    listings.write(|c| c.invalidate(parent_id));
    Ok(created)
}

/// Rename an entry. On success the parent listing refetches; if the entry is
/// the open document, the session picks up the new name without touching the
/// content or the dirty flag.
pub async fn rename_entry<D, L, S>(
    drive: &D,
    listings: &L,
    session: &S,
    file_id: &str,
    parent_id: &str,
    name: &str,
) -> Result<DriveFile, ApiError>
where
    D: Drive,
    L: StateCell<ListingCache>,
    S: StateCell<DocumentSession>,
{
    let renamed = drive.rename(file_id, name).await?;
    listings.write(|c| c.invalidate(parent_id));
    if session.read(|s| s.is_open(file_id)) == Some(true) {
        session.write(|s| s.set_file_name(renamed.name.clone()));
    }
    Ok(renamed)
}

/// Delete an entry. Deleting the open document, or the folder it lives in,
/// also closes the session; the returned flag reports that so the caller can
/// reset view-side state tied to the document.
pub async fn delete_entry<D, L, S>(
    drive: &D,
    listings: &L,
    session: &S,
    file: &DriveFile,
    parent_id: &str,
) -> Result<bool, ApiError>
where
    D: Drive,
    L: StateCell<ListingCache>,
    S: StateCell<DocumentSession>,
{
    drive.delete(&file.id).await?;
    listings.write(|c| c.invalidate(parent_id));

    let closes_session = session
        .read(|s| {
            s.is_open(&file.id) || (file.is_folder() && s.parent_id() == Some(file.id.as_str()))
        })
        .unwrap_or(false);
    if closes_session {
        session.write(DocumentSession::clear);
    }
    if file.is_folder() {
        listings.write(|c| c.invalidate(&file.id));
    }
    Ok(closes_session)
}
