//! Remote file metadata cache.
//!
//! Maps a parent folder id to its list of direct children, populated lazily
//! per folder and invalidated after any mutation under that folder. All
//! staleness rules live here so tree nodes never have to duplicate them.
//!
//! Each slot carries a generation counter and the cache as a whole carries an
//! epoch. A fetch is tagged with both when issued; if an invalidation bumps
//! the slot generation, or a `clear` bumps the epoch, while the fetch is in
//! flight, the stale result is dropped on arrival and the next access
//! triggers a fresh fetch. Invalidation always wins.

use std::collections::HashMap;

use crate::core::error::ApiError;
use crate::models::DriveFile;

/// Cached state for one folder's children.
#[derive(Clone, Debug, Default)]
struct ListingSlot {
    /// Fully absent (not yet fetched) or fully present (fetched, maybe empty).
    entries: Option<Vec<DriveFile>>,
    /// Last fetch error, if any. A failed fetch keeps prior entries intact.
    error: Option<String>,
    /// A fetch for this slot is currently in flight.
    fetching: bool,
    /// Bumped on every invalidation; in-flight fetches from older generations
    /// are discarded on completion.
    generation: u64,
}

/// Point-in-time view of one folder's cached listing, for rendering.
#[derive(Clone, Debug, Default)]
pub struct ListingSnapshot {
    pub entries: Option<Vec<DriveFile>>,
    pub error: Option<String>,
    pub fetching: bool,
}

/// Ticket handed out by [`ListingCache::begin_fetch`] and presented back by
/// the completing fetch. It is honored only while both the slot generation
/// and the cache-wide epoch are unchanged; `clear` recreates slots with their
/// generation back at zero, so the epoch is what outlives a root change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTag {
    epoch: u64,
    generation: u64,
}

/// Keyed cache of folder listings. The single shared store for remote
/// metadata; all mutation is funneled through the methods below.
#[derive(Clone, Debug, Default)]
pub struct ListingCache {
    slots: HashMap<String, ListingSlot>,
    /// Bumped by `clear`; fetches tagged under an older epoch are discarded.
    epoch: u64,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view of a folder's listing.
    pub fn snapshot(&self, parent_id: &str) -> ListingSnapshot {
        match self.slots.get(parent_id) {
            Some(slot) => ListingSnapshot {
                entries: slot.entries.clone(),
                error: slot.error.clone(),
                fetching: slot.fetching,
            },
            None => ListingSnapshot::default(),
        }
    }

    /// Whether a fresh fetch should be issued for this folder.
    pub fn needs_fetch(&self, parent_id: &str) -> bool {
        match self.slots.get(parent_id) {
            Some(slot) => slot.entries.is_none() && !slot.fetching,
            None => true,
        }
    }

    /// Mark a fetch as started and return the tag it runs against.
    pub fn begin_fetch(&mut self, parent_id: &str) -> FetchTag {
        let epoch = self.epoch;
        let slot = self.slots.entry(parent_id.to_string()).or_default();
        slot.fetching = true;
        FetchTag {
            epoch,
            generation: slot.generation,
        }
    }

    /// Apply a fetch result. Results tagged with a superseded generation or
    /// epoch are dropped without touching the slot; a newer fetch is
    /// responsible for it.
    pub fn complete_fetch(
        &mut self,
        parent_id: &str,
        tag: FetchTag,
        result: Result<Vec<DriveFile>, ApiError>,
    ) {
        if tag.epoch != self.epoch {
            return;
        }
        let Some(slot) = self.slots.get_mut(parent_id) else {
            return;
        };
        if slot.generation != tag.generation {
            return;
        }
        slot.fetching = false;
        match result {
            Ok(files) => {
                slot.entries = Some(visible_sorted(files));
                slot.error = None;
            }
            // Keep prior entries on failure; the caller renders an inline
            // error instead of losing the tree.
            Err(err) => slot.error = Some(err.to_string()),
        }
    }

    /// Discard the cached listing for a folder, forcing the next access to
    /// refetch. Supersedes any fetch currently in flight for that folder.
    pub fn invalidate(&mut self, parent_id: &str) {
        let slot = self.slots.entry(parent_id.to_string()).or_default();
        slot.generation += 1;
        slot.entries = None;
        slot.error = None;
        slot.fetching = false;
    }

    /// Drop everything. Used when the content root changes. Bumping the
    /// epoch supersedes every fetch still in flight, even though recreated
    /// slots restart their generation at zero.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.epoch += 1;
    }
}

/// Presentation ordering contract: folders before files, then alphabetically
/// (case-insensitive). Entries that are not folders or recognized documents
/// are filtered out.
fn visible_sorted(mut files: Vec<DriveFile>) -> Vec<DriveFile> {
    files.retain(DriveFile::is_visible);
    files.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    files
}
