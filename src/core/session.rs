//! Document session state.
//!
//! Tracks the single currently open document. Opening a document replaces the
//! prior session wholesale; there is no merge or diff. The dirty flag is true
//! exactly when the content has changed since the document was loaded or last
//! saved.

/// Payload handed to the drive when a save is admitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRequest {
    pub file_id: String,
    pub content: String,
}

/// The single active editing session. At most one document is open at a time.
#[derive(Clone, Debug, Default)]
pub struct DocumentSession {
    file_id: Option<String>,
    file_name: Option<String>,
    /// Folder the document was opened from, so rename/delete can invalidate
    /// the right listing.
    parent_id: Option<String>,
    content: String,
    is_dirty: bool,
    is_loading: bool,
    is_saving: bool,
    /// Bumped per content fetch; a read that resolves after another document
    /// was clicked is discarded instead of clobbering the newer session.
    load_generation: u64,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// Whether the given entry is the open document.
    pub fn is_open(&self, file_id: &str) -> bool {
        self.file_id.as_deref() == Some(file_id)
    }

    /// Save is enabled only when a document is open, dirty, and no save for
    /// it is already in flight.
    pub fn can_save(&self) -> bool {
        self.file_id.is_some() && self.is_dirty && !self.is_saving
    }

    /// Mark a content fetch as started and return its generation tag.
    pub fn begin_load(&mut self) -> u64 {
        self.is_loading = true;
        self.load_generation += 1;
        self.load_generation
    }

    /// Install a fetched document, unless a newer load superseded this one.
    /// Returns whether the session was updated.
    pub fn finish_load(
        &mut self,
        generation: u64,
        file_id: String,
        file_name: String,
        parent_id: String,
        content: String,
    ) -> bool {
        if generation != self.load_generation {
            return false;
        }
        self.file_id = Some(file_id);
        self.file_name = Some(file_name);
        self.parent_id = Some(parent_id);
        self.content = content;
        self.is_dirty = false;
        self.is_loading = false;
        self.is_saving = false;
        true
    }

    /// Clear the loading flag after a failed fetch, leaving the prior session
    /// untouched.
    pub fn fail_load(&mut self, generation: u64) {
        if generation == self.load_generation {
            self.is_loading = false;
        }
    }

    /// Apply a keystroke. No-op when no document is open.
    pub fn update_content(&mut self, content: String) {
        if self.file_id.is_none() {
            return;
        }
        self.content = content;
        self.is_dirty = true;
    }

    /// Update the display name after a successful rename. The id is stable.
    pub fn set_file_name(&mut self, name: String) {
        if self.file_id.is_some() {
            self.file_name = Some(name);
        }
    }

    /// Admit a save if one is allowed, marking it in flight. A second save
    /// request while one is outstanding returns `None` (suppressed, not
    /// queued).
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        if !self.can_save() {
            return None;
        }
        self.is_saving = true;
        Some(SaveRequest {
            file_id: self.file_id.clone().expect("checked by can_save"),
            content: self.content.clone(),
        })
    }

    /// Record a successful save. The dirty flag clears only when the content
    /// has not changed since the request was issued, preserving the invariant
    /// that dirty tracks changes since the last save.
    pub fn finish_save(&mut self, saved_content: &str) {
        self.is_saving = false;
        if self.content == saved_content {
            self.is_dirty = false;
        }
    }

    /// Record a failed save. The document stays dirty so the user can retry.
    pub fn fail_save(&mut self) {
        self.is_saving = false;
    }

    /// Drop the session entirely: open-document deleted, root folder changed,
    /// or sign-out. Also supersedes any content fetch still in flight.
    pub fn clear(&mut self) {
        self.load_generation += 1;
        self.file_id = None;
        self.file_name = None;
        self.parent_id = None;
        self.content = String::new();
        self.is_dirty = false;
        self.is_loading = false;
        self.is_saving = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_session() -> DocumentSession {
        let mut session = DocumentSession::new();
        let generation = session.begin_load();
        session.finish_load(
            generation,
            "f1".to_string(),
            "a.md".to_string(),
            "p1".to_string(),
            "hello".to_string(),
        );
        session
    }

    #[test]
    fn test_dirty_flag_lifecycle() {
        let mut session = open_session();
        assert!(!session.is_dirty());

        session.update_content("hello world".to_string());
        assert!(session.is_dirty());

        let request = session.begin_save().expect("save admitted");
        session.finish_save(&request.content);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_failed_save_leaves_dirty() {
        let mut session = open_session();
        session.update_content("edited".to_string());
        let _ = session.begin_save().expect("save admitted");
        session.fail_save();
        assert!(session.is_dirty());
        assert!(!session.is_saving());
        assert!(session.can_save());
    }

    #[test]
    fn test_concurrent_save_is_suppressed() {
        let mut session = open_session();
        session.update_content("edited".to_string());
        assert!(session.begin_save().is_some());
        assert!(session.begin_save().is_none());
    }

    #[test]
    fn test_save_not_admitted_when_clean_or_closed() {
        let mut session = open_session();
        assert!(session.begin_save().is_none());

        let mut closed = DocumentSession::new();
        closed.update_content("typed into nothing".to_string());
        assert!(closed.begin_save().is_none());
        assert_eq!(closed.content(), "");
    }

    #[test]
    fn test_typing_during_save_keeps_dirty() {
        let mut session = open_session();
        session.update_content("v1".to_string());
        let request = session.begin_save().expect("save admitted");

        session.update_content("v2".to_string());
        session.finish_save(&request.content);
        assert!(session.is_dirty());
        assert_eq!(session.content(), "v2");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = open_session();
        session.update_content("edited".to_string());
        session.clear();

        assert_eq!(session.file_id(), None);
        assert_eq!(session.file_name(), None);
        assert_eq!(session.parent_id(), None);
        assert_eq!(session.content(), "");
        assert!(!session.is_dirty());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_rename_updates_name_only() {
        let mut session = open_session();
        session.set_file_name("b.md".to_string());
        assert_eq!(session.file_name(), Some("b.md"));
        assert_eq!(session.file_id(), Some("f1"));
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut session = DocumentSession::new();
        let first = session.begin_load();
        let second = session.begin_load();

        // Second click resolves first.
        assert!(session.finish_load(
            second,
            "f2".to_string(),
            "b.md".to_string(),
            "p1".to_string(),
            "second".to_string(),
        ));

        // First click's read arrives late and must not clobber.
        assert!(!session.finish_load(
            first,
            "f1".to_string(),
            "a.md".to_string(),
            "p1".to_string(),
            "first".to_string(),
        ));
        assert_eq!(session.file_id(), Some("f2"));
        assert_eq!(session.content(), "second");
    }

    #[test]
    fn test_clear_supersedes_in_flight_load() {
        let mut session = DocumentSession::new();
        let generation = session.begin_load();
        session.clear();
        assert!(!session.finish_load(
            generation,
            "f1".to_string(),
            "a.md".to_string(),
            "p1".to_string(),
            "late".to_string(),
        ));
        assert_eq!(session.file_id(), None);
    }
}
