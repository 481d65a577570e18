//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "drivemark";

// =============================================================================
// Document Naming
// =============================================================================

/// Extensions recognized as editable documents. Everything else in the remote
/// store is invisible to the tree.
pub const DOCUMENT_EXTENSIONS: &[&str] = &[".md", ".mdx"];

/// Extension appended when a new file name carries none of the recognized ones.
pub const DEFAULT_DOCUMENT_EXTENSION: &str = ".mdx";

// =============================================================================
// Front Matter Defaults
// =============================================================================

/// Default author written into the front-matter template of new files.
pub const FRONT_MATTER_AUTHOR: &str = "";

/// Default category written into the front-matter template of new files.
pub const FRONT_MATTER_CATEGORY: &str = "posts";

// =============================================================================
// Remote Store Configuration
// =============================================================================

/// Well-known folder name used by the auto-create onboarding flow.
/// Found-or-created idempotently rather than tracked by stored identifier.
pub const WORKSPACE_FOLDER_NAME: &str = "My-CMS-Folder";

/// Alias the remote store accepts for the top level of the drive.
pub const DRIVE_ROOT_ALIAS: &str = "root";

// =============================================================================
// Persistence
// =============================================================================

/// localStorage slot for the persisted root-folder selection.
pub const SETTINGS_STORAGE_KEY: &str = "cms-settings";

// =============================================================================
// Timing
// =============================================================================

/// Delay between the last keystroke and a preview compile, in milliseconds.
pub const PREVIEW_DEBOUNCE_MS: u32 = 500;

/// How long a toast notification stays visible, in milliseconds.
pub const NOTICE_DISMISS_MS: u32 = 4000;
