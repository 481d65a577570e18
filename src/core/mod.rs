pub mod api;
pub mod cache;
pub mod compile;
pub mod document;
pub mod drive;
pub mod error;
pub mod mutation;
pub mod persist;
pub mod preview;
pub mod session;

pub use api::HttpDrive;
pub use cache::{ListingCache, ListingSnapshot};
pub use compile::compile_preview;
pub use drive::{Drive, find_or_create_workspace_folder};
pub use error::ApiError;
pub use persist::{LocalStorageSettings, SettingsStore};
pub use preview::{PreviewDisplay, PreviewPipeline};
pub use session::DocumentSession;
