pub mod actions;
pub mod editor;
pub mod onboarding;
pub mod preview;
pub mod router;
pub mod toast;
pub mod tree;
pub mod workspace;

pub use onboarding::Onboarding;
pub use router::Router;
pub use workspace::Workspace;
