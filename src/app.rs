//! Root application module.
//!
//! Contains the main App component, AppContext definition, and the
//! notification queue, following Leptos conventions.

use std::collections::HashSet;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::Router;
use crate::config::NOTICE_DISMISS_MS;
use crate::core::{
    ApiError, DocumentSession, ListingCache, LocalStorageSettings, PreviewPipeline, SettingsStore,
};
use crate::models::{DriveFile, RootConfig};

// ============================================================================
// SettingsState
// ============================================================================

/// Root-folder selection, mirrored between a signal and local storage.
///
/// The signal drives routing (onboarding vs. workspace); the storage write
/// keeps the choice across reloads.
#[derive(Clone, Copy)]
pub struct SettingsState {
    pub config: RwSignal<RootConfig>,
}

impl SettingsState {
    /// Load the persisted selection, defaulting to not-onboarded.
    pub fn load() -> Self {
        let config = LocalStorageSettings.load().unwrap_or_default();
        Self {
            config: RwSignal::new(config),
        }
    }

    pub fn is_onboarded(&self) -> bool {
        self.config.with(RootConfig::is_onboarded)
    }

    pub fn root_folder_id(&self) -> Option<String> {
        self.config.with(|c| c.root_folder_id.clone())
    }

    pub fn root_folder_name(&self) -> Option<String> {
        self.config.with(|c| c.root_folder_name.clone())
    }

    /// Select a folder as the content root and persist the choice.
    pub fn set_root(&self, folder: &DriveFile) {
        let config = RootConfig::new(folder.id.clone(), folder.name.clone());
        LocalStorageSettings.save(&config);
        self.config.set(config);
    }

    /// Forget the selection, returning the app to onboarding.
    pub fn clear(&self) {
        LocalStorageSettings.clear();
        self.config.set(RootConfig::default());
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One transient toast message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Queue of transient notices. Each notice auto-dismisses after
/// [`NOTICE_DISMISS_MS`] but can be dismissed earlier by the user.
#[derive(Clone, Copy)]
pub struct NotificationState {
    pub notices: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u64>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeKind::Info, message.into());
    }

    pub fn error(&self, error: &ApiError) {
        self.push(NoticeKind::Error, error.to_string());
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }

    fn push(&self, kind: NoticeKind, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.notices.update(|list| {
            list.push(Notice { id, kind, message });
        });

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_DISMISS_MS).await;
            this.dismiss(id);
        });
    }
}

impl Default for NotificationState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from any child
/// component with `use_context::<AppContext>()`. All fields are Leptos
/// signals, so the struct is `Copy`.
///
/// # Architecture
///
/// State is split into independent domains:
/// - **listings**: the per-folder children cache, the single store for
///   remote metadata
/// - **session**: the one open document and its dirty/saving lifecycle
/// - **preview**: the debounced compile pipeline for the open document
/// - **settings**: the persisted root-folder selection
#[derive(Clone, Copy)]
pub struct AppContext {
    pub listings: RwSignal<ListingCache>,
    pub session: RwSignal<DocumentSession>,
    pub preview: RwSignal<PreviewPipeline>,
    /// Folder ids currently expanded in the tree.
    pub expanded: RwSignal<HashSet<String>>,
    pub settings: SettingsState,
    pub notify: NotificationState,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            listings: RwSignal::new(ListingCache::new()),
            session: RwSignal::new(DocumentSession::new()),
            preview: RwSignal::new(PreviewPipeline::new()),
            expanded: RwSignal::new(HashSet::new()),
            settings: SettingsState::load(),
            notify: NotificationState::new(),
        }
    }

    /// Drop all workspace state. Used when the content root changes or the
    /// user signs out; the next workspace mount starts from a cold cache.
    pub fn reset_workspace(&self) {
        self.listings.update(ListingCache::clear);
        self.session.update(DocumentSession::clear);
        self.preview.update(PreviewPipeline::reset);
        self.expanded.update(HashSet::clear);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class="fatal-error">
                    <h1>"Something went wrong"</h1>
                    <p>"An unexpected error occurred. Please try reloading the page."</p>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button on:click=move |_| {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    }>
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Router />
        </ErrorBoundary>
    }
}
