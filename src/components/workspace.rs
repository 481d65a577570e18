//! Main workspace layout: tree sidebar, editor, and live preview.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::actions;
use crate::components::editor::EditorPane;
use crate::components::preview::PreviewPane;
use crate::components::toast::Toasts;
use crate::components::tree::FileTree;
use crate::config::APP_NAME;
use crate::utils::dom;

#[component]
pub fn Workspace() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let root_name = Signal::derive(move || ctx.settings.root_folder_name().unwrap_or_default());
    let has_document = Signal::derive(move || ctx.session.with(|s| s.file_id().is_some()));
    let show_preview = RwSignal::new(true);

    // Ctrl/Cmd+S saves instead of invoking the browser's save dialog.
    let save_handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "s" && (event.ctrl_key() || event.meta_key()) {
            event.prevent_default();
            spawn_local(async move {
                actions::save_document(ctx).await;
            });
        }
    });
    on_cleanup(move || save_handle.remove());

    let change_folder = move |_| {
        let dirty = ctx.session.with_untracked(|s| s.is_dirty());
        if dirty && !dom::confirm("Discard unsaved changes?") {
            return;
        }
        actions::change_root(ctx);
    };

    let handle_sign_out = move |_| {
        let dirty = ctx.session.with_untracked(|s| s.is_dirty());
        if dirty && !dom::confirm("Discard unsaved changes?") {
            return;
        }
        actions::sign_out(ctx);
    };

    view! {
        <div class="workspace">
            <aside class="sidebar">
                <header class="sidebar-header">
                    <span class="sidebar-brand">{APP_NAME}</span>
                    <span class="sidebar-root" title="Content folder">{move || root_name.get()}</span>
                    <button on:click=change_folder>"Change folder"</button>
                    <button on:click=handle_sign_out>"Sign out"</button>
                </header>
                <FileTree />
            </aside>

            <main class="panes">
                <Show
                    when=move || has_document.get()
                    fallback=|| view! {
                        <p class="panes-empty">"Select a document from the sidebar to start editing."</p>
                    }
                >
                    <EditorPane show_preview=show_preview />
                    <Show when=move || show_preview.get()>
                        <PreviewPane />
                    </Show>
                </Show>
            </main>

            <Toasts />
        </div>
    }
}
