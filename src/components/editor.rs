//! Editor pane: document header plus the plain-text editing surface.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::actions;
use crate::core::DocumentSession;

#[component]
pub fn EditorPane(show_preview: RwSignal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let file_name = Signal::derive(move || {
        ctx.session
            .with(|s| s.file_name().unwrap_or_default().to_string())
    });
    let content = Signal::derive(move || ctx.session.with(|s| s.content().to_string()));
    let is_dirty = Signal::derive(move || ctx.session.with(DocumentSession::is_dirty));
    let is_saving = Signal::derive(move || ctx.session.with(DocumentSession::is_saving));
    let is_loading = Signal::derive(move || ctx.session.with(DocumentSession::is_loading));
    let can_save = Signal::derive(move || ctx.session.with(DocumentSession::can_save));

    let renaming = RwSignal::new(false);
    let rename_value = RwSignal::new(String::new());

    let start_rename = move |_| {
        rename_value.set(file_name.get_untracked());
        renaming.set(true);
    };

    let handle_rename_key = move |ev: leptos::ev::KeyboardEvent| {
        match ev.key().as_str() {
            "Enter" => {
                let name = rename_value.get();
                spawn_local(async move {
                    // Stays in edit mode on failure for correction.
                    if actions::rename_open_document(ctx, name).await.is_ok() {
                        renaming.set(false);
                    }
                });
            }
            "Escape" => renaming.set(false),
            _ => {}
        }
    };

    let handle_input = move |ev| {
        let text = event_target_value(&ev);
        ctx.session.update(|s| s.update_content(text));
    };

    let handle_save = move |_| {
        spawn_local(async move {
            actions::save_document(ctx).await;
        });
    };

    view! {
        <section class="editor">
            <header class="editor-header">
                <Show
                    when=move || renaming.get()
                    fallback=move || view! {
                        <span class="editor-title" title="Click to rename" on:click=start_rename>
                            {move || file_name.get()}
                            <Show when=move || is_dirty.get()>
                                <span class="editor-dirty" title="Unsaved changes">" •"</span>
                            </Show>
                        </span>
                    }
                >
                    <input
                        class="editor-rename"
                        type="text"
                        prop:value=move || rename_value.get()
                        on:input=move |ev| rename_value.set(event_target_value(&ev))
                        on:keydown=handle_rename_key
                    />
                </Show>

                <span class="editor-controls">
                    <button
                        class="editor-preview-toggle"
                        on:click=move |_| show_preview.update(|v| *v = !*v)
                    >
                        {move || if show_preview.get() { "Hide preview" } else { "Show preview" }}
                    </button>
                    <button
                        class="editor-save"
                        disabled=move || !can_save.get()
                        on:click=handle_save
                    >
                        {move || if is_saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </span>
            </header>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <p class="editor-loading">"Loading document..."</p> }
            >
                <textarea
                    class="editor-surface"
                    spellcheck="false"
                    prop:value=move || content.get()
                    on:input=handle_input
                />
            </Show>
        </section>
    }
}
