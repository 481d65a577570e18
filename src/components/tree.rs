//! Folder tree sidebar.
//!
//! Each expanded folder renders from the listing cache; an effect watches the
//! cache and issues a fetch whenever the folder's slot is empty, which covers
//! both first expansion and post-mutation invalidation. Collapsed folders are
//! never fetched.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::actions;
use crate::core::ListingSnapshot;
use crate::models::{DriveFile, EntryKind};

/// Which kind of entry an inline creation input produces.
#[derive(Clone, Copy, PartialEq, Eq)]
enum NewEntryKind {
    Document,
    Folder,
}

#[component]
pub fn FileTree() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let root_id = Signal::derive(move || ctx.settings.root_folder_id().unwrap_or_default());

    view! {
        <nav class="file-tree" aria-label="Documents">
            {move || {
                let root = root_id.get();
                (!root.is_empty()).then(|| view! { <FolderChildren parent_id=root /> })
            }}
        </nav>
    }
}

/// The children of one folder, fetched lazily and re-fetched after
/// invalidation.
#[component]
pub fn FolderChildren(parent_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let snapshot = {
        let parent_id = parent_id.clone();
        Signal::derive(move || ctx.listings.with(|c| c.snapshot(&parent_id)))
    };

    // Re-runs whenever the cache changes; issues a fetch when this folder's
    // slot has no entries and none in flight.
    {
        let parent_id = parent_id.clone();
        Effect::new(move |_| {
            let needs = ctx.listings.with(|c| c.needs_fetch(&parent_id));
            if needs {
                let parent_id = parent_id.clone();
                spawn_local(async move {
                    actions::ensure_children(ctx, parent_id).await;
                });
            }
        });
    }

    let entries = Signal::derive(move || {
        snapshot.with(|s: &ListingSnapshot| s.entries.clone().unwrap_or_default())
    });
    let loaded = Signal::derive(move || snapshot.with(|s| s.entries.is_some()));
    let fetching = Signal::derive(move || snapshot.with(|s| s.fetching));
    let error = Signal::derive(move || snapshot.with(|s| s.error.clone()));

    let retry_parent = parent_id.clone();
    let retry = move |_| {
        ctx.listings.update(|c| c.invalidate(&retry_parent));
    };

    let rows_parent = parent_id.clone();

    view! {
        <div class="tree-children">
            <Show when=move || fetching.get() && !loaded.get()>
                <p class="tree-loading">"Loading..."</p>
            </Show>

            {move || error.get().map(|message| view! {
                <p class="tree-error">
                    {message}
                    <button class="tree-retry" on:click=retry.clone()>"Retry"</button>
                </p>
            })}

            <Show when=move || loaded.get() && entries.with(Vec::is_empty)>
                <p class="tree-empty">"Empty folder"</p>
            </Show>

            <For
                each=move || entries.get()
                key=|entry| entry.id.clone()
                children=move |entry| {
                    view! { <EntryRow file=entry parent_id=rows_parent.clone() /> }
                }
            />

            <NewEntryControls parent_id=parent_id />
        </div>
    }
}

/// One row: a document that opens on click, or a folder that expands.
#[component]
fn EntryRow(file: DriveFile, parent_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_folder = file.kind() == EntryKind::Folder;
    let file_id = file.id.clone();
    let renaming = RwSignal::new(false);

    let expanded = {
        let file_id = file_id.clone();
        Signal::derive(move || ctx.expanded.with(|set| set.contains(&file_id)))
    };

    let is_open = {
        let file_id = file_id.clone();
        Signal::derive(move || ctx.session.with(|s| s.is_open(&file_id)))
    };

    let handle_click = {
        let file = file.clone();
        let parent_id = parent_id.clone();
        move |_| {
            if renaming.get() {
                return;
            }
            if is_folder {
                ctx.expanded.update(|set| {
                    if !set.remove(&file.id) {
                        set.insert(file.id.clone());
                    }
                });
            } else {
                let file = file.clone();
                let parent_id = parent_id.clone();
                spawn_local(async move {
                    actions::open_document(ctx, file, parent_id).await;
                });
            }
        }
    };

    let handle_delete = {
        let file = file.clone();
        let parent_id = parent_id.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            let file = file.clone();
            let parent_id = parent_id.clone();
            spawn_local(async move {
                actions::delete_entry(ctx, file, parent_id).await;
            });
        }
    };

    let start_rename = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        renaming.set(true);
    };

    let row_class = move || {
        let mut class = String::from("tree-row");
        if is_folder {
            class.push_str(" tree-folder");
        }
        if is_open.get() {
            class.push_str(" tree-active");
        }
        class
    };

    let marker = move || {
        if !is_folder {
            ""
        } else if expanded.get() {
            "▾ "
        } else {
            "▸ "
        }
    };

    let rename_file = file.clone();
    let rename_parent = parent_id.clone();
    let display_name = file.name.clone();
    let nested_id = file.id.clone();

    view! {
        <div class="tree-entry">
            <div class=row_class on:click=handle_click>
                <Show
                    when=move || renaming.get()
                    fallback=move || view! {
                        <span class="tree-name">{marker()}{display_name.clone()}</span>
                    }
                >
                    <RenameInput
                        file=rename_file.clone()
                        parent_id=rename_parent.clone()
                        editing=renaming
                    />
                </Show>
                <span class="tree-actions">
                    <button title="Rename" on:click=start_rename>"✎"</button>
                    <button title="Delete" on:click=handle_delete.clone()>"✕"</button>
                </span>
            </div>

            // Type-erased so the row/children recursion bottoms out.
            {move || (is_folder && expanded.get()).then(|| {
                view! { <FolderChildren parent_id=nested_id.clone() /> }.into_any()
            })}
        </div>
    }
}

/// Inline rename input. Enter commits, Escape cancels, and the input stays
/// open when the rename fails so the name can be corrected.
#[component]
fn RenameInput(file: DriveFile, parent_id: String, editing: RwSignal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let value = RwSignal::new(file.name.clone());

    let handle_key = move |ev: leptos::ev::KeyboardEvent| {
        match ev.key().as_str() {
            "Enter" => {
                let file = file.clone();
                let parent_id = parent_id.clone();
                let name = value.get();
                spawn_local(async move {
                    if actions::rename_entry(ctx, file, parent_id, name).await.is_ok() {
                        editing.set(false);
                    }
                });
            }
            "Escape" => editing.set(false),
            _ => {}
        }
    };

    view! {
        <input
            class="tree-rename"
            type="text"
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
            on:keydown=handle_key
            on:click=|ev| ev.stop_propagation()
        />
    }
}

/// "New document" / "new folder" buttons with their inline input.
#[component]
fn NewEntryControls(parent_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let active: RwSignal<Option<NewEntryKind>> = RwSignal::new(None);
    let value = RwSignal::new(String::new());

    let open = move |kind: NewEntryKind| {
        move |_| {
            active.set(Some(kind));
            value.set(String::new());
        }
    };

    let handle_key = {
        let parent_id = parent_id.clone();
        move |ev: leptos::ev::KeyboardEvent| {
            match ev.key().as_str() {
                "Enter" => {
                    let Some(kind) = active.get() else {
                        return;
                    };
                    let parent_id = parent_id.clone();
                    let name = value.get();
                    spawn_local(async move {
                        let result = match kind {
                            NewEntryKind::Document => {
                                actions::create_document(ctx, parent_id, name).await
                            }
                            NewEntryKind::Folder => {
                                actions::create_folder(ctx, parent_id, name).await
                            }
                        };
                        // Close only on success; failures keep the input so
                        // the name can be corrected and resubmitted.
                        if result.is_ok() {
                            active.set(None);
                            value.set(String::new());
                        }
                    });
                }
                "Escape" => active.set(None),
                _ => {}
            }
        }
    };

    view! {
        <div class="tree-new">
            <Show when=move || active.get().is_none()>
                <button on:click=open(NewEntryKind::Document)>"+ Document"</button>
                <button on:click=open(NewEntryKind::Folder)>"+ Folder"</button>
            </Show>
            <Show when=move || active.get().is_some()>
                <input
                    type="text"
                    placeholder=move || match active.get() {
                        Some(NewEntryKind::Folder) => "Folder name",
                        _ => "Document name",
                    }
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                    on:keydown=handle_key.clone()
                />
            </Show>
        </div>
    }
}
