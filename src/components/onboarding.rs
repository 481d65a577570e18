//! First-run root-folder selection.
//!
//! Offers the one-click well-known workspace folder, or a pick from the
//! folders already at the drive's top level. Either choice persists and
//! flips the app into the workspace view.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::actions;
use crate::config::WORKSPACE_FOLDER_NAME;
use crate::core::{Drive, HttpDrive};
use crate::models::DriveFile;

#[component]
pub fn Onboarding() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let creating = RwSignal::new(false);

    let top_level = LocalResource::new(move || async move {
        HttpDrive.list_root_folders().await.map(|mut folders| {
            folders.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            folders
        })
    });

    let use_default = move |_| {
        if creating.get() {
            return;
        }
        creating.set(true);
        spawn_local(async move {
            actions::use_workspace_folder(ctx).await;
            creating.set(false);
        });
    };

    view! {
        <div class="onboarding">
            <h1>"Choose your content folder"</h1>
            <p>"Your documents live in a single folder on your drive. Pick one to get started."</p>

            <button
                class="onboarding-default"
                disabled=move || creating.get()
                on:click=use_default
            >
                {move || if creating.get() {
                    "Setting up...".to_string()
                } else {
                    format!("Use \"{WORKSPACE_FOLDER_NAME}\"")
                }}
            </button>

            <h2>"Or pick an existing folder"</h2>
            <Suspense fallback=|| view! { <p class="onboarding-loading">"Loading folders..."</p> }>
                {move || top_level.get().map(|result| match result {
                    Ok(folders) if folders.is_empty() => view! {
                        <p class="onboarding-empty">"No folders at the top level of your drive yet."</p>
                    }.into_any(),
                    Ok(folders) => view! {
                        <ul class="onboarding-folders">
                            <For
                                each=move || folders.clone()
                                key=|folder| folder.id.clone()
                                children=move |folder: DriveFile| {
                                    let name = folder.name.clone();
                                    view! {
                                        <li>
                                            <button on:click=move |_| ctx.settings.set_root(&folder)>
                                                {name}
                                            </button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    }.into_any(),
                    Err(err) => view! {
                        <p class="onboarding-error">{err.to_string()}</p>
                    }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
