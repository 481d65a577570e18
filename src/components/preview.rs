//! Live preview pane.
//!
//! Watches the open document's text, waits out the debounce window, and
//! compiles only if no newer change arrived meanwhile. The generation check
//! runs twice: after the timer (skip superseded compiles entirely) and inside
//! `apply` (drop superseded results that compiled anyway).

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::config::PREVIEW_DEBOUNCE_MS;
use crate::core::{PreviewDisplay, PreviewPipeline, compile_preview};

#[component]
pub fn PreviewPane() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Content only, memoized: saves and other session flag flips must not
    // resubmit unchanged text. `None` means no document is open.
    let document_text = Memo::new(move |_| {
        ctx.session
            .with(|s| s.file_id().is_some().then(|| s.content().to_string()))
    });

    Effect::new(move |_| {
        let Some(text) = document_text.get() else {
            ctx.preview.update(PreviewPipeline::reset);
            return;
        };

        let generation = ctx.preview.try_update(|p| p.submit(&text)).flatten();
        let Some(generation) = generation else {
            return;
        };

        spawn_local(async move {
            TimeoutFuture::new(PREVIEW_DEBOUNCE_MS).await;
            if !ctx.preview.with_untracked(|p| p.is_current(generation)) {
                return;
            }
            let result = compile_preview(&text);
            ctx.preview.update(|p| {
                p.apply(generation, result);
            });
        });
    });

    let display = Signal::derive(move || ctx.preview.with(|p| p.display().clone()));

    view! {
        <section class="preview">
            {move || match display.get() {
                PreviewDisplay::Empty => view! {
                    <p class="preview-empty">"Start typing to see the preview."</p>
                }.into_any(),
                PreviewDisplay::Failed(message) => view! {
                    <p class="preview-error">{message}</p>
                }.into_any(),
                PreviewDisplay::Ready(compiled) => {
                    let front_matter = compiled.front_matter;
                    view! {
                        <div class="preview-ready">
                            {(!front_matter.is_empty()).then(|| view! {
                                <table class="preview-meta">
                                    <tbody>
                                        {front_matter
                                            .into_iter()
                                            .map(|(key, value)| view! {
                                                <tr>
                                                    <th scope="row">{key}</th>
                                                    <td>{value}</td>
                                                </tr>
                                            })
                                            .collect::<Vec<_>>()
                                        }
                                    </tbody>
                                </table>
                            })}
                            <article class="preview-body" inner_html=compiled.html />
                        </div>
                    }.into_any()
                }
            }}
        </section>
    }
}
