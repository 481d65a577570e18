//! Transient notice overlay.

use leptos::prelude::*;

use crate::app::{AppContext, Notice, NoticeKind};

#[component]
pub fn Toasts() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class="toasts" role="status" aria-live="polite">
            <For
                each=move || ctx.notify.notices.get()
                key=|notice| notice.id
                children=move |notice: Notice| {
                    let class = match notice.kind {
                        NoticeKind::Info => "toast toast-info",
                        NoticeKind::Error => "toast toast-error",
                    };
                    let id = notice.id;
                    view! {
                        <div class=class>
                            <span>{notice.message}</span>
                            <button
                                class="toast-dismiss"
                                aria-label="Dismiss"
                                on:click=move |_| ctx.notify.dismiss(id)
                            >
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
