//! Top-level view switch.
//!
//! Routing is a function of one piece of state: whether a root folder has
//! been chosen. No root means onboarding; otherwise the workspace.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::components::{Onboarding, Workspace};

#[component]
pub fn Router() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let onboarded = Signal::derive(move || ctx.settings.is_onboarded());

    view! {
        <Show
            when=move || onboarded.get()
            fallback=|| view! { <Onboarding /> }
        >
            <Workspace />
        </Show>
    }
}
