mod app;
mod components;
mod config;
mod core;
mod models;
mod utils;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use config::APP_NAME;

fn main() {
    console_error_panic_hook::set_once();

    // The mount node ships in index.html.
    match document().get_element_by_id("app") {
        Some(node) => {
            mount_to(node.unchecked_into::<web_sys::HtmlElement>(), App).forget();
        }
        None => leptos::logging::error!("{APP_NAME}: no #app element to mount into"),
    }
}
