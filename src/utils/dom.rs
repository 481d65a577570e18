//! Thin wrappers over browser globals.

use web_sys::{Storage, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

/// Today's date as `YYYY-MM-DD`, in the browser's local time zone.
pub fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year() as u32,
        now.get_month() + 1,
        now.get_date()
    )
}

/// Ask the user to confirm a destructive action. Defaults to "no" when the
/// window is unavailable.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
