//! Настройки интерфейса в localStorage

use web_sys::window;

pub const DARK_MODE_KEY: &str = "adminDarkMode";
pub const SIDEBAR_COLLAPSED_KEY: &str = "adminSidebarCollapsed";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn load_flag(key: &str) -> Option<bool> {
    let raw = get_local_storage()?.get_item(key).ok()??;
    match raw.as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn save_flag(key: &str, value: bool) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(key, if value { "true" } else { "false" });
    }
}

/// Системная тёмная тема (`prefers-color-scheme`)
pub fn prefers_dark() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false)
}
