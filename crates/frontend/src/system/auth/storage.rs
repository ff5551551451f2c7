use contracts::system::auth::session::AdminSession;
use web_sys::window;

/// Сессия администратора (JSON)
const SESSION_KEY: &str = "joltcab_admin";
/// Access token отдельно, чтобы HTTP-клиент не разбирал JSON сессии
const TOKEN_KEY: &str = "joltcab_admin_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save session and its access token to localStorage
pub fn save_session(session: &AdminSession) {
    if let Some(storage) = get_local_storage() {
        if let Ok(raw) = serde_json::to_string(session) {
            let _ = storage.set_item(SESSION_KEY, &raw);
        }
        let _ = storage.set_item(TOKEN_KEY, &session.access_token);
    }
}

/// Raw session JSON; validity is checked by `AdminSession::restore`
pub fn load_session_raw() -> Option<String> {
    get_local_storage()?.get_item(SESSION_KEY).ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?.get_item(TOKEN_KEY).ok()?
}

/// Clear all session data
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
        let _ = storage.remove_item(TOKEN_KEY);
    }
}
