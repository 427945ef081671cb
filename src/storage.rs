//! localStorage session keys. The login page (outside this crate) writes
//! `token` and `user`; we only read them, and clear both on logout.

use crate::types::AuthUser;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

pub fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load_token() -> Option<String> {
    get_local_storage()?.get_item(TOKEN_KEY).ok()?
}

pub fn load_user() -> Option<AuthUser> {
    let json = get_local_storage()?.get_item(USER_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

pub fn display_name() -> Option<String> {
    let name = load_user()?.name;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Logout: drop both keys. The caller redirects to the login page.
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
