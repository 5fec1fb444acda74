//! Token persistence.
//!
//! "Remember me" keeps tokens in localStorage; otherwise they live in
//! sessionStorage and die with the tab. Reads check local first.

use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn get_session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    let local = get_local_storage().and_then(|s| s.get_item(key).ok().flatten());
    local.or_else(|| get_session_storage().and_then(|s| s.get_item(key).ok().flatten()))
}

/// Save both tokens, in localStorage when `remember` is set.
pub fn save_tokens(access: &str, refresh: &str, remember: bool) {
    clear_tokens();
    let storage = if remember {
        get_local_storage()
    } else {
        get_session_storage()
    };
    if let Some(storage) = storage {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, access);
        let _ = storage.set_item(REFRESH_TOKEN_KEY, refresh);
    }
}

/// Replace the access token wherever the refresh token lives.
pub fn save_access_token(token: &str) {
    let in_local = get_local_storage()
        .and_then(|s| s.get_item(REFRESH_TOKEN_KEY).ok().flatten())
        .is_some();
    let storage = if in_local {
        get_local_storage()
    } else {
        get_session_storage()
    };
    if let Some(storage) = storage {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

pub fn get_access_token() -> Option<String> {
    read(ACCESS_TOKEN_KEY)
}

pub fn get_refresh_token() -> Option<String> {
    read(REFRESH_TOKEN_KEY)
}

/// Clear all authentication tokens from both storages
pub fn clear_tokens() {
    for storage in [get_local_storage(), get_session_storage()].into_iter().flatten() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
