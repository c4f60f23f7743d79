//! Session Token Store
//!
//! Opaque auth token in sessionStorage; the only client-side persistence.

const TOKEN_KEY: &str = "token";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

/// Current session token, if any
pub fn token() -> Option<String> {
    storage()?.get_item(TOKEN_KEY).ok().flatten()
}

/// Store the token issued at login
pub fn store(token: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

/// Drop the token on logout or session expiry
pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}
