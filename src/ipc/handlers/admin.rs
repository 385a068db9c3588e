use serde_json::json;
use sha2::{Digest, Sha256};

use crate::config;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};

/// Compares the SHA-256 of the supplied password against the built-in
/// hash. This gates the admin view in the UI and nothing more; the
/// daemon itself enforces no privileges.
fn handle_admin_login(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(password) = req.params.get("password").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing password", None);
    };
    let hash = hex::encode(Sha256::digest(password.as_bytes()));
    ok(&req.id, json!({ "granted": hash == config::ADMIN_HASH }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "admin.login" => Some(handle_admin_login(state, req)),
        _ => None,
    }
}
