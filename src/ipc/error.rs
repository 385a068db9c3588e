use serde_json::json;

/// Success envelope: `{ id, ok: true, result }`.
pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({ "id": id, "ok": true, "result": result })
}

/// Error envelope: `{ id, ok: false, error: { code, message, details? } }`.
pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({ "code": code, "message": message.into() });
    if let Some(details) = details {
        error["details"] = details;
    }
    json!({ "id": id, "ok": false, "error": error })
}
