use serde_json::json;

use crate::config;
use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};

fn handle_checklist_toggle(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(task_key) = req.params.get("taskKey").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing taskKey", None);
    };
    let Some(checked) = req.params.get("checked").and_then(|v| v.as_bool()) else {
        return err(&req.id, "bad_params", "missing checked", None);
    };
    let week_id = match req.params.get("weekId").and_then(|v| v.as_str()) {
        Some(s) => s.to_string(),
        None => state.roster.current_week_id(config::start_date()),
    };

    // Pure observational write; nothing validates the key against the
    // duty catalogue, matching the legacy behaviour.
    state.roster.toggle_check(&week_id, task_key, checked);
    if let Err(e) = db::state_save(conn, &state.roster) {
        return err(&req.id, "db_update_failed", format!("{e:?}"), None);
    }

    ok(
        &req.id,
        json!({
            "key": format!("{week_id}-{task_key}"),
            "checked": checked
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "checklist.toggle" => Some(handle_checklist_toggle(state, req)),
        _ => None,
    }
}
