use crate::config;
use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::state::RosterState;
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    let conn = match db::open_db(&path) {
        Ok(conn) => conn,
        Err(e) => return err(&req.id, "db_open_failed", format!("{e:?}"), None),
    };
    let roster = match db::state_load(&conn) {
        Ok(roster) => roster,
        Err(e) => return err(&req.id, "db_open_failed", format!("{e:?}"), None),
    };

    let needs_setup = roster.students.is_empty();
    state.workspace = Some(path.clone());
    state.db = Some(conn);
    state.roster = roster;

    ok(
        &req.id,
        json!({
            "workspacePath": path.to_string_lossy(),
            "needsSetup": needs_setup,
            "studentCount": state.roster.students.len()
        }),
    )
}

/// Static configuration the display layer needs: term bounds, the duty
/// catalogue and the ideal roster size. The admin hash stays private.
fn handle_config_get(_state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "startDate": config::start_date().to_string(),
            "endDate": config::end_date().to_string(),
            "duties": config::DUTIES,
            "idealStudentCount": config::IDEAL_STUDENT_COUNT
        }),
    )
}

fn handle_app_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    if let Err(e) = db::state_clear(conn) {
        return err(&req.id, "db_update_failed", format!("{e:?}"), None);
    }
    state.roster = RosterState::default();
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        "config.get" => Some(handle_config_get(state, req)),
        "app.reset" => Some(handle_app_reset(state, req)),
        _ => None,
    }
}
