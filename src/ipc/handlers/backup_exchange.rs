use serde_json::json;
use std::path::PathBuf;

use crate::backup;
use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};

fn required_path(params: &serde_json::Value) -> Option<PathBuf> {
    params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

fn handle_backup_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.db.is_none() {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    }
    let Some(path) = required_path(&req.params) else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };
    match backup::export_state(&state.roster, &path) {
        Ok(()) => ok(
            &req.id,
            json!({
                "path": path.to_string_lossy(),
                "studentCount": state.roster.students.len()
            }),
        ),
        Err(e) => err(&req.id, "export_failed", format!("{e:#}"), None),
    }
}

fn handle_backup_import(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(path) = required_path(&req.params) else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    // import_state validates before anything is replaced; a bad blob
    // leaves both the in-memory state and the workspace record intact.
    let imported = match backup::import_state(&path) {
        Ok(state) => state,
        Err(e) => return err(&req.id, "import_failed", format!("{e:#}"), None),
    };
    if let Err(e) = db::state_save(conn, &imported) {
        return err(&req.id, "db_update_failed", format!("{e:?}"), None);
    }
    state.roster = imported;

    ok(
        &req.id,
        json!({
            "studentCount": state.roster.students.len(),
            "weekOffset": state.roster.current_week_offset
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "backup.export" => Some(handle_backup_export(state, req)),
        "backup.import" => Some(handle_backup_import(state, req)),
        _ => None,
    }
}
