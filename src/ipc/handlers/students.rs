use serde_json::json;

use crate::config;
use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};

/// Accepts either a `names` array or a free-form `text` blob split on
/// newlines and commas (the legacy setup textarea pasted names both
/// ways). Blank lines and surrounding whitespace are dropped.
fn parse_names(params: &serde_json::Value) -> Option<Vec<String>> {
    if let Some(arr) = params.get("names").and_then(|v| v.as_array()) {
        return Some(
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }
    if let Some(text) = params.get("text").and_then(|v| v.as_str()) {
        return Some(
            text.split(['\n', '\r', ','])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }
    None
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.db.is_none() {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    }
    ok(&req.id, json!({ "students": state.roster.students }))
}

fn handle_students_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(names) = parse_names(&req.params) else {
        return err(&req.id, "bad_params", "missing names or text", None);
    };
    if names.is_empty() {
        // Hard reject: an empty roster would wipe everything for nothing.
        return err(&req.id, "bad_params", "student list is empty", None);
    }

    let confirmed = req
        .params
        .get("confirmed")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if names.len() != config::IDEAL_STUDENT_COUNT && !confirmed {
        return err(
            &req.id,
            "confirm_required",
            format!(
                "{} names found, the rotation works best with {}",
                names.len(),
                config::IDEAL_STUDENT_COUNT
            ),
            Some(json!({
                "count": names.len(),
                "ideal": config::IDEAL_STUDENT_COUNT
            })),
        );
    }

    state.roster.replace_students(names);
    if let Err(e) = db::state_save(conn, &state.roster) {
        return err(&req.id, "db_update_failed", format!("{e:?}"), None);
    }

    ok(
        &req.id,
        json!({ "studentCount": state.roster.students.len() }),
    )
}

fn handle_students_defaults(_state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "names": config::DEFAULT_STUDENTS }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.save" => Some(handle_students_save(state, req)),
        "students.defaults" => Some(handle_students_defaults(state, req)),
        _ => None,
    }
}
