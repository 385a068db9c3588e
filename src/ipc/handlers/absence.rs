use serde_json::json;

use crate::config;
use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::state::MarkOutcome;

struct HandlerErr {
    code: &'static str,
    message: String,
    details: Option<serde_json::Value>,
}

impl HandlerErr {
    fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

fn absence_mark(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = params
        .get("studentId")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| HandlerErr {
            code: "bad_params",
            message: "missing studentId".to_string(),
            details: None,
        })?;

    // The ledger stores names for backup compatibility; the selector
    // works on ids so same-named students cannot be confused here.
    let name = state
        .roster
        .students
        .iter()
        .find(|s| s.id == student_id)
        .map(|s| s.name.clone())
        .ok_or_else(|| HandlerErr {
            code: "not_found",
            message: "student not found".to_string(),
            details: Some(json!({ "studentId": student_id })),
        })?;

    let week_offset = state.roster.current_week_offset;
    let week_id = state.roster.current_week_id(config::start_date());
    let pause_group = state.roster.roster_for_week(week_offset).pause_group;

    match state.roster.mark_sick(&week_id, &name, &pause_group) {
        MarkOutcome::Recorded(entry) => Ok(json!({
            "weekId": week_id,
            "entry": entry
        })),
        MarkOutcome::AlreadyRecorded => Err(HandlerErr {
            code: "already_recorded",
            message: format!("{name} is already marked sick for {week_id}"),
            details: None,
        }),
    }
}

fn absence_list(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let week_id = match params.get("weekId").and_then(|v| v.as_str()) {
        Some(s) => s.to_string(),
        None => state.roster.current_week_id(config::start_date()),
    };
    Ok(json!({
        "weekId": week_id,
        "entries": state.roster.sick_entries(&week_id)
    }))
}

fn handle_absence_mark(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.db.is_none() {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    }
    let result = match absence_mark(state, &req.params) {
        Ok(result) => result,
        Err(error) => return error.response(&req.id),
    };
    // Marking mutated the ledger; write through before replying.
    if let Some(conn) = state.db.as_ref() {
        if let Err(e) = db::state_save(conn, &state.roster) {
            return err(&req.id, "db_update_failed", format!("{e:?}"), None);
        }
    }
    ok(&req.id, result)
}

fn handle_absence_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.db.is_none() {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    }
    match absence_list(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "absence.mark" => Some(handle_absence_mark(state, req)),
        "absence.list" => Some(handle_absence_list(state, req)),
        _ => None,
    }
}
