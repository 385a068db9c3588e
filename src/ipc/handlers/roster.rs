use chrono::{Duration, Local, NaiveDate};
use serde_json::json;

use crate::config;
use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::state::{RosterState, Student};
use crate::week;

fn student_view(roster: &RosterState, week_id: &str, student: &Student) -> serde_json::Value {
    let mut v = json!({ "id": student.id, "name": student.name });
    if let Some(entry) = roster.sick_entry(week_id, &student.name) {
        v["sick"] = json!({
            "replacement": entry.replacement,
            "date": entry.date
        });
    }
    v
}

/// Plain-data view of one week: everything the display layer renders,
/// nothing it computes. Pure with respect to `roster`.
pub fn week_view(roster: &RosterState, week_offset: i64) -> serde_json::Value {
    let start = config::start_date();
    let end = config::end_date();
    let monday = week::monday_of_week(start, week_offset);
    // Monday may already sit at the calendar bound for absurd offsets.
    let friday = monday
        .checked_add_signed(Duration::days(4))
        .unwrap_or(monday);
    let week_id = week::week_id(monday);

    let computed = roster.roster_for_week(week_offset);

    let assignments: Vec<serde_json::Value> = computed
        .assignments
        .iter()
        .map(|assign| {
            let mut v = json!({
                "duty": assign.duty,
                "pair": [
                    student_view(roster, &week_id, &assign.pair[0]),
                    student_view(roster, &week_id, &assign.pair[1]),
                ]
            });
            if assign.duty.has_check {
                let key = format!("{week_id}-{}", assign.duty.id);
                v["checked"] = json!(roster.check_value(&key));
            }
            if assign.duty.daily_check {
                let days: Vec<bool> = (0..5)
                    .map(|d| roster.check_value(&format!("{week_id}-{}-{d}", assign.duty.id)))
                    .collect();
                v["dailyChecked"] = json!(days);
            }
            v
        })
        .collect();

    let pause_group: Vec<serde_json::Value> = computed
        .pause_group
        .iter()
        .map(|s| student_view(roster, &week_id, s))
        .collect();

    json!({
        "weekOffset": week_offset,
        "weekId": week_id,
        "monday": monday.to_string(),
        "friday": friday.to_string(),
        "prevDisabled": monday <= start,
        "nextDisabled": friday >= end,
        "ended": monday > end,
        "assignments": assignments,
        "pauseGroup": pause_group
    })
}

fn handle_roster_week(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.db.is_none() {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    }
    let week_offset = match req.params.get("weekOffset") {
        None | Some(serde_json::Value::Null) => state.roster.current_week_offset,
        Some(v) => match v.as_i64() {
            Some(n) => n,
            None => return err(&req.id, "bad_params", "weekOffset must be an integer", None),
        },
    };
    ok(&req.id, week_view(&state.roster, week_offset))
}

fn handle_roster_change_week(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(delta) = req.params.get("delta").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing delta", None);
    };
    state.roster.change_week(delta);
    if let Err(e) = db::state_save(conn, &state.roster) {
        return err(&req.id, "db_update_failed", format!("{e:?}"), None);
    }
    ok(&req.id, week_view(&state.roster, state.roster.current_week_offset))
}

fn handle_roster_jump_to_today(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    // The today parameter exists for deterministic tests; the UI never
    // sends it.
    let today = match req.params.get("today").and_then(|v| v.as_str()) {
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => return err(&req.id, "bad_params", "today must be YYYY-MM-DD", None),
        },
        None => Local::now().date_naive(),
    };
    state.roster.jump_to_today(today, config::start_date());
    if let Err(e) = db::state_save(conn, &state.roster) {
        return err(&req.id, "db_update_failed", format!("{e:?}"), None);
    }
    ok(&req.id, week_view(&state.roster, state.roster.current_week_offset))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "roster.week" => Some(handle_roster_week(state, req)),
        "roster.changeWeek" => Some(handle_roster_change_week(state, req)),
        "roster.jumpToToday" => Some(handle_roster_jump_to_today(state, req)),
        _ => None,
    }
}
