use std::collections::BTreeMap;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::rotation::{self, WeekRoster};
use crate::week;

/// Replacement shown when nobody is left in the pause group. Part of
/// the observable payload, kept verbatim from the legacy plan.
pub const NO_REPLACEMENT: &str = "Lehrer fragen";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
}

/// One sick-log record. Serialized field names are fixed: old backups
/// must keep importing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SickEntry {
    pub name: String,
    pub replacement: String,
    pub date: String,
}

/// The whole persisted aggregate. Field names mirror the legacy JSON
/// blob exactly (`sickLog`, `currentWeekOffset`), and every field
/// defaults so partial backups still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterState {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default, rename = "sickLog")]
    pub sick_log: BTreeMap<String, Vec<SickEntry>>,
    #[serde(default)]
    pub checklist: BTreeMap<String, bool>,
    #[serde(default, rename = "currentWeekOffset")]
    pub current_week_offset: i64,
}

pub enum MarkOutcome {
    Recorded(SickEntry),
    AlreadyRecorded,
}

impl RosterState {
    /// Wholesale roster replacement. Sick log, checklist and the week
    /// pointer belong to the old roster and are reset with it.
    pub fn replace_students(&mut self, names: Vec<String>) {
        self.students = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Student {
                id: i as i64,
                name,
            })
            .collect();
        self.current_week_offset = 0;
        self.sick_log.clear();
        self.checklist.clear();
    }

    pub fn change_week(&mut self, delta: i64) {
        // Unbounded on purpose; the UI disables navigation at the term
        // bounds but the counter itself never clamps. Saturating so an
        // absurd delta pins the counter instead of overflowing.
        self.current_week_offset = self.current_week_offset.saturating_add(delta);
    }

    pub fn jump_to_today(&mut self, today: NaiveDate, start: NaiveDate) {
        self.current_week_offset = week::offset_for_today(today, start);
    }

    pub fn roster_for_week(&self, week_offset: i64) -> WeekRoster {
        rotation::roster_for_week(&self.students, &config::DUTIES, week_offset)
    }

    /// Week key of the week the state currently points at.
    pub fn current_week_id(&self, start: NaiveDate) -> String {
        week::week_id(week::monday_of_week(start, self.current_week_offset))
    }

    /// Records a student as sick for one week. At most one entry per
    /// (week, name); a second call is a no-op and reports it. The
    /// replacement is the first member of that week's pause group -
    /// documented policy, their own availability is not checked.
    pub fn mark_sick(
        &mut self,
        week_id: &str,
        name: &str,
        pause_group: &[Student],
    ) -> MarkOutcome {
        let entries = self.sick_log.entry(week_id.to_string()).or_default();
        if entries.iter().any(|e| e.name == name) {
            return MarkOutcome::AlreadyRecorded;
        }
        let replacement = pause_group
            .first()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| NO_REPLACEMENT.to_string());
        let entry = SickEntry {
            name: name.to_string(),
            replacement,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        entries.push(entry.clone());
        MarkOutcome::Recorded(entry)
    }

    pub fn sick_entry(&self, week_id: &str, name: &str) -> Option<&SickEntry> {
        self.sick_log
            .get(week_id)
            .and_then(|entries| entries.iter().find(|e| e.name == name))
    }

    pub fn sick_entries(&self, week_id: &str) -> &[SickEntry] {
        self.sick_log
            .get(week_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Checklist write. Key layout is `{weekId}-{dutyId}` for one-shot
    /// confirmations and `{weekId}-{dutyId}-{day}` (day 0..4, Mon..Fri)
    /// for daily ones; the caller passes everything after the weekId.
    pub fn toggle_check(&mut self, week_id: &str, task_key: &str, checked: bool) {
        self.checklist.insert(format!("{week_id}-{task_key}"), checked);
    }

    pub fn check_value(&self, key: &str) -> bool {
        self.checklist.get(key).copied().unwrap_or(false)
    }
}
