use chrono::{Datelike, Duration, NaiveDate};

/// Week key of the form `"2026-W3"` (no zero padding), used for the
/// sick log and the checklist. The rule is the ISO-8601 one: shift the
/// date to the Thursday of its Monday-start week, then count weeks from
/// January 1 of the Thursday's year. Persisted backups key on these
/// strings, so the rule must never change.
pub fn week_id(date: NaiveDate) -> String {
    let weekday = i64::from(date.weekday().number_from_monday());
    // The shift is at most three days; checked only so the calendar
    // bounds returned by monday_of_week cannot panic here.
    let thursday = date
        .checked_add_signed(Duration::days(4 - weekday))
        .unwrap_or(date);
    // ordinal() is 1-based, so this is ceil((days_since_jan1 + 1) / 7).
    let week_no = (thursday.ordinal() + 6) / 7;
    format!("{}-W{}", thursday.year(), week_no)
}

/// Monday of the week `week_offset` weeks after the term start. The
/// offset counter is unbounded, so offsets past the representable
/// calendar clamp to its bounds instead of panicking; such weeks show
/// as ended (or before the start) anyway.
pub fn monday_of_week(start: NaiveDate, week_offset: i64) -> NaiveDate {
    week_offset
        .checked_mul(7)
        .and_then(Duration::try_days)
        .and_then(|days| start.checked_add_signed(days))
        .unwrap_or(if week_offset < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Week offset for a calendar date. Days before the term start all map
/// to offset 0 so the first week shows as a preview.
pub fn offset_for_today(today: NaiveDate, start: NaiveDate) -> i64 {
    if today < start {
        0
    } else {
        (today - start).num_days() / 7
    }
}
