use chrono::NaiveDate;
use serde::Serialize;

/// A classroom duty. The set is fixed at compile time; the list order
/// decides which duties get pairs first when the roster is short.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Duty {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub rule: &'static str,
    #[serde(rename = "hasCheck")]
    pub has_check: bool,
    #[serde(rename = "dailyCheck")]
    pub daily_check: bool,
}

pub static DUTIES: [Duty; 6] = [
    Duty {
        id: "tafel",
        name: "Tafel",
        icon: "\u{1F9FD}",
        rule: "Nach jeder Stunde & am Ende des Tages wischen.",
        has_check: false,
        daily_check: false,
    },
    Duty {
        id: "fegen",
        name: "Fegen",
        icon: "\u{1F9F9}",
        rule: "Klassenraum am Ende des Tages fegen.",
        has_check: false,
        daily_check: false,
    },
    Duty {
        id: "austeilen",
        name: "Austeilen",
        icon: "\u{1F4C4}",
        rule: "Arbeitsbl\u{e4}tter & Materialien verteilen.",
        has_check: false,
        daily_check: false,
    },
    Duty {
        id: "supervisor",
        name: "Supervisor",
        icon: "\u{1F985}",
        rule: "Kontrolle aller Dienste auf Sauberkeit.",
        has_check: true,
        daily_check: false,
    },
    Duty {
        id: "handy",
        name: "Handy Hotel",
        icon: "\u{1F4F1}",
        rule: "Handys morgens einsammeln & wegschlie\u{df}en.",
        has_check: false,
        daily_check: true,
    },
    Duty {
        id: "muell",
        name: "M\u{fc}ll",
        icon: "\u{1F5D1}\u{FE0F}",
        rule: "M\u{fc}ll trennen & Eimer rausbringen.",
        has_check: false,
        daily_check: false,
    },
];

/// The rotation only divides evenly with 24 students; other counts are
/// allowed after an explicit confirmation.
pub const IDEAL_STUDENT_COUNT: usize = 24;

/// SHA-256 of the admin password. A UI gate, not a security boundary:
/// the daemon runs locally and the hash ships with the binary.
pub const ADMIN_HASH: &str = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

/// Record key inside the workspace database. Kept identical to the key
/// the legacy web version used in localStorage so the intent is obvious
/// when inspecting a workspace by hand.
pub const STATE_KEY: &str = "dienstplanState";

pub const DEFAULT_STUDENTS: [&str; 24] = [
    "Mia M\u{fc}ller",
    "Ben Schmidt",
    "Emma Schneider",
    "Lukas Fischer",
    "Sofia Weber",
    "Leon Meyer",
    "Hannah Wagner",
    "Finn Becker",
    "Anna Schulz",
    "Elias Hoffmann",
    "Emilia Sch\u{e4}fer",
    "Jonas Koch",
    "Lina Bauer",
    "Noah Richter",
    "Marie Klein",
    "Paul Wolf",
    "Lena Schr\u{f6}der",
    "Luis Neumann",
    "Lea Schwarz",
    "Felix Zimmermann",
    "Amelie Braun",
    "Maximilian Kr\u{fc}ger",
    "Clara Hofman",
    "Julian Hartmann",
];

/// First Monday of the term. Week offset 0 maps to this week.
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 12).expect("valid literal date")
}

/// Last day of the term; navigation past it shows the plan as ended.
pub fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 2).expect("valid literal date")
}
