pub mod absence;
pub mod admin;
pub mod backup_exchange;
pub mod checklist;
pub mod core;
pub mod roster;
pub mod students;
