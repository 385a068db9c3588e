use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

use crate::state::RosterState;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    /// In-memory copy of the persisted record. Mutating handlers write
    /// it back through `db::state_save` before replying.
    pub roster: RosterState,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            workspace: None,
            db: None,
            roster: RosterState::default(),
        }
    }
}
