use anyhow::Context;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::config;
use crate::state::RosterState;

/// Opens (or creates) the workspace database. The store is a single
/// key-value table holding one JSON record; sqlite buys us atomic
/// write-through without inventing a file format.
pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("roster.sqlite3");
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;

    Ok(conn)
}

/// Loads the persisted state record; a fresh workspace starts empty.
pub fn state_load(conn: &Connection) -> anyhow::Result<RosterState> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?",
            [config::STATE_KEY],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(text) => serde_json::from_str(&text).context("persisted state is invalid JSON"),
        None => Ok(RosterState::default()),
    }
}

/// Writes the whole state record. Called synchronously after every
/// mutating operation.
pub fn state_save(conn: &Connection, state: &RosterState) -> anyhow::Result<()> {
    let text = serde_json::to_string(state).context("failed to serialize state")?;
    conn.execute(
        "INSERT INTO app_state(key, value) VALUES(?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (config::STATE_KEY, &text),
    )?;
    Ok(())
}

pub fn state_clear(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "DELETE FROM app_state WHERE key = ?",
        [config::STATE_KEY],
    )?;
    Ok(())
}
