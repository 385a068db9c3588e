use anyhow::{anyhow, Context};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::state::RosterState;

/// Writes the state blob as pretty JSON. The file is the exchange
/// format: what export writes, import accepts, and the legacy web
/// version produced as `dienstplan_backup.json`.
pub fn export_state(state: &RosterState, out_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create directory {}", parent.to_string_lossy())
            })?;
        }
    }

    let text = serde_json::to_string_pretty(state).context("failed to serialize state")?;
    let mut out = File::create(out_path).with_context(|| {
        format!("failed to create backup file {}", out_path.to_string_lossy())
    })?;
    out.write_all(text.as_bytes())
        .context("failed to write backup file")?;
    Ok(())
}

/// Parses and validates a backup blob. Any failure here must leave the
/// caller's current state untouched, so this never mutates anything:
/// it either returns a complete replacement state or an error.
pub fn import_state(in_path: &Path) -> anyhow::Result<RosterState> {
    let text = std::fs::read_to_string(in_path).with_context(|| {
        format!("failed to read backup file {}", in_path.to_string_lossy())
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("backup is not valid JSON")?;

    // Minimal shape check, same as the legacy importer: a blob without
    // a students list is not a roster backup.
    if !value.get("students").map(|v| v.is_array()).unwrap_or(false) {
        return Err(anyhow!("backup has no students list"));
    }

    serde_json::from_value(value).context("backup does not match the roster state shape")
}
