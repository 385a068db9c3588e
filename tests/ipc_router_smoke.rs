use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_rosterd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rosterd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn health_router_and_reset_flow() {
    let workspace = temp_dir("rosterd-smoke");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert!(health.get("version").and_then(|v| v.as_str()).is_some());
    assert!(health.get("workspacePath").map(|v| v.is_null()).unwrap_or(false));

    // State-touching methods refuse to run without a workspace.
    let guarded = request(&mut stdin, &mut reader, "2", "roster.week", json!({}));
    assert_eq!(guarded.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        guarded.pointer("/error/code").and_then(|v| v.as_str()),
        Some("no_workspace")
    );

    let unknown = request(&mut stdin, &mut reader, "3", "seating.assign", json!({}));
    assert_eq!(
        unknown.pointer("/error/code").and_then(|v| v.as_str()),
        Some("not_implemented")
    );

    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(selected.get("needsSetup").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(selected.get("studentCount").and_then(|v| v.as_u64()), Some(0));

    let config = request_ok(&mut stdin, &mut reader, "5", "config.get", json!({}));
    assert_eq!(
        config.get("startDate").and_then(|v| v.as_str()),
        Some("2026-01-12")
    );
    assert_eq!(
        config.get("endDate").and_then(|v| v.as_str()),
        Some("2026-07-02")
    );
    assert_eq!(
        config
            .get("duties")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(6)
    );
    assert_eq!(
        config.pointer("/duties/0/id").and_then(|v| v.as_str()),
        Some("tafel")
    );
    assert_eq!(
        config
            .pointer("/duties/3/hasCheck")
            .and_then(|v| v.as_bool()),
        Some(true)
    );
    assert_eq!(
        config
            .pointer("/duties/4/dailyCheck")
            .and_then(|v| v.as_bool()),
        Some(true)
    );
    assert_eq!(
        config.get("idealStudentCount").and_then(|v| v.as_u64()),
        Some(24)
    );

    let defaults = request_ok(&mut stdin, &mut reader, "6", "students.defaults", json!({}));
    let names = defaults
        .get("names")
        .and_then(|v| v.as_array())
        .expect("default names");
    assert_eq!(names.len(), 24);

    let saved = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "students.save",
        json!({ "names": names }),
    );
    assert_eq!(saved.get("studentCount").and_then(|v| v.as_u64()), Some(24));

    let reset = request_ok(&mut stdin, &mut reader, "8", "app.reset", json!({}));
    assert_eq!(reset.get("ok").and_then(|v| v.as_bool()), Some(true));

    let listed = request_ok(&mut stdin, &mut reader, "9", "students.list", json!({}));
    assert_eq!(
        listed
            .get("students")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(0)
    );

    // And a fresh process sees the wiped workspace too.
    let (_child2, mut stdin2, mut reader2) = spawn_sidecar();
    let reselected = request_ok(
        &mut stdin2,
        &mut reader2,
        "10",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(
        reselected.get("needsSetup").and_then(|v| v.as_bool()),
        Some(true)
    );
}

#[test]
fn malformed_input_gets_a_parseable_error_reply() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    // Not an envelope at all. The parse error message quotes the input,
    // so the reply must escape it to stay valid JSON.
    writeln!(stdin, "\"hello\"").expect("write raw line");
    stdin.flush().expect("flush raw line");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read error reply");
    let value: serde_json::Value =
        serde_json::from_str(line.trim()).expect("error reply parses as json");
    assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        value.pointer("/error/code").and_then(|v| v.as_str()),
        Some("bad_json")
    );
    assert!(value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .is_some());

    // The loop keeps serving after the bad line.
    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert!(health.get("version").and_then(|v| v.as_str()).is_some());
}
