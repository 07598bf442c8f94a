//! Drives the compiled `dog` binary.
//!
//! The offline tests always run. The live tests talk to the real API: they are ignored by
//! default and need `DATADOG_API_KEY` and `DATADOG_APP_KEY` (run with `--ignored`).

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;

fn dog() -> Command {
    let mut cmd = Command::cargo_bin("dog").unwrap();
    cmd.env_remove("DATADOG_HOST").env_remove("RUST_LOG");
    cmd
}

fn config_file(text: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(text.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn help_lists_command_groups() {
    dog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("comment"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("--application-key"));
}

#[test]
fn missing_config_file_fails_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("dogrc");
    dog()
        .arg("--config")
        .arg(&missing)
        .args(["comment", "show", "1"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("cannot read config file"));
}

#[test]
fn config_without_connection_section_fails() {
    let f = config_file("[Other]\napikey = a\nappkey = b\n");
    dog()
        .arg("--config")
        .arg(f.path())
        .args(["event", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no section: 'Connection'"));
}

#[test]
fn config_missing_appkey_fails() {
    let f = config_file("[Connection]\napikey = a\n");
    dog()
        .arg("--config")
        .arg(f.path())
        .args(["tag", "show", "somehost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("appkey"));
}

#[test]
fn key_flags_skip_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("dogrc");
    // Nothing listens on the discard port, so the failure must come from the transport.
    dog()
        .arg("--config")
        .arg(&missing)
        .args(["--api-key=a", "--application-key=b"])
        .args(["--api-host", "http://127.0.0.1:9", "--timeout", "2"])
        .args(["event", "show", "1"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("HTTP error"));
}

#[test]
fn invalid_api_host_is_rejected() {
    let f = config_file("[Connection]\napikey = a\nappkey = b\n");
    dog()
        .arg("--config")
        .arg(f.path())
        .args(["--api-host", "not a url", "search", "query", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API host"));
}

#[test]
fn pretty_and_raw_conflict() {
    dog()
        .args(["--pretty", "--raw", "search", "query", "x"])
        .assert()
        .failure()
        .code(2);
}

// Live API tests

struct Live {
    config: NamedTempFile,
}

fn live() -> Option<Live> {
    let api = std::env::var("DATADOG_API_KEY").ok()?;
    let app = std::env::var("DATADOG_APP_KEY").ok()?;
    let config = config_file(&format!("[Connection]\napikey = {}\nappkey = {}\n", api, app));
    Some(Live { config })
}

impl Live {
    /// Run `dog --config <file> args...` and require a clean success.
    fn ok(&self, args: &[&str], stdin: Option<&str>) -> String {
        let out = self.run(args, stdin);
        assert!(
            out.status.success(),
            "dog {:?} failed: {}",
            args,
            String::from_utf8_lossy(&out.stderr)
        );
        assert!(out.stderr.is_empty(), "{}", String::from_utf8_lossy(&out.stderr));
        String::from_utf8(out.stdout).unwrap()
    }

    fn run(&self, args: &[&str], stdin: Option<&str>) -> std::process::Output {
        let mut cmd = dog();
        cmd.arg("--config").arg(self.config.path()).args(args);
        if let Some(s) = stdin {
            cmd.write_stdin(s.to_string());
        }
        cmd.output().unwrap()
    }
}

fn unique() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{:x}{:x}", nanos, std::process::id())
}

fn parse_response(out: &str) -> HashMap<String, String> {
    let mut data = HashMap::new();
    for line in out.lines() {
        let mut parts = line.split_whitespace();
        if let Some(key) = parts.next() {
            data.insert(key.to_string(), parts.collect::<Vec<_>>().join(" "));
        }
    }
    data
}

fn permalink_id(out: &str) -> Option<String> {
    let marker = "/event/jump_to?event_id=";
    let start = out.rfind(marker)? + marker.len();
    let id: String = out[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    (!id.is_empty()).then_some(id)
}

#[test]
#[ignore = "needs DATADOG_API_KEY and DATADOG_APP_KEY"]
fn live_comment_lifecycle() {
    let live = live().expect("DATADOG_API_KEY and DATADOG_APP_KEY must be set");

    let post = parse_response(&live.ok(&["comment", "post"], Some("yo dudes")));
    assert!(post.contains_key("url"), "{:?}", post);
    assert!(post["message"].contains("yo dudes"));
    let id = post["id"].clone();

    let show = parse_response(&live.ok(&["comment", "show", &id], None));
    assert!(show["message"].contains("yo dudes"));

    let update = parse_response(&live.ok(&["comment", "update", &id], Some("nothing much")));
    assert_eq!(update["id"], id);
    assert!(update["message"].contains("nothing much"));

    assert_eq!(live.ok(&["comment", "delete", &id], None), "");

    let gone = live.run(&["comment", "show", &id], None);
    assert_eq!(gone.status.code(), Some(1));
    assert!(gone.stdout.is_empty());
}

#[test]
#[ignore = "needs DATADOG_API_KEY and DATADOG_APP_KEY"]
fn live_event_post_show_stream() {
    let live = live().expect("DATADOG_API_KEY and DATADOG_APP_KEY must be set");
    let tags = "tag:a,tag:b";

    let out = live.ok(
        &["event", "post", " Testing events from dogshell", "--tags", tags],
        Some("%%%\n*Cool!*\n%%%\n"),
    );
    let id = permalink_id(&out).expect("permalink in output");

    std::thread::sleep(Duration::from_secs(2));
    let out = live.ok(&["event", "show", &id], None);
    assert_eq!(permalink_id(&out).as_deref(), Some(id.as_str()));

    let out = live.ok(&["event", "stream", "30m", "--tags", tags], None);
    assert!(out.lines().any(|l| permalink_id(l).as_deref() == Some(id.as_str())));
}

#[test]
#[ignore = "needs DATADOG_API_KEY and DATADOG_APP_KEY"]
fn live_metric_search_and_tags() {
    let live = live().expect("DATADOG_API_KEY and DATADOG_APP_KEY must be set");
    let u = unique();
    let metric = format!("test_metric_{}", u);
    let host = format!("test_host_{}", u);

    live.ok(&["metric", "post", "--host", &host, &metric, "1"], None);
    std::thread::sleep(Duration::from_secs(1));

    let out = live.ok(&["search", "query", &format!("hosts:{}", host)], None);
    assert!(out.contains(&host), "{}", out);

    live.ok(&["tag", "add", &host, "t0", "t1"], None);
    let out = live.ok(&["tag", "show", &host], None);
    assert!(out.contains("t0") && out.contains("t1"), "{}", out);

    live.ok(&["tag", "replace", &host, "t2", "t3"], None);
    let out = live.ok(&["tag", "show", &host], None);
    assert!(out.contains("t2") && out.contains("t3"), "{}", out);
    assert!(!out.contains("t0") && !out.contains("t1"), "{}", out);

    live.ok(&["tag", "detach", &host], None);
    assert_eq!(live.ok(&["tag", "show", &host], None), "");
}

#[test]
#[ignore = "needs DATADOG_API_KEY and DATADOG_APP_KEY"]
fn live_dashboard_lifecycle() {
    let live = live().expect("DATADOG_API_KEY and DATADOG_APP_KEY must be set");
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("dash.json");
    let file_s = file.to_str().unwrap();

    live.ok(&["dashboard", "new_file", file_s], None);
    let mut dash: Value = serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    let id = dash["id"].to_string();
    assert!(dash.get("title").is_some());

    dash["title"] = Value::String(format!("dash title {}", unique()));
    std::fs::write(&file, dash.to_string()).unwrap();
    live.ok(&["dashboard", "push", file_s], None);

    let shown: Value = serde_json::from_str(&live.ok(&["dashboard", "show", &id], None)).unwrap();
    assert_eq!(shown["dash"]["id"], dash["id"]);
    assert_eq!(shown["dash"]["title"], dash["title"]);

    let graphs = r#"[{"title": "blerg", "definition": {"requests": [{"q": "avg:system.load.15{web,env:prod}"}]}}]"#;
    live.ok(&["dashboard", "update", &id, "new_title", "new_desc"], Some(graphs));
    let shown: Value = serde_json::from_str(&live.ok(&["dashboard", "show", &id], None)).unwrap();
    assert_eq!(shown["dash"]["title"], "new_title");
    assert_eq!(shown["dash"]["description"], "new_desc");
    assert_eq!(shown["dash"]["graphs"], serde_json::from_str::<Value>(graphs).unwrap());

    let pulled = dir.path().join("pulled.json");
    live.ok(&["dashboard", "pull", &id, pulled.to_str().unwrap()], None);
    let pulled: Value = serde_json::from_str(&std::fs::read_to_string(&pulled).unwrap()).unwrap();
    assert_eq!(pulled, shown["dash"]);

    live.ok(&["dashboard", "delete", &id], None);
    let gone = live.run(&["dashboard", "show", &id], None);
    assert!(!gone.status.success());
}
