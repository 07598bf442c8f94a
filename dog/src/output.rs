//! Output formatting: line-oriented plain text, human-readable pretty text, and raw JSON.

use dog_lib::helpers::{escape_message, format_timestamp_display};
use serde_json::Value;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `key<TAB>value` lines, easy to split on whitespace
    #[default]
    Plain,
    /// Indented, human-readable
    Pretty,
    /// Compact JSON of the response body
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "normal" | "p" => Ok(OutputFormat::Plain),
            "pretty" => Ok(OutputFormat::Pretty),
            "raw" | "json" | "r" => Ok(OutputFormat::Raw),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Integer id that may arrive as a number or a numeric string.
pub fn value_id(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn field_str(obj: &Value, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn push_line(out: &mut String, key: &str, val: &str) {
    let _ = writeln!(out, "{}\t{}", key, val);
}

/// Comment as `id`, `url`, `resource`, `message` lines.
///
/// Accepts either a comment object or an event object (comments are read back as events).
pub fn format_comment(comment: &Value, permalink: impl Fn(u64) -> String) -> String {
    let mut out = String::new();
    let id = comment.get("id").and_then(value_id);
    if let Some(id) = id {
        push_line(&mut out, "id", &id.to_string());
    }
    let url = field_str(comment, "url").or_else(|| id.map(&permalink));
    if let Some(url) = url {
        push_line(&mut out, "url", &url);
    }
    let resource =
        field_str(comment, "resource").or_else(|| id.map(|id| format!("/api/v1/comments/{}", id)));
    if let Some(resource) = resource {
        push_line(&mut out, "resource", &resource);
    }
    let message = field_str(comment, "message").or_else(|| field_str(comment, "text"));
    push_line(&mut out, "message", &escape_message(&message.unwrap_or_default()));
    out
}

/// Event detail lines. The `url` line is always the web permalink.
pub fn format_event(event: &Value, permalink: impl Fn(u64) -> String, use_utc: bool) -> String {
    let mut out = String::new();
    if let Some(id) = event.get("id").and_then(value_id) {
        push_line(&mut out, "id", &id.to_string());
        push_line(&mut out, "url", &permalink(id));
    }
    if let Some(title) = field_str(event, "title") {
        push_line(&mut out, "title", &escape_message(&title));
    }
    if let Some(ts) = event.get("date_happened").and_then(Value::as_i64) {
        push_line(&mut out, "date", &format_timestamp_display(ts, use_utc));
    }
    if let Some(host) = field_str(event, "host") {
        push_line(&mut out, "host", &host);
    }
    let tags = string_list(event.get("tags"));
    if !tags.is_empty() {
        push_line(&mut out, "tags", &tags.join(","));
    }
    if let Some(text) = field_str(event, "text") {
        push_line(&mut out, "text", &escape_message(&text));
    }
    out
}

/// One line per event: permalink, date, title.
pub fn format_event_stream(events: &[Value], permalink: impl Fn(u64) -> String, use_utc: bool) -> String {
    let mut out = String::new();
    for event in events {
        let Some(id) = event.get("id").and_then(value_id) else {
            continue;
        };
        let date = event
            .get("date_happened")
            .and_then(Value::as_i64)
            .map(|ts| format_timestamp_display(ts, use_utc))
            .unwrap_or_else(|| "-".to_string());
        let title = field_str(event, "title").unwrap_or_default();
        let _ = writeln!(out, "{}\t{}\t{}", permalink(id), date, escape_message(&title));
    }
    out
}

/// Search results as `<facet>\t<item>` lines.
pub fn format_search(results: &Value) -> String {
    let mut out = String::new();
    if let Some(map) = results.as_object() {
        for (facet, items) in map {
            for item in string_list(Some(items)) {
                push_line(&mut out, facet, &item);
            }
        }
    }
    out
}

/// One tag per line; empty when there are none.
pub fn format_tag_list(tags: &Value) -> String {
    let mut out = String::new();
    for tag in string_list(Some(tags)) {
        let _ = writeln!(out, "{}", tag);
    }
    out
}

/// `<tag>\t<host> <host>...` for the all-hosts tag map.
pub fn format_tag_map(tags: &Value) -> String {
    let mut out = String::new();
    if let Some(map) = tags.as_object() {
        for (tag, hosts) in map {
            push_line(&mut out, tag, &string_list(Some(hosts)).join(" "));
        }
    }
    out
}

fn string_list(v: Option<&Value>) -> Vec<String> {
    v.and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Human-readable nested `key: value` rendering.
pub fn format_pretty(value: &Value) -> String {
    let mut out = String::new();
    format_pretty_impl(value, &mut out, 0);
    out
}

fn format_pretty_impl(v: &Value, out: &mut String, indent: usize) {
    let pad = "  ".repeat(indent);
    match v {
        Value::Array(arr) if arr.is_empty() => {
            let _ = writeln!(out, "{}<empty>", pad);
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                if item.is_object() || item.is_array() {
                    let _ = writeln!(out, "{}[{}]", pad, i + 1);
                    format_pretty_impl(item, out, indent + 1);
                } else {
                    let _ = writeln!(out, "{}- {}", pad, scalar(item));
                }
            }
        }
        Value::Object(map) => {
            for (k, val) in map {
                if val.is_object() || val.is_array() {
                    let _ = writeln!(out, "{}{}:", pad, k);
                    format_pretty_impl(val, out, indent + 1);
                } else {
                    let _ = writeln!(out, "{}{}: {}", pad, k, scalar(val));
                }
            }
        }
        other => {
            let _ = writeln!(out, "{}{}", pad, scalar(other));
        }
    }
}

fn scalar(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON (pretty).
pub fn format_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// JSON (compact). Use for machine output.
pub fn format_json_compact(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn link(id: u64) -> String {
        format!("https://app.example.com/event/jump_to?event_id={}", id)
    }

    /// Same whitespace-split parsing a shell script would do.
    fn parse_lines(out: &str) -> std::collections::HashMap<String, String> {
        out.lines()
            .filter_map(|l| {
                let mut parts = l.split_whitespace();
                let key = parts.next()?;
                Some((key.to_string(), parts.collect::<Vec<_>>().join(" ")))
            })
            .collect()
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!("Pretty".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!("RAW".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn comment_fields_are_parseable() {
        let c = json!({"id": 12, "message": "yo dudes", "handle": "me"});
        let out = format_comment(&c, link);
        let data = parse_lines(&out);
        assert_eq!(data["id"], "12");
        assert_eq!(data["url"], link(12));
        assert_eq!(data["resource"], "/api/v1/comments/12");
        assert_eq!(data["message"], "yo dudes");
    }

    #[test]
    fn comment_read_back_as_event_uses_text() {
        let e = json!({"id": "12", "text": "nothing much\n", "url": "/event/event?id=12"});
        let data = parse_lines(&format_comment(&e, link));
        assert_eq!(data["message"], "nothing much");
        assert_eq!(data["url"], "/event/event?id=12");
    }

    #[test]
    fn event_contains_permalink() {
        let e = json!({"id": 99, "title": "deploy", "date_happened": 0, "tags": ["tag:a", "tag:b"]});
        let out = format_event(&e, link, true);
        assert!(out.contains("/event/jump_to?event_id=99\n"));
        assert!(out.contains("tags\ttag:a,tag:b"));
        assert!(out.contains("date\t1970-01-01 00:00:00 UTC"));
    }

    #[test]
    fn stream_one_line_per_event() {
        let events = vec![json!({"id": 1, "title": "a"}), json!({"title": "no id"}), json!({"id": 2, "title": "b"})];
        let out = format_event_stream(&events, link, true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(&link(1)));
        assert!(lines[1].ends_with("\tb"));
    }

    #[test]
    fn search_facets() {
        let r = json!({"hosts": ["h1", "h2"], "metrics": ["m1"]});
        assert_eq!(format_search(&r), "hosts\th1\nhosts\th2\nmetrics\tm1\n");
    }

    #[test]
    fn tag_list_empty_prints_nothing() {
        assert_eq!(format_tag_list(&json!([])), "");
        assert_eq!(format_tag_list(&Value::Null), "");
        assert_eq!(format_tag_list(&json!(["t0", "t1"])), "t0\nt1\n");
    }

    #[test]
    fn tag_map_lists_hosts() {
        let m = json!({"role:web": ["h1", "h2"]});
        assert_eq!(format_tag_map(&m), "role:web\th1 h2\n");
    }

    #[test]
    fn pretty_nested_object() {
        let v = json!({"dash": {"id": 1, "graphs": []}, "ok": true});
        let out = format_pretty(&v);
        assert!(out.contains("dash:\n"));
        assert!(out.contains("  id: 1\n"));
        assert!(out.contains("<empty>"));
        assert!(out.contains("ok: true"));
    }

    #[test]
    fn value_id_accepts_strings() {
        assert_eq!(value_id(&json!(5)), Some(5));
        assert_eq!(value_id(&json!("5")), Some(5));
        assert_eq!(value_id(&json!(null)), None);
    }

    #[test]
    fn format_json_roundtrip() {
        let v = json!({"x": 1, "y": [2, 3]});
        let parsed: Value = serde_json::from_str(&format_json(&v).unwrap()).unwrap();
        assert_eq!(parsed, v);
        assert_eq!(format_json_compact(&v).unwrap(), r#"{"x":1,"y":[2,3]}"#);
    }
}
