//! Helpers for relative times, tag lists, host names, and permalinks.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::process::Command;
use url::Url;

/// Parse a stream boundary into unix seconds.
///
/// Accepts a plain unix timestamp, or a relative offset such as `30m`, `2h`, `1day`,
/// `3weeks`, meaning that long before `now`.
pub fn parse_relative_time(s: &str, now: DateTime<Utc>) -> Result<i64, String> {
    let s = s.trim().to_lowercase().replace(' ', "");
    if s.is_empty() {
        return Err("Empty time value".to_string());
    }
    if let Ok(ts) = s.parse::<i64>() {
        return Ok(ts);
    }
    let num_end = s.chars().take_while(|c| c.is_ascii_digit()).count();
    let num: i64 = s[..num_end]
        .parse()
        .map_err(|_| format!("Invalid time: {}", s))?;
    let unit = &s[num_end..];
    let unit_secs: i64 = match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3600,
        "d" | "day" | "days" => 86400,
        "w" | "week" | "weeks" => 7 * 86400,
        _ => return Err(format!("Unknown time unit in: {}", s)),
    };
    num.checked_mul(unit_secs)
        .and_then(|secs| now.timestamp().checked_sub(secs))
        .ok_or_else(|| format!("time out of range: {}", s))
}

/// [`parse_relative_time`] against the current time.
pub fn relative_to_now(s: &str) -> Result<i64, String> {
    parse_relative_time(s, Utc::now())
}

/// Current unix time in seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Split a comma-separated tag list, trimming entries and dropping empties.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Collapse newlines so a message fits on one `key value` output line.
pub fn escape_message(msg: &str) -> String {
    msg.trim_end_matches(['\n', '\r'])
        .replace('\r', "")
        .replace('\n', "\\n")
}

/// Format unix seconds for display. If `use_utc` is false, converts to the local timezone.
pub fn format_timestamp_display(ts: i64, use_utc: bool) -> String {
    let Some(dt) = Utc.timestamp_opt(ts, 0).single() else {
        return ts.to_string();
    };
    if use_utc {
        dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    } else {
        dt.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string()
    }
}

/// Web UI host for an API host: `https://api.example.com` → `https://app.example.com`.
pub fn app_base(api_host: &str) -> Result<String, String> {
    let mut url = Url::parse(api_host).map_err(|e| e.to_string())?;
    let host = url
        .host_str()
        .ok_or_else(|| format!("No host in URL: {}", api_host))?
        .to_string();
    if let Some(rest) = host.strip_prefix("api.") {
        url.set_host(Some(&format!("app.{}", rest)))
            .map_err(|e| e.to_string())?;
    }
    Ok(url.origin().ascii_serialization())
}

/// Permalink to an event (or comment) page in the web UI.
pub fn event_permalink(api_host: &str, event_id: u64) -> String {
    let base = app_base(api_host).unwrap_or_else(|_| api_host.trim_end_matches('/').to_string());
    format!("{}/event/jump_to?event_id={}", base, event_id)
}

/// Host name of this machine: `HOSTNAME` if set, else the `hostname` command.
pub fn local_hostname() -> Option<String> {
    if let Ok(h) = std::env::var("HOSTNAME") {
        let h = h.trim();
        if !h.is_empty() {
            return Some(h.to_string());
        }
    }
    let out = Command::new("hostname")
        .stdin(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
