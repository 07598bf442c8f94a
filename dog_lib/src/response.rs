//! Decoded API responses with server-reported errors and warnings split out.

use serde_json::Value;

/// A response body plus the `error(s)` / `warning(s)` messages it carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub body: Value,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ApiResponse {
    /// Decode a JSON body. Never fails: unexpected shapes yield empty message lists.
    ///
    /// Errors are read from both `error` and `errors`, warnings from both `warning` and
    /// `warnings`. Each key may hold a list of strings or a single string.
    pub fn from_value(body: Value) -> Self {
        let errors = messages(&body, &["error", "errors"]);
        let warnings = messages(&body, &["warning", "warnings"]);
        Self {
            body,
            errors,
            warnings,
        }
    }

    /// Decode raw response text; an empty or non-JSON body becomes `Value::Null`.
    pub fn from_text(text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or(Value::Null)
        };
        Self::from_value(body)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Field of the body, e.g. `"event"` for `{"event": {...}}`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }
}

fn messages(body: &Value, keys: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for key in keys {
        match body.get(key) {
            Some(Value::Array(items)) => {
                out.extend(items.iter().filter_map(|v| v.as_str().map(String::from)))
            }
            Some(Value::String(s)) => out.push(s.clone()),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_body_has_no_messages() {
        let r = ApiResponse::from_value(json!({"event": {"id": 1}}));
        assert!(r.errors.is_empty());
        assert!(r.warnings.is_empty());
        assert_eq!(r.get("event").unwrap()["id"], 1);
    }

    #[test]
    fn errors_and_warnings_keep_server_order() {
        let r = ApiResponse::from_value(json!({
            "errors": ["first", "second"],
            "warning": ["careful"]
        }));
        assert_eq!(r.errors, vec!["first", "second"]);
        assert_eq!(r.warnings, vec!["careful"]);
        assert!(r.has_errors());
    }

    #[test]
    fn single_string_and_junk_entries() {
        let r = ApiResponse::from_value(json!({"error": "one", "warnings": [1, "two", null]}));
        assert_eq!(r.errors, vec!["one"]);
        assert_eq!(r.warnings, vec!["two"]);
    }

    #[test]
    fn non_json_text_is_null() {
        let r = ApiResponse::from_text("<html>oops</html>");
        assert_eq!(r.body, Value::Null);
        assert!(!r.has_errors());
        assert_eq!(ApiResponse::from_text("").body, Value::Null);
    }
}
