//! Dashboard definitions as stored in local JSON files.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// A dashboard as written by `pull` and read by `push`.
///
/// Unknown keys returned by the server (`created`, `modified`, `resource`, ...) are kept
/// so that a pulled file matches the server copy exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub graphs: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The fields sent when creating or updating a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardDefinition {
    pub title: String,
    pub description: String,
    pub graphs: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<Vec<Value>>,
}

impl DashboardFile {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        write_value(path, &serde_json::to_value(self)?)
    }

    /// Build from the `dash` object of a server response.
    pub fn from_value(dash: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(dash)?)
    }

    /// Numeric id, accepting both `123` and `"123"`.
    pub fn numeric_id(&self) -> Option<u64> {
        match self.id.as_ref()? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn definition(&self) -> DashboardDefinition {
        DashboardDefinition {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            graphs: self.graphs.clone(),
            template_variables: self.template_variables.clone(),
        }
    }
}

impl DashboardDefinition {
    /// A blank dashboard with one placeholder graph, used by `new_file`.
    pub fn template(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: "created by dogshell".to_string(),
            graphs: vec![serde_json::json!({
                "title": "Average Memory Free",
                "definition": {
                    "events": [],
                    "requests": [{"q": "avg:system.mem.free{*}"}],
                    "viz": "timeseries"
                }
            })],
            template_variables: None,
        }
    }
}

/// Write a server `dash` object verbatim, pretty-printed.
pub fn write_value(path: impl AsRef<Path>, dash: &Value) -> Result<(), Error> {
    let mut text = serde_json::to_string_pretty(dash)?;
    text.push('\n');
    std::fs::write(path.as_ref(), text)?;
    Ok(())
}

/// Parse a graphs list given on stdin: a JSON array of graph objects.
pub fn parse_graphs(text: &str) -> Result<Vec<Value>, Error> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(graphs) => Ok(graphs),
        Value::Object(graph) => Ok(vec![Value::Object(graph)]),
        _ => Err(Error::Other(
            "graphs must be a JSON list of graph definitions".to_string(),
        )),
    }
}
