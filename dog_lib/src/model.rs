//! Request payloads sent to the API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_event_id: Option<u64>,
}

/// Event priority as understood by the events endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Error,
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<AlertType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_happened: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_event_id: Option<u64>,
}

/// Filter for the event stream.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub start: i64,
    pub end: i64,
    pub priority: Option<Priority>,
    pub sources: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[default]
    Gauge,
    Count,
    Rate,
}

/// One metric point, submitted as a single-point series.
#[derive(Debug, Clone, Serialize)]
pub struct MetricPoint {
    pub metric: String,
    /// `[[timestamp, value]]`
    pub points: Vec<(i64, f64)>,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl MetricPoint {
    pub fn new(metric: impl Into<String>, timestamp: i64, value: f64) -> Self {
        Self {
            metric: metric.into(),
            points: vec![(timestamp, value)],
            metric_type: MetricType::Gauge,
            host: None,
            device: None,
            tags: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Series<'a> {
    pub series: [&'a MetricPoint; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct TagsRequest<'a> {
    pub tags: &'a [String],
}
