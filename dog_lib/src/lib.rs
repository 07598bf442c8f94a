//! Monitoring API client library behind the `dog` command.
//!
//! Provides credential loading from `~/.dogrc`, a typed client for the v1 REST API
//! (comments, events, metrics, search, tags, dashboards), and reporting of
//! server-side errors and warnings.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod helpers;
pub mod model;
pub mod report;
pub mod response;

pub use client::{Client, DEFAULT_API_HOST, DEFAULT_TIMEOUT_SECS};
pub use config::{default_config_path, Credentials};
pub use dashboard::{DashboardDefinition, DashboardFile};
pub use error::{ApiError, AuthError, ConfigError, Error};
pub use report::{report_errors, report_warnings};
pub use response::ApiResponse;

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
