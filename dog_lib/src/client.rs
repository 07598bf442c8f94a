//! HTTP client for the monitoring REST API (v1).

use crate::config::Credentials;
use crate::dashboard::DashboardDefinition;
use crate::error::{ApiError, AuthError, Error};
use crate::helpers::event_permalink;
use crate::model::{CommentRequest, EventQuery, MetricPoint, NewEvent, Series, TagsRequest};
use crate::response::ApiResponse;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client as HttpClient, Method};
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_API_HOST: &str = "https://api.datadoghq.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// API client bound to one key pair and one API host.
#[derive(Clone)]
pub struct Client {
    api_host: String,
    http: HttpClient,
}

impl Client {
    /// Create a client for `api_host` with a per-request timeout.
    pub fn with_options(
        creds: &Credentials,
        api_host: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let api_host = api_host.trim_end_matches('/').to_string();
        url::Url::parse(&api_host)
            .map_err(|e| Error::Other(format!("Invalid API host '{}': {}", api_host, e)))?;
        let mut headers = HeaderMap::new();
        headers.insert("DD-API-KEY", secret_header(&creds.apikey, "apikey")?);
        headers.insert("DD-APPLICATION-KEY", secret_header(&creds.appkey, "appkey")?);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("dogshell/{}", crate::VERSION))
                .map_err(|e| Error::Other(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = HttpClient::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { api_host, http })
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// Web UI link for an event or comment id.
    pub fn permalink(&self, event_id: u64) -> String {
        event_permalink(&self.api_host, event_id)
    }

    // Comments

    pub async fn post_comment(&self, comment: &CommentRequest) -> Result<ApiResponse, Error> {
        self.request(Method::POST, "/comments", Some(comment)).await
    }

    pub async fn update_comment(
        &self,
        comment_id: u64,
        comment: &CommentRequest,
    ) -> Result<ApiResponse, Error> {
        let path = format!("/comments/{}", comment_id);
        self.request(Method::PUT, &path, Some(comment)).await
    }

    pub async fn delete_comment(&self, comment_id: u64) -> Result<ApiResponse, Error> {
        let path = format!("/comments/{}", comment_id);
        self.request::<()>(Method::DELETE, &path, None).await
    }

    // Events

    /// Fetch one event. Comments are events too, so this also serves `comment show`.
    pub async fn get_event(&self, event_id: u64) -> Result<ApiResponse, Error> {
        let path = format!("/events/{}", event_id);
        self.request::<()>(Method::GET, &path, None).await
    }

    pub async fn post_event(&self, event: &NewEvent) -> Result<ApiResponse, Error> {
        self.request(Method::POST, "/events", Some(event)).await
    }

    pub async fn stream_events(&self, query: &EventQuery) -> Result<ApiResponse, Error> {
        let path = format!("/events?{}", event_query_string(query));
        self.request::<()>(Method::GET, &path, None).await
    }

    // Metrics

    pub async fn submit_metric(&self, point: &MetricPoint) -> Result<ApiResponse, Error> {
        let body = Series { series: [point] };
        self.request(Method::POST, "/series", Some(&body)).await
    }

    // Search

    pub async fn search(&self, query: &str) -> Result<ApiResponse, Error> {
        let path = format!("/search?q={}", urlencoding::encode(query));
        self.request::<()>(Method::GET, &path, None).await
    }

    // Tags

    pub async fn host_tags(&self, host: &str) -> Result<ApiResponse, Error> {
        self.request::<()>(Method::GET, &host_tags_path(host), None)
            .await
    }

    pub async fn all_tags(&self) -> Result<ApiResponse, Error> {
        self.request::<()>(Method::GET, "/tags/hosts", None).await
    }

    pub async fn add_tags(&self, host: &str, tags: &[String]) -> Result<ApiResponse, Error> {
        let body = TagsRequest { tags };
        self.request(Method::POST, &host_tags_path(host), Some(&body))
            .await
    }

    pub async fn replace_tags(&self, host: &str, tags: &[String]) -> Result<ApiResponse, Error> {
        let body = TagsRequest { tags };
        self.request(Method::PUT, &host_tags_path(host), Some(&body))
            .await
    }

    pub async fn detach_tags(&self, host: &str) -> Result<ApiResponse, Error> {
        self.request::<()>(Method::DELETE, &host_tags_path(host), None)
            .await
    }

    // Dashboards

    pub async fn list_dashboards(&self) -> Result<ApiResponse, Error> {
        self.request::<()>(Method::GET, "/dash", None).await
    }

    pub async fn get_dashboard(&self, dash_id: u64) -> Result<ApiResponse, Error> {
        let path = format!("/dash/{}", dash_id);
        self.request::<()>(Method::GET, &path, None).await
    }

    pub async fn create_dashboard(&self, dash: &DashboardDefinition) -> Result<ApiResponse, Error> {
        self.request(Method::POST, "/dash", Some(dash)).await
    }

    pub async fn update_dashboard(
        &self,
        dash_id: u64,
        dash: &DashboardDefinition,
    ) -> Result<ApiResponse, Error> {
        let path = format!("/dash/{}", dash_id);
        self.request(Method::PUT, &path, Some(dash)).await
    }

    pub async fn delete_dashboard(&self, dash_id: u64) -> Result<ApiResponse, Error> {
        let path = format!("/dash/{}", dash_id);
        self.request::<()>(Method::DELETE, &path, None).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.api_host, path)
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse, Error> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "sending request");
        let mut req = self.http.request(method, &url);
        if let Some(b) = body {
            req = req.json(b);
        }
        self.send(req).await
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<ApiResponse, Error> {
        let res = req.send().await?;
        let status = res.status();
        let body = res.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");
        let data = ApiResponse::from_text(&body);
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let message = data.errors.first().cloned().unwrap_or_else(|| {
                "Authentication failed. Check your API and application keys.".to_string()
            });
            return Err(Error::Auth(AuthError { message }));
        }
        if !status.is_success() {
            let message = if data.errors.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("API request failed")
                    .to_string()
            } else {
                data.errors.join("; ")
            };
            return Err(Error::Api(ApiError::new(
                message,
                Some(status.as_u16()),
                data.errors,
            )));
        }
        Ok(data)
    }
}

fn secret_header(value: &str, name: &str) -> Result<HeaderValue, Error> {
    let mut v = HeaderValue::from_str(value)
        .map_err(|_| Error::Other(format!("{} contains characters not allowed in a header", name)))?;
    v.set_sensitive(true);
    Ok(v)
}

fn host_tags_path(host: &str) -> String {
    format!("/tags/hosts/{}", urlencoding::encode(host))
}

fn event_query_string(query: &EventQuery) -> String {
    let mut params = vec![format!("start={}", query.start), format!("end={}", query.end)];
    if let Some(p) = query.priority {
        params.push(format!("priority={}", p.as_str()));
    }
    if let Some(s) = &query.sources {
        params.push(format!("sources={}", urlencoding::encode(s)));
    }
    if !query.tags.is_empty() {
        params.push(format!("tags={}", urlencoding::encode(&query.tags.join(","))));
    }
    params.join("&")
}
