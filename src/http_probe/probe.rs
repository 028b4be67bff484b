use std::future::Future;
use std::time::Duration;

use chrono::Local;
use reqwest::{Client, header::LAST_MODIFIED};
use url::Url;

use super::prelude::*;
use crate::config::probe_config::ProbeSettings;

const DEFAULT_SCHEME: &str = "http://";

/// A single connectivity check against one URL.
///
/// Implementations never fail: every outcome, including transport errors,
/// is described by the returned [`ProbeResult`].
pub trait Probe {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeResult> + Send;
}

/// Prepends `http://` when the URL carries no http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{url}")
    }
}

fn classify_error(err: &reqwest::Error) -> ProbeFailure {
    if err.is_timeout() {
        ProbeFailure::Timeout
    } else if err.is_connect() {
        ProbeFailure::Connect
    } else if err.is_builder() {
        ProbeFailure::InvalidUrl
    } else {
        ProbeFailure::Transport(report(err))
    }
}

/// Probes URLs with a plain GET request through a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client the same way for every run: one timeout covering
    /// connect, TLS and the full response head.
    pub fn from_settings(settings: &ProbeSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self::new(client))
    }
}

impl Probe for HttpProber {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeResult> + Send {
        probe_url(self.client.clone(), url.to_string())
    }
}

pub async fn probe_url(client: Client, url: String) -> ProbeResult {
    let target = normalize_url(&url);
    let checked_at = Local::now();

    if Url::parse(&target).is_err() {
        log::warn!("Skipping {url}: not a valid URL");
        return ProbeResult::unreachable(url, ProbeFailure::InvalidUrl, checked_at);
    }

    match client.get(&target).send().await {
        Ok(resp) => {
            let status = resp.status().as_u16();
            let last_modified = resp
                .headers()
                .get(LAST_MODIFIED)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            log::debug!("{target} responded with {status}");
            ProbeResult::responded(url, status, last_modified, checked_at)
        }
        Err(e) => {
            let failure = classify_error(&e);
            log::warn!("{target} could not be reached: {failure}");
            ProbeResult::unreachable(url, failure, checked_at)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        LAST_MODIFIED_VALUE, closed_port_addr, spawn_http_server, spawn_silent_server,
    };

    fn client(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create client")
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com/a"), "https://example.com/a");
        assert_eq!(normalize_url("HTTPS://example.com"), "HTTPS://example.com");
        assert_eq!(normalize_url("httpbin.org"), "http://httpbin.org");
    }

    #[tokio::test]
    async fn test_probe_ok_reads_last_modified() {
        let addr = spawn_http_server().await;
        let url = format!("http://{addr}/ok");

        let result = probe_url(client(Duration::from_secs(5)), url.clone()).await;

        assert_eq!(result.url(), url);
        assert!(result.reachable());
        assert_eq!(result.status_code(), Some(200));
        assert_eq!(result.status_description(), "OK - Permintaan berhasil diproses.");
        assert_eq!(result.last_modified(), Some(LAST_MODIFIED_VALUE));
    }

    #[tokio::test]
    async fn test_probe_without_scheme_keeps_user_url() {
        let addr = spawn_http_server().await;
        let url = format!("{addr}/ok");

        let result = probe_url(client(Duration::from_secs(5)), url.clone()).await;

        assert_eq!(result.url(), url);
        assert_eq!(result.status_code(), Some(200));
    }

    #[tokio::test]
    async fn test_probe_error_status_is_still_a_response() {
        let addr = spawn_http_server().await;

        let result = probe_url(client(Duration::from_secs(5)), format!("http://{addr}/missing"))
            .await;

        assert!(result.reachable());
        assert_eq!(result.status_code(), Some(404));
        assert_eq!(result.last_modified(), None);
    }

    #[tokio::test]
    async fn test_probe_unlisted_status_uses_fallback_description() {
        let addr = spawn_http_server().await;

        let result = probe_url(client(Duration::from_secs(5)), format!("http://{addr}/teapot"))
            .await;

        assert_eq!(result.status_code(), Some(418));
        assert_eq!(result.status_description(), UNKNOWN_STATUS_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_probe_follows_redirects() {
        let addr = spawn_http_server().await;

        let result = probe_url(client(Duration::from_secs(5)), format!("http://{addr}/moved"))
            .await;

        assert_eq!(result.status_code(), Some(200));
    }

    #[tokio::test]
    async fn test_probe_times_out_on_silent_endpoint() {
        let addr = spawn_silent_server().await;
        let started = std::time::Instant::now();

        let result = probe_url(client(Duration::from_millis(300)), format!("http://{addr}/")).await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!result.reachable());
        assert_eq!(result.status_code(), None);
        assert_eq!(result.failure(), Some(&ProbeFailure::Timeout));
        assert_eq!(result.status_description(), UNREACHABLE_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_probe_refused_connection() {
        let addr = closed_port_addr().await;

        let result = probe_url(client(Duration::from_secs(5)), format!("http://{addr}/")).await;

        assert!(!result.reachable());
        assert_eq!(result.status_code(), None);
        assert_eq!(result.last_modified(), None);
    }

    #[tokio::test]
    async fn test_probe_invalid_url_never_leaves_the_process() {
        let result = probe_url(client(Duration::from_secs(5)), "http://exa mple.com".to_string())
            .await;

        assert_eq!(result.failure(), Some(&ProbeFailure::InvalidUrl));
        assert!(!result.reachable());
    }
}
