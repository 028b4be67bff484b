pub mod aggregate;
pub mod date;

use futures::stream::{self, StreamExt};

use crate::http_probe::prelude::*;

/// Runs a [`Probe`] over an ordered list of URLs.
///
/// Up to `concurrency` probes are in flight at once. Results come back in
/// input order: row N always belongs to URL N.
#[derive(Debug, Clone)]
pub struct ReportBuilder<P> {
    prober: P,
    concurrency: usize,
}

impl<P: Probe> ReportBuilder<P> {
    pub fn new(prober: P) -> Self {
        Self {
            prober,
            concurrency: 1,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn build(&self, urls: &[String]) -> Vec<ProbeResult> {
        if urls.is_empty() {
            return Vec::new();
        }

        log::info!(
            "Checking {} url(s), {} at a time",
            urls.len(),
            self.concurrency
        );

        // `buffered` yields in submission order no matter which probe finishes first.
        let results: Vec<ProbeResult> = stream::iter(urls)
            .map(|url| self.prober.probe(url))
            .buffered(self.concurrency)
            .collect()
            .await;

        for result in &results {
            if let Some(failure) = result.failure() {
                log::debug!("{}: {failure}", result.url());
            }
        }
        let reachable = results.iter().filter(|r| r.reachable()).count();
        log::info!(
            "Check finished: {reachable} reachable, {} unreachable",
            results.len() - reachable
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::Local;
    use reqwest::Client;

    use super::*;
    use crate::test_support::{closed_port_addr, spawn_http_server};

    /// Answers after a delay encoded in the URL, so later URLs can finish first.
    #[derive(Clone, Default)]
    struct DelayedProber {
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    impl Probe for DelayedProber {
        fn probe(&self, url: &str) -> impl Future<Output = ProbeResult> + Send {
            let url = url.to_string();
            let in_flight = self.in_flight.clone();
            let peak = self.peak.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);

                let delay: u64 = url.trim_start_matches("delay/").parse().unwrap_or(0);
                tokio::time::sleep(Duration::from_millis(delay)).await;

                in_flight.fetch_sub(1, Ordering::SeqCst);
                if delay == 0 {
                    ProbeResult::unreachable(url, ProbeFailure::Connect, Local::now())
                } else {
                    ProbeResult::responded(url, 200, None, Local::now())
                }
            }
        }
    }

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_input_yields_empty_report() {
        let builder = ReportBuilder::new(DelayedProber::default()).with_concurrency(4);
        assert!(builder.build(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_preserves_input_order() {
        let input = urls(&["delay/120", "delay/60", "delay/0", "delay/10"]);
        let builder = ReportBuilder::new(DelayedProber::default()).with_concurrency(4);

        let results = builder.build(&input).await;

        let order: Vec<&str> = results.iter().map(|r| r.url()).collect();
        assert_eq!(order, ["delay/120", "delay/60", "delay/0", "delay/10"]);
        // the failed probe in the middle does not disturb its neighbours
        assert!(!results[2].reachable());
        assert!(results[3].reachable());
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let prober = DelayedProber::default();
        let input = urls(&["delay/30"; 10]);
        let builder = ReportBuilder::new(prober.clone()).with_concurrency(3);

        let results = builder.build(&input).await;

        assert_eq!(results.len(), 10);
        assert!(prober.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_default_is_sequential() {
        let prober = DelayedProber::default();
        let builder = ReportBuilder::new(prober.clone());

        builder.build(&urls(&["delay/5", "delay/5", "delay/5"])).await;

        assert_eq!(prober.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let builder = ReportBuilder::new(DelayedProber::default()).with_concurrency(0);
        assert_eq!(builder.build(&urls(&["delay/1"])).await.len(), 1);
    }

    #[tokio::test]
    async fn test_http_batch_isolates_failures() {
        let addr = spawn_http_server().await;
        let dead = closed_port_addr().await;
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create client");
        let builder = ReportBuilder::new(HttpProber::new(client)).with_concurrency(2);
        let input = vec![
            format!("http://{addr}/slow"),
            format!("http://{dead}/"),
            format!("{addr}/ok"),
            format!("http://{addr}/broken"),
        ];

        let results = builder.build(&input).await;

        let codes: Vec<Option<u16>> = results.iter().map(|r| r.status_code()).collect();
        assert_eq!(codes, [Some(200), None, Some(200), Some(500)]);
        for (result, url) in results.iter().zip(&input) {
            assert_eq!(result.url(), url);
            assert_eq!(result.status_code().is_some(), result.reachable());
        }
    }
}
