//! Periodic health probe.
//!
//! Runs a read-only company lookup on a fixed interval so the database pool
//! stays warm and connectivity problems surface in the logs. Failures are
//! logged and never stop the loop.

use std::sync::Arc;
use std::time::Duration;

use buycut_sdk::{BuycutClient, CompanyId};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::HealthConfig;

/// Probe settings taken from [`HealthConfig`].
#[derive(Debug, Clone, Copy)]
pub struct HealthProbe {
    pub interval: Duration,
    pub company_id: CompanyId,
}

impl From<&HealthConfig> for HealthProbe {
    fn from(cfg: &HealthConfig) -> Self {
        Self {
            interval: cfg.interval,
            company_id: cfg.probe_company_id,
        }
    }
}

/// Probe every `probe.interval` until `cancel` fires. The first probe runs one
/// interval after start.
pub async fn run_health_job(
    client: Arc<dyn BuycutClient>,
    probe: HealthProbe,
    cancel: CancellationToken,
) {
    let mut ticks = interval_at(Instant::now() + probe.interval, probe.interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval = ?probe.interval, company_id = probe.company_id, "Health job started");

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                info!("Health job shutting down");
                break;
            }
            _ = ticks.tick() => {
                match client.get_company(probe.company_id).await {
                    Ok(found) => debug!(company = %found.company.name, "Health probe ok"),
                    Err(e) => warn!(error = %e, company_id = probe.company_id, "Health probe failed"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use buycut_sdk::{
        BoycottedResult, BuycutError, Company, CompanyWithBrands, KeywordMatch, PageRequest, Paged,
    };
    use time::OffsetDateTime;
    use tracing_test::traced_test;

    use super::*;

    struct CountingClient {
        probes: AtomicUsize,
        fail: bool,
    }

    impl CountingClient {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                probes: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl BuycutClient for CountingClient {
        async fn get_company(&self, id: CompanyId) -> Result<CompanyWithBrands, BuycutError> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(BuycutError::not_found("company"));
            }
            Ok(CompanyWithBrands {
                company: Company {
                    id,
                    name: "Probe".to_owned(),
                    slug: "probe".to_owned(),
                    description: String::new(),
                    proof: Vec::new(),
                    image_url: String::new(),
                    created_at: OffsetDateTime::UNIX_EPOCH,
                    updated_at: OffsetDateTime::UNIX_EPOCH,
                },
                brands: Vec::new(),
            })
        }

        async fn find_by_keyword(&self, _keyword: &str) -> Result<KeywordMatch, BuycutError> {
            Err(BuycutError::internal())
        }

        async fn boycott_feed(
            &self,
            _keyword: &str,
            _page: PageRequest,
        ) -> Result<Paged<BoycottedResult>, BuycutError> {
            Err(BuycutError::internal())
        }
    }

    const PROBE: HealthProbe = HealthProbe {
        interval: Duration::from_secs(180),
        company_id: 1,
    };

    #[tokio::test(start_paused = true)]
    async fn probes_once_per_interval_until_cancelled() {
        let client = CountingClient::new(false);
        let cancel = CancellationToken::new();
        let job = tokio::spawn(run_health_job(client.clone(), PROBE, cancel.clone()));

        tokio::time::sleep(Duration::from_secs(179)).await;
        assert_eq!(client.probes.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(3 * 180 - 179 + 1)).await;
        assert_eq!(client.probes.load(Ordering::SeqCst), 3);

        cancel.cancel();
        job.await.unwrap();

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(client.probes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn failures_are_logged_and_do_not_stop_the_job() {
        let client = CountingClient::new(true);
        let cancel = CancellationToken::new();
        let job = tokio::spawn(run_health_job(client.clone(), PROBE, cancel.clone()));

        tokio::time::sleep(Duration::from_secs(2 * 180 + 1)).await;
        cancel.cancel();
        job.await.unwrap();

        assert_eq!(client.probes.load(Ordering::SeqCst), 2);
        assert!(logs_contain("Health probe failed"));
    }
}
