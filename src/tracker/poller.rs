use crate::adapters::statuspage::{FetchOutcome, StatuspageClient};
use crate::config::{AppConfig, PollInterval};
use crate::error::TrackerResult;
use crate::output::render_event;
use crate::tracker::diff::{diff, IncidentEvent};
use crate::tracker::state::PollerState;
use std::future::Future;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub cycles: u64,
    pub failures: u64,
    pub events: u64,
}

pub struct Poller {
    client: StatuspageClient,
    state: PollerState,
    announce_existing: bool,
    default_product: String,
}

impl Poller {
    pub fn new(client: StatuspageClient, config: &AppConfig) -> Self {
        Self {
            client,
            state: PollerState::new(),
            announce_existing: config.announce_existing,
            default_product: config.default_product.clone(),
        }
    }

    pub fn state(&self) -> &PollerState {
        &self.state
    }

    /// Initial fetch. Existing incidents are recorded as seen; they are only
    /// returned as events when `announce_existing` is set.
    pub async fn prime(&mut self) -> TrackerResult<Vec<IncidentEvent>> {
        let events = self.poll_once().await?;
        info!(
            "Initialized: found {} existing incident(s)",
            self.state.known_incidents()
        );

        if self.announce_existing {
            Ok(events)
        } else {
            Ok(Vec::new())
        }
    }

    /// One fetch + diff cycle. On error the state is left untouched.
    pub async fn poll_once(&mut self) -> TrackerResult<Vec<IncidentEvent>> {
        let outcome = self
            .client
            .fetch_incidents(self.state.incidents_etag.as_deref())
            .await?;

        let (incidents, etag) = match outcome {
            FetchOutcome::NotModified => {
                debug!("Incidents not modified");
                return Ok(Vec::new());
            }
            FetchOutcome::Modified { data, etag } => (data, etag),
        };

        self.state.incidents_etag = etag;
        self.refresh_components().await;

        let (events, statuses) = diff(&self.state.statuses, &incidents);
        self.state.replace_statuses(statuses);

        if !events.is_empty() {
            info!("Detected {} incident update(s)", events.len());
        }
        Ok(events)
    }

    // Best-effort: a stale directory only degrades display names.
    async fn refresh_components(&mut self) {
        match self
            .client
            .fetch_components(self.state.components_etag.as_deref())
            .await
        {
            Ok(FetchOutcome::Modified { data, etag }) => {
                debug!("Component directory refreshed ({} entries)", data.len());
                self.state.components_etag = etag;
                self.state.replace_components(data);
            }
            Ok(FetchOutcome::NotModified) => {}
            Err(e) => warn!("Failed to refresh component directory: {}", e),
        }
    }

    pub fn render(&self, event: &IncidentEvent) -> String {
        render_event(event, &self.state, &self.default_product)
    }

    pub fn print_events(&self, events: &[IncidentEvent]) {
        for event in events {
            println!("{}\n", self.render(event));
        }
    }

    /// Polls until `shutdown` resolves. Failed cycles are logged and the loop
    /// carries on after the normal interval.
    pub async fn run<F>(&mut self, interval: PollInterval, shutdown: F) -> RunStats
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut stats = RunStats::default();

        loop {
            debug!("Checking for updates (check #{})", stats.cycles + 1);

            let result = tokio::select! {
                _ = &mut shutdown => break,
                result = self.poll_once() => result,
            };
            stats.cycles += 1;

            match result {
                Ok(events) => {
                    stats.events += events.len() as u64;
                    self.print_events(&events);
                }
                Err(e) => {
                    stats.failures += 1;
                    if e.is_transport() {
                        error!("Network error during check #{}: {}", stats.cycles, e);
                    } else {
                        error!("Check #{} failed: {}", stats.cycles, e);
                    }
                }
            }

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(interval.as_duration()) => {}
            }
        }

        info!(
            "Polling stopped after {} check(s), {} failure(s)",
            stats.cycles, stats.failures
        );
        stats
    }
}
