use crate::error::{TrackerError, TrackerResult};
use crate::models::{Component, Incident};
use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of a conditional GET.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    NotModified,
    Modified { data: T, etag: Option<String> },
}

#[derive(Debug, Deserialize)]
struct IncidentsPayload {
    #[serde(default)]
    incidents: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ComponentsPayload {
    #[serde(default)]
    components: Vec<Value>,
}

#[derive(Clone)]
pub struct StatuspageClient {
    http_client: Client,
    incidents_url: String,
    components_url: String,
}

impl StatuspageClient {
    pub fn new(
        incidents_url: String,
        components_url: String,
        user_agent: &str,
        timeout: Duration,
    ) -> TrackerResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()?;

        Ok(Self {
            http_client,
            incidents_url,
            components_url,
        })
    }

    pub fn incidents_url(&self) -> &str {
        &self.incidents_url
    }

    /// Conditional GET of the incidents feed.
    pub async fn fetch_incidents(
        &self,
        etag: Option<&str>,
    ) -> TrackerResult<FetchOutcome<Vec<Incident>>> {
        let outcome = self.conditional_get(&self.incidents_url, etag).await?;
        Ok(match outcome {
            FetchOutcome::NotModified => FetchOutcome::NotModified,
            FetchOutcome::Modified { data, etag } => {
                let payload: IncidentsPayload = serde_json::from_slice(&data)?;
                FetchOutcome::Modified {
                    data: parse_records(payload.incidents, "incident"),
                    etag,
                }
            }
        })
    }

    /// Conditional GET of the component directory.
    pub async fn fetch_components(
        &self,
        etag: Option<&str>,
    ) -> TrackerResult<FetchOutcome<Vec<Component>>> {
        let outcome = self.conditional_get(&self.components_url, etag).await?;
        Ok(match outcome {
            FetchOutcome::NotModified => FetchOutcome::NotModified,
            FetchOutcome::Modified { data, etag } => {
                let payload: ComponentsPayload = serde_json::from_slice(&data)?;
                FetchOutcome::Modified {
                    data: parse_records(payload.components, "component"),
                    etag,
                }
            }
        })
    }

    async fn conditional_get(
        &self,
        url: &str,
        etag: Option<&str>,
    ) -> TrackerResult<FetchOutcome<Vec<u8>>> {
        let mut request = self.http_client.get(url);
        if let Some(etag) = etag {
            request = request.header(IF_NONE_MATCH, etag);
        }

        debug!("GET {} (etag: {:?})", url, etag);
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            debug!("{} not modified", url);
            return Ok(FetchOutcome::NotModified);
        }

        if status != StatusCode::OK {
            return Err(TrackerError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        let new_etag = response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let body = response.bytes().await?;
        Ok(FetchOutcome::Modified {
            data: body.to_vec(),
            etag: new_etag,
        })
    }
}

// Individual bad records are dropped so one broken entry cannot hide the rest.
fn parse_records<T: DeserializeOwned>(raw: Vec<Value>, kind: &str) -> Vec<T> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed {} record at index {}: {}", kind, index, e);
                None
            }
        })
        .collect()
}
