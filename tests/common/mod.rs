use mockito::{Server, ServerGuard};
use status_tracker::adapters::statuspage::StatuspageClient;
use status_tracker::{AppConfig, Poller};
use std::time::Duration;

pub const INCIDENTS_PATH: &str = "/api/v2/incidents.json";
pub const COMPONENTS_PATH: &str = "/api/v2/components.json";

pub struct TestContext {
    pub server: ServerGuard,
    pub config: AppConfig,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = Server::new_async().await;

        let config = AppConfig {
            incidents_url: format!("{}{}", server.url(), INCIDENTS_PATH),
            components_url: format!("{}{}", server.url(), COMPONENTS_PATH),
            user_agent: "status-tracker-test/1.0".to_string(),
            request_timeout_secs: 5,
            ..AppConfig::default()
        };

        Self { server, config }
    }

    pub fn client(&self) -> StatuspageClient {
        StatuspageClient::new(
            self.config.incidents_url.clone(),
            self.config.components_url.clone(),
            &self.config.user_agent,
            Duration::from_secs(self.config.request_timeout_secs),
        )
        .expect("Failed to build client")
    }

    pub fn poller(&self) -> Poller {
        Poller::new(self.client(), &self.config)
    }

    /// Components endpoint that always answers with an empty directory.
    pub async fn mock_empty_components(&mut self) -> mockito::Mock {
        self.server
            .mock("GET", COMPONENTS_PATH)
            .with_status(200)
            .with_body(r#"{"components":[]}"#)
            .create_async()
            .await
    }
}

pub fn incidents_body(incidents: &[(&str, &str)]) -> String {
    let incidents: Vec<serde_json::Value> = incidents
        .iter()
        .map(|(id, status)| {
            serde_json::json!({
                "id": id,
                "name": format!("Incident {}", id),
                "status": status,
                "components": [],
                "updated_at": "2024-05-01T12:30:00Z",
                "incident_updates": [{ "body": format!("{} is {}", id, status) }],
            })
        })
        .collect();

    serde_json::json!({ "incidents": incidents }).to_string()
}
