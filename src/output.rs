use crate::tracker::{IncidentEvent, PollerState};
use chrono::{DateTime, Local, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NO_MESSAGE: &str = "No status message available";

/// Renders an event as the console block printed for it.
pub fn render_event(event: &IncidentEvent, state: &PollerState, default_product: &str) -> String {
    let incident = event.incident();

    let timestamp = format_timestamp(incident.updated_at.as_deref());
    let product = product_line(event, state, default_product);
    let headline = match event {
        IncidentEvent::New(_) => {
            format!("New incident: {} ({})", display_name(event), incident.status)
        }
        IncidentEvent::StatusChanged { old, .. } => format!(
            "Status changed: {} ({} -> {})",
            display_name(event),
            old,
            incident.status
        ),
    };
    let message = incident.latest_message().unwrap_or(NO_MESSAGE);

    format!(
        "[{}] Product: {}\n{}\nStatus: {}",
        timestamp, product, headline, message
    )
}

fn display_name(event: &IncidentEvent) -> &str {
    let incident = event.incident();
    if incident.name.trim().is_empty() {
        &incident.id
    } else {
        &incident.name
    }
}

fn product_line(event: &IncidentEvent, state: &PollerState, default_product: &str) -> String {
    let names: Vec<&str> = event
        .incident()
        .components
        .iter()
        .map(|component| state.component_name(component))
        .collect();

    if names.is_empty() {
        default_product.to_string()
    } else {
        names.join(", ")
    }
}

/// Formats an RFC 3339 timestamp in UTC; unparsable input is returned as-is
/// and a missing one falls back to the local clock.
pub fn format_timestamp(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => parsed.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string(),
            Err(_) => raw.to_string(),
        },
        None => Local::now().format(TIMESTAMP_FORMAT).to_string(),
    }
}
