use crate::models::{Component, ComponentId, ComponentRef, IncidentId, IncidentStatus};
use std::collections::HashMap;

/// Everything the tracker remembers between poll cycles. Lives for the
/// duration of the process and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct PollerState {
    pub incidents_etag: Option<String>,
    pub components_etag: Option<String>,
    pub statuses: HashMap<IncidentId, IncidentStatus>,
    pub component_names: HashMap<ComponentId, String>,
}

impl PollerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn known_incidents(&self) -> usize {
        self.statuses.len()
    }

    pub fn status_of(&self, incident_id: &str) -> Option<&IncidentStatus> {
        self.statuses.get(incident_id)
    }

    /// Replaces the status snapshot with one taken from the latest feed.
    pub fn replace_statuses(&mut self, statuses: HashMap<IncidentId, IncidentStatus>) {
        self.statuses = statuses;
    }

    pub fn replace_components(&mut self, components: Vec<Component>) {
        self.component_names = components
            .into_iter()
            .map(|component| (component.id, component.name))
            .collect();
    }

    /// Display name for a component: inline name, then directory, then raw id.
    pub fn component_name<'a>(&'a self, component: &'a ComponentRef) -> &'a str {
        component
            .name()
            .or_else(|| self.component_names.get(component.id()).map(String::as_str))
            .unwrap_or_else(|| component.id())
    }
}
