use crate::models::{Incident, IncidentId, IncidentStatus};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum IncidentEvent {
    New(Incident),
    StatusChanged {
        incident: Incident,
        old: IncidentStatus,
    },
}

impl IncidentEvent {
    pub fn incident(&self) -> &Incident {
        match self {
            IncidentEvent::New(incident) => incident,
            IncidentEvent::StatusChanged { incident, .. } => incident,
        }
    }
}

/// Compares a freshly fetched incident list against the previous snapshot.
///
/// Events come out in feed order. The returned mapping is built from
/// `current` alone and is meant to replace the previous one; incidents that
/// dropped out of the feed are forgotten without an event.
pub fn diff(
    previous: &HashMap<IncidentId, IncidentStatus>,
    current: &[Incident],
) -> (Vec<IncidentEvent>, HashMap<IncidentId, IncidentStatus>) {
    let mut events = Vec::new();
    let mut next = HashMap::with_capacity(current.len());

    for incident in current {
        if incident.id.is_empty() {
            continue;
        }

        match previous.get(&incident.id) {
            None => events.push(IncidentEvent::New(incident.clone())),
            Some(old) if *old != incident.status => events.push(IncidentEvent::StatusChanged {
                incident: incident.clone(),
                old: old.clone(),
            }),
            Some(_) => {}
        }

        next.insert(incident.id.clone(), incident.status.clone());
    }

    (events, next)
}
