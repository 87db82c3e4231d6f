use serde::{Deserialize, Deserializer, Serialize};

// ── Newtypes for readability ──
pub type IncidentId = String; // e.g., "01HXYZ..." from the status page
pub type ComponentId = String;

// ── Incident Status ──
//
// The tracker never validates transitions: any change of the raw string is
// reported. Unrecognised values are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncidentStatus {
    Investigating,
    Identified,
    Monitoring,
    Resolved,
    Postmortem,
    Other(String),
}

impl IncidentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            IncidentStatus::Investigating => "investigating",
            IncidentStatus::Identified => "identified",
            IncidentStatus::Monitoring => "monitoring",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Postmortem => "postmortem",
            IncidentStatus::Other(raw) => raw,
        }
    }
}

impl Default for IncidentStatus {
    fn default() -> Self {
        IncidentStatus::Other("unknown".to_string())
    }
}

impl From<String> for IncidentStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "investigating" => IncidentStatus::Investigating,
            "identified" => IncidentStatus::Identified,
            "monitoring" => IncidentStatus::Monitoring,
            "resolved" => IncidentStatus::Resolved,
            "postmortem" => IncidentStatus::Postmortem,
            _ => IncidentStatus::Other(raw),
        }
    }
}

impl From<&str> for IncidentStatus {
    fn from(raw: &str) -> Self {
        IncidentStatus::from(raw.to_string())
    }
}

impl From<IncidentStatus> for String {
    fn from(status: IncidentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Component reference inside an incident ──
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentRef {
    Detailed {
        id: ComponentId,
        #[serde(default)]
        name: Option<String>,
    },
    Id(ComponentId),
}

impl ComponentRef {
    pub fn id(&self) -> &str {
        match self {
            ComponentRef::Detailed { id, .. } => id,
            ComponentRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ComponentRef::Detailed { name, .. } => name.as_deref(),
            ComponentRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentUpdate {
    #[serde(default)]
    pub body: Option<String>,
}

// ── Incident (feed record) ──
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: IncidentStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<ComponentRef>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Newest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub incident_updates: Vec<IncidentUpdate>,
}

// Feeds send explicit nulls for fields they have no value for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Incident {
    pub fn latest_message(&self) -> Option<&str> {
        self.incident_updates
            .first()
            .and_then(|update| update.body.as_deref())
            .filter(|body| !body.trim().is_empty())
    }
}

// ── Component (components.json record) ──
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}
