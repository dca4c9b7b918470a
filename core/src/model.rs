//! Record model: the entities shared by every engine component.
//!
//! Field names follow the snapshot JSON documents (camelCase), so the
//! same structs deserialize the raw snapshot and serialize derived views.
//! Nothing here is mutated after load.

use crate::types::{CustomerId, ElementId, IndexCaseId, UpdateCaseId};
use serde::{Deserialize, Deserializer, Serialize};

// ── Snapshot entities ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    #[serde(rename = "customer", alias = "name", default)]
    pub name: String,
    /// The ICU log. Position matters once sorted by element id.
    #[serde(default)]
    pub icu_elements: Vec<RawElement>,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, icu_elements: Vec<RawElement>) -> Self {
        Self {
            id,
            name: name.into(),
            icu_elements,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexCase {
    pub id: IndexCaseId,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub case_type: IndexCaseType,
    #[serde(default)]
    pub representative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl IndexCase {
    pub fn new(id: IndexCaseId, representative: impl Into<String>, case_type: IndexCaseType) -> Self {
        Self {
            id,
            case_type,
            representative: representative.into(),
            topic: None,
            industry: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }
}

/// Action category of an index case. Unrecognised values load as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexCaseType {
    ActionRequest,
    Complaint,
    InfoRequest,
    Praise,
    ProvideInfo,
    #[default]
    #[serde(other)]
    Unknown,
}

impl IndexCaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionRequest => "ACTION_REQUEST",
            Self::Complaint     => "COMPLAINT",
            Self::InfoRequest   => "INFO_REQUEST",
            Self::Praise        => "PRAISE",
            Self::ProvideInfo   => "PROVIDE_INFO",
            Self::Unknown       => "UNKNOWN",
        }
    }
}

/// One raw index-case assignment in a customer's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawElement {
    pub id: ElementId,
    /// Missing in malformed input; the engine propagates the gap.
    #[serde(default)]
    pub index_case_id: Option<IndexCaseId>,
    #[serde(default)]
    pub surface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<Timestamp>,
    #[serde(rename = "updateType", default, deserialize_with = "null_as_default")]
    pub upstream_type: UpstreamType,
}

impl RawElement {
    pub fn new(
        id: ElementId,
        index_case_id: IndexCaseId,
        surface: impl Into<String>,
        upstream_type: UpstreamType,
    ) -> Self {
        Self {
            id,
            index_case_id: Some(index_case_id),
            surface: surface.into(),
            time_stamp: None,
            upstream_type,
        }
    }

    pub fn with_time_stamp(mut self, time_stamp: Timestamp) -> Self {
        self.time_stamp = Some(time_stamp);
        self
    }
}

/// Upstream timestamps arrive either as JSON numbers (integer or
/// fractional) or as strings. The engine only compares them for equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(serde_json::Number),
    Text(String),
}

impl From<i64> for Timestamp {
    fn from(epoch: i64) -> Self {
        Self::Epoch(epoch.into())
    }
}

/// The tag the upstream classifier attaches to a raw element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpstreamType {
    #[default]
    New,
    Delete,
}

// ── Derived records ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateType {
    New,
    Update,
    Delete,
}

impl UpdateType {
    pub const ALL: [UpdateType; 3] = [UpdateType::New, UpdateType::Update, UpdateType::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New    => "NEW",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl From<UpstreamType> for UpdateType {
    fn from(tag: UpstreamType) -> Self {
        match tag {
            UpstreamType::New    => UpdateType::New,
            UpstreamType::Delete => UpdateType::Delete,
        }
    }
}

/// A semantically corrected assignment event. Produced only by the
/// derivation engine; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCase {
    pub id: UpdateCaseId,
    pub customer_id: CustomerId,
    pub element_id: ElementId,
    /// Target index case. `None` when the raw element carried no reference.
    pub index_case_id: Option<IndexCaseId>,
    pub update_type: UpdateType,
    /// The index case moved away from. Set only for `UPDATE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<IndexCaseId>,
    pub surface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<Timestamp>,
}

impl UpdateCase {
    /// True if this record targets `index_case_id` or moved away from it.
    pub fn touches(&self, index_case_id: IndexCaseId) -> bool {
        self.index_case_id == Some(index_case_id) || self.source == Some(index_case_id)
    }
}

/// A distinct index case referenced by a customer collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: IndexCaseId,
}

/// An explicit `null` loads like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
