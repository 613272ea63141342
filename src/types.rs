use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl From<TokenResponse> for Token {
    fn from(res: TokenResponse) -> Self {
        Token {
            access_token: res.access_token,
            expires_in: res.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// JSON:API response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub data: Option<PrimaryData>,
    #[serde(default)]
    pub included: Vec<Resource>,
    #[serde(default)]
    pub links: Option<Links>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<Resource>),
    One(Resource),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Value,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl Resource {
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    Many(Vec<ResourceIdentifier>),
    One(ResourceIdentifier),
}

impl RelationshipData {
    pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
        match self {
            RelationshipData::Many(ids) => ids.iter().collect(),
            RelationshipData::One(id) => vec![id],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Pointer to one playlist entry, in playlist order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackItemRef {
    pub id: String,
    pub kind: String,
}

impl From<&Resource> for TrackItemRef {
    fn from(res: &Resource) -> Self {
        TrackItemRef {
            id: res.id.clone(),
            kind: res.kind.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatus {
    Unavailable,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTrack {
    pub order: usize,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub id: String,
    pub isrc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TrackStatus>,
}

impl EnrichedTrack {
    /// Stand-in record for a track that could not be resolved.
    pub fn placeholder(order: usize, id: &str, status: TrackStatus) -> Self {
        EnrichedTrack {
            order,
            title: "Unavailable Track".to_string(),
            artists: vec!["Unknown".to_string()],
            album: "Unknown".to_string(),
            id: id.to_string(),
            isrc: "N/A".to_string(),
            status: Some(status),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub playlist: String,
    pub tracks: Vec<EnrichedTrack>,
}

#[derive(Tabled)]
pub struct FailedTrackRow {
    pub order: usize,
    pub id: String,
    pub status: String,
}
