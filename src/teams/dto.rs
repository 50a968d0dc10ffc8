use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::Team;

/// Shared body for team create and update.
#[derive(Debug, Deserialize)]
pub struct TeamPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub lead: String,
}

impl TeamPayload {
    /// Member id strings that fail to parse are skipped; references are weak
    /// and never checked against the users collection.
    pub fn member_ids(&self) -> Vec<ObjectId> {
        self.members
            .iter()
            .filter_map(|id| ObjectId::parse_str(id).ok())
            .collect()
    }

    /// An unparseable lead degrades to absent rather than an error.
    pub fn lead_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.lead).ok()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id.to_hex(),
            name: team.name,
            description: team.description,
            members: team.members.iter().map(|id| id.to_hex()).collect(),
            lead: team.lead.map(|id| id.to_hex()),
            created_at: team.created_at.to_time_0_3(),
        }
    }
}
