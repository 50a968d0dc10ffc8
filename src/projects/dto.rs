use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::PublicUser;
use crate::models::{Project, Team};

/// Shared body for project create and update. Dates arrive as `YYYY-MM-DD`
/// strings; `teams` is distinguished between absent (leave untouched on
/// update) and present-but-empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub teams: Option<Vec<String>>,
}

impl ProjectPayload {
    /// Team id strings that fail to parse are skipped, like every other weak
    /// reference on the write path.
    pub fn team_ids(&self) -> Option<Vec<ObjectId>> {
        self.teams.as_ref().map(|teams| {
            teams
                .iter()
                .filter_map(|id| ObjectId::parse_str(id).ok())
                .collect()
        })
    }
}

/// A project as stored, with team references left as ids.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<OffsetDateTime>,
    pub teams: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.to_hex(),
            name: project.name,
            description: project.description,
            start_date: project.start_date.map(bson::DateTime::to_time_0_3),
            end_date: project.end_date.map(bson::DateTime::to_time_0_3),
            teams: project.teams.iter().map(|id| id.to_hex()).collect(),
            created_at: project.created_at.to_time_0_3(),
        }
    }
}

/// The cheap listing variant: no team information at all.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Project> for ProjectSummary {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.to_hex(),
            name: project.name,
            description: project.description,
            start_date: project.start_date.map(bson::DateTime::to_time_0_3),
            end_date: project.end_date.map(bson::DateTime::to_time_0_3),
            created_at: project.created_at.to_time_0_3(),
        }
    }
}

/// Fully denormalized project tree produced by the aggregator.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<OffsetDateTime>,
    pub teams: Vec<TeamView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ProjectView {
    pub fn assemble(project: Project, teams: Vec<TeamView>) -> Self {
        Self {
            id: project.id.to_hex(),
            name: project.name,
            description: project.description,
            start_date: project.start_date.map(bson::DateTime::to_time_0_3),
            end_date: project.end_date.map(bson::DateTime::to_time_0_3),
            teams,
            created_at: project.created_at.to_time_0_3(),
        }
    }
}

/// A team with members expanded to public user views. The lead stays a bare
/// id; consumers resolve it themselves if they care.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<PublicUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TeamView {
    pub fn assemble(team: Team, members: Vec<PublicUser>) -> Self {
        Self {
            id: team.id.to_hex(),
            name: team.name,
            description: team.description,
            members,
            lead: team.lead.map(|id| id.to_hex()),
            created_at: team.created_at.to_time_0_3(),
        }
    }
}
