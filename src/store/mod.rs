use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::Serialize;

use crate::models::{Checkin, Project, Team, User};

pub mod mongo;

#[cfg(test)]
pub mod memory;

/// Filter for check-in listings. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct CheckinFilter {
    pub user_id: Option<ObjectId>,
    /// Half-open creation window `[start, end)`.
    pub created_within: Option<(bson::DateTime, bson::DateTime)>,
}

/// Field-level team update; every field is written, matching the wire
/// contract of the team PUT endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TeamPatch {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<ObjectId>,
    pub lead: Option<ObjectId>,
}

/// Field-level project update. Dates and team list are only written when
/// present, so an absent field leaves the stored value untouched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<bson::DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<bson::DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<ObjectId>>,
}

/// Narrow document-store contract: filtered find, batched find-by-ids,
/// insert, field-level update and delete per collection, keyed by ObjectId.
/// The batched lookups make no ordering promise; callers re-sort.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_user_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>>;
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;
    async fn users_by_ids(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<User>>;
    async fn insert_user(&self, user: &User) -> anyhow::Result<()>;

    async fn list_teams(&self) -> anyhow::Result<Vec<Team>>;
    async fn find_team_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Team>>;
    async fn teams_by_ids(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<Team>>;
    async fn insert_team(&self, team: &Team) -> anyhow::Result<()>;
    async fn update_team(&self, id: ObjectId, patch: TeamPatch) -> anyhow::Result<()>;
    async fn delete_team(&self, id: ObjectId) -> anyhow::Result<()>;

    async fn list_projects(&self) -> anyhow::Result<Vec<Project>>;
    async fn find_project_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Project>>;
    async fn insert_project(&self, project: &Project) -> anyhow::Result<()>;
    async fn update_project(&self, id: ObjectId, patch: ProjectPatch) -> anyhow::Result<()>;
    async fn delete_project(&self, id: ObjectId) -> anyhow::Result<()>;

    async fn list_checkins(&self, filter: CheckinFilter) -> anyhow::Result<Vec<Checkin>>;
    async fn insert_checkin(&self, checkin: &Checkin) -> anyhow::Result<()>;
}
