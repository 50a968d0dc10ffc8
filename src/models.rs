use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Access level carried in a user document and inside issued tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    Member,
    ProjectManager,
}

impl Role {
    /// Managers and project managers see every check-in; everyone else only
    /// sees their own.
    pub fn sees_all_checkins(self) -> bool {
        matches!(self, Role::Manager | Role::ProjectManager)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    /// Argon2 PHC hash. Stays inside the store layer; response DTOs have no
    /// counterpart field.
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: Role,
}

/// Teams hold weak references only: `members` and `lead` are never validated
/// against the users collection at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead: Option<ObjectId>,
    pub created_at: bson::DateTime,
}

/// `teams` preserves insertion order and may reference teams that no longer
/// exist; aggregation drops dangling ids instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<bson::DateTime>,
    pub teams: Vec<ObjectId>,
    pub created_at: bson::DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckinKind {
    Checkin,
    Checkout,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckinStatus {
    Present,
    Absent,
}

/// Immutable once created; owned by the issuing user via a weak reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkin {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    #[serde(rename = "type")]
    pub kind: CheckinKind,
    pub mood: String,
    /// May hold inline base64 image data rather than a URL.
    pub selfie_url: String,
    pub description: String,
    pub created_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_result: Option<FaceResult>,
    pub status: CheckinStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceResult {
    pub gender: String,
    pub age: f64,
    pub expression: String,
}
