use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::{Checkin, CheckinKind, CheckinStatus, FaceResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckinRequest {
    #[serde(rename = "type")]
    pub kind: CheckinKind,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub description: String,
    /// Inline base64 image data, stored as-is.
    #[serde(default)]
    pub selfie_image: String,
    #[serde(default)]
    pub face_data: Option<FaceResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: CheckinKind,
    pub mood: String,
    pub selfie_url: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_result: Option<FaceResult>,
    pub status: CheckinStatus,
}

impl From<Checkin> for CheckinResponse {
    fn from(checkin: Checkin) -> Self {
        Self {
            id: checkin.id.to_hex(),
            user_id: checkin.user_id.to_hex(),
            kind: checkin.kind,
            mood: checkin.mood,
            selfie_url: checkin.selfie_url,
            description: checkin.description,
            created_at: checkin.created_at.to_time_0_3(),
            face_result: checkin.face_result,
            status: checkin.status,
        }
    }
}
