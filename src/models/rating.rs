use crate::models::UserRef;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored document for the `ratings` collection. A unique compound index on
/// `(user_id, anime_id)` keeps one row per pair; votes after the first update
/// the row in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub rating: i32,
    pub user_id: ObjectId,
    pub anime_id: ObjectId,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RatingRequest {
    pub rating: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    pub id: String,
    pub rating: i32,
    pub user: UserRef,
    pub anime_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
