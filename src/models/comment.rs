use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const COMMENT_MAX_LEN: usize = 1000;

/// Stored document for the `comments` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub text: String,
    pub user_id: ObjectId,
    pub anime_id: ObjectId,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub text: String,
}

/// Author identity attached to comments and ratings on the way out.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserRef {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: String,
    pub text: String,
    pub user: UserRef,
    pub anime_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
