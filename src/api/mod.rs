pub mod anime;
pub mod auth;
pub mod comment;
pub mod rating;

use crate::error::ApiError;
use crate::models::{
    AnimeEnvelope, AnimeListEnvelope, AnimeResponse, AuthResponse, CommentEnvelope,
    CommentListEnvelope, CommentRequest, CommentResponse, LoginRequest, RatingEnvelope,
    RatingListEnvelope, RatingRequest, RatingResponse, RegisterRequest, User, UserEnvelope,
    UserRef, UserResponse,
};
use actix_web::HttpResponse;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::Database;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use utoipa::OpenApi;

/// Path ids arrive as hex strings; anything unparsable is a caller error.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::Validation("Invalid id format".to_string()))
}

/// Batch id-to-username resolution for attaching author identity to
/// engagement records.
pub(crate) async fn lookup_usernames(
    db: &Database,
    ids: &[ObjectId],
) -> Result<HashMap<ObjectId, String>, ApiError> {
    let mut usernames = HashMap::new();
    if ids.is_empty() {
        return Ok(usernames);
    }

    let unique: Vec<ObjectId> = ids.iter().copied().collect::<HashSet<_>>().into_iter().collect();

    let mut cursor = db
        .collection::<User>("users")
        .find(doc! { "_id": { "$in": unique } }, None)
        .await?;

    while cursor.advance().await? {
        let user: User = cursor.deserialize_current()?;
        if let Some(id) = user.id {
            usernames.insert(id, user.username);
        }
    }

    Ok(usernames)
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service liveness")
    ),
    tag = "health"
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth endpoints
        auth::register,
        auth::login,
        auth::guest_login,
        auth::me,
        auth::logout,
        // Anime endpoints
        anime::get_all_anime,
        anime::get_recommendations,
        anime::get_saved_anime,
        anime::get_anime_by_id,
        anime::like_anime,
        anime::save_anime,
        // Comment endpoints
        comment::get_comments_by_anime,
        comment::add_comment,
        comment::delete_comment,
        // Rating endpoints
        rating::get_ratings_by_anime,
        rating::get_user_rating,
        rating::add_or_update_rating,
        // Misc
        health,
    ),
    components(schemas(
        // Auth schemas
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        UserEnvelope,
        // Anime schemas
        AnimeResponse,
        AnimeEnvelope,
        AnimeListEnvelope,
        // Comment schemas
        CommentRequest,
        CommentResponse,
        CommentEnvelope,
        CommentListEnvelope,
        UserRef,
        // Rating schemas
        RatingRequest,
        RatingResponse,
        RatingEnvelope,
        RatingListEnvelope,
        // Query schemas
        anime::AnimeQuery,
    )),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "anime", description = "Catalog endpoints"),
        (name = "comments", description = "Comment endpoints"),
        (name = "ratings", description = "Rating endpoints"),
        (name = "health", description = "Liveness endpoint"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

use utoipa::Modify;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
