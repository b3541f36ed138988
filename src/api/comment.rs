use crate::api::{lookup_usernames, parse_object_id};
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{
    Anime, Comment, CommentEnvelope, CommentListEnvelope, CommentRequest, CommentResponse,
    UserRef, COMMENT_MAX_LEN,
};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::Database;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/comments/anime/{anime_id}",
    params(
        ("anime_id" = String, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "Comments for an anime, newest first", body = CommentListEnvelope)
    ),
    tag = "comments"
)]
pub async fn get_comments_by_anime(
    _user: Option<AuthenticatedUser>,
    path: web::Path<String>,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let anime_id = parse_object_id(&path.into_inner())?;

    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();
    let mut cursor = db
        .collection::<Comment>("comments")
        .find(doc! { "anime_id": anime_id }, options)
        .await?;

    let mut comments = Vec::new();
    while cursor.advance().await? {
        let comment: Comment = cursor.deserialize_current()?;
        comments.push(comment);
    }

    let author_ids: Vec<_> = comments.iter().map(|c| c.user_id).collect();
    let usernames = lookup_usernames(&db, &author_ids).await?;

    let responses: Vec<CommentResponse> = comments
        .into_iter()
        .map(|comment| CommentResponse {
            id: comment.id.map(|id| id.to_hex()).unwrap_or_default(),
            text: comment.text,
            user: UserRef {
                id: comment.user_id.to_hex(),
                username: usernames
                    .get(&comment.user_id)
                    .cloned()
                    .unwrap_or_default(),
            },
            anime_id: comment.anime_id.to_hex(),
            created_at: comment.created_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(CommentListEnvelope::with_count(responses)))
}

#[utoipa::path(
    post,
    path = "/api/comments/anime/{anime_id}",
    params(
        ("anime_id" = String, Path, description = "Anime ID")
    ),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentEnvelope),
        (status = 400, description = "Comment text out of bounds"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Anime not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "comments"
)]
pub async fn add_comment(
    path: web::Path<String>,
    req: web::Json<CommentRequest>,
    user: AuthenticatedUser,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let anime_id = parse_object_id(&path.into_inner())?;

    let text = req.text.trim().to_string();
    // Character count, so multibyte text gets the full bound.
    if text.is_empty() || text.chars().count() > COMMENT_MAX_LEN {
        return Err(ApiError::Validation(
            "Comment must be 1-1000 characters".to_string(),
        ));
    }

    let anime_exists = db
        .collection::<Anime>("anime")
        .find_one(doc! { "_id": anime_id }, None)
        .await?;
    if anime_exists.is_none() {
        return Err(ApiError::NotFound("Anime not found".to_string()));
    }

    let comment = Comment {
        id: None,
        text,
        user_id: user.user_id,
        anime_id,
        created_at: Utc::now(),
    };

    let inserted = db
        .collection::<Comment>("comments")
        .insert_one(&comment, None)
        .await?;
    let comment_id = inserted
        .inserted_id
        .as_object_id()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("Inserted id was not an ObjectId")))?;

    let usernames = lookup_usernames(&db, &[user.user_id]).await?;

    Ok(HttpResponse::Created().json(CommentEnvelope::new(CommentResponse {
        id: comment_id.to_hex(),
        text: comment.text,
        user: UserRef {
            id: user.user_id.to_hex(),
            username: usernames.get(&user.user_id).cloned().unwrap_or_default(),
        },
        anime_id: anime_id.to_hex(),
        created_at: comment.created_at,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(
        ("id" = String, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Comment not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    path: web::Path<String>,
    user: AuthenticatedUser,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let comment_id = parse_object_id(&path.into_inner())?;
    let collection = db.collection::<Comment>("comments");

    let comment = collection
        .find_one(doc! { "_id": comment_id }, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    if comment.user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "Not authorized to delete this comment".to_string(),
        ));
    }

    collection
        .delete_one(doc! { "_id": comment_id }, None)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {}
    })))
}
