use crate::api::{lookup_usernames, parse_object_id};
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{
    Anime, Rating, RatingEnvelope, RatingListEnvelope, RatingRequest, RatingResponse, UserRef,
};
use crate::services::rating_stats::recalculate_average_rating;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::Database;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/ratings/anime/{anime_id}",
    params(
        ("anime_id" = String, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "Ratings for an anime, newest first", body = RatingListEnvelope)
    ),
    tag = "ratings"
)]
pub async fn get_ratings_by_anime(
    _user: Option<AuthenticatedUser>,
    path: web::Path<String>,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let anime_id = parse_object_id(&path.into_inner())?;

    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();
    let mut cursor = db
        .collection::<Rating>("ratings")
        .find(doc! { "anime_id": anime_id }, options)
        .await?;

    let mut ratings = Vec::new();
    while cursor.advance().await? {
        let rating: Rating = cursor.deserialize_current()?;
        ratings.push(rating);
    }

    let rater_ids: Vec<_> = ratings.iter().map(|r| r.user_id).collect();
    let usernames = lookup_usernames(&db, &rater_ids).await?;

    let responses: Vec<RatingResponse> = ratings
        .into_iter()
        .map(|rating| RatingResponse {
            id: rating.id.map(|id| id.to_hex()).unwrap_or_default(),
            rating: rating.rating,
            user: UserRef {
                id: rating.user_id.to_hex(),
                username: usernames.get(&rating.user_id).cloned().unwrap_or_default(),
            },
            anime_id: rating.anime_id.to_hex(),
            created_at: rating.created_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(RatingListEnvelope::with_count(responses)))
}

#[utoipa::path(
    get,
    path = "/api/ratings/anime/{anime_id}/user",
    params(
        ("anime_id" = String, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "The caller's rating, or null when unrated", body = RatingEnvelope),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "ratings"
)]
pub async fn get_user_rating(
    path: web::Path<String>,
    user: AuthenticatedUser,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let anime_id = parse_object_id(&path.into_inner())?;

    let rating = db
        .collection::<Rating>("ratings")
        .find_one(
            doc! { "user_id": user.user_id, "anime_id": anime_id },
            None,
        )
        .await?;

    let Some(rating) = rating else {
        return Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": null
        })));
    };

    let usernames = lookup_usernames(&db, &[user.user_id]).await?;

    Ok(HttpResponse::Ok().json(RatingEnvelope::new(RatingResponse {
        id: rating.id.map(|id| id.to_hex()).unwrap_or_default(),
        rating: rating.rating,
        user: UserRef {
            id: user.user_id.to_hex(),
            username: usernames.get(&user.user_id).cloned().unwrap_or_default(),
        },
        anime_id: anime_id.to_hex(),
        created_at: rating.created_at,
    })))
}

#[utoipa::path(
    post,
    path = "/api/ratings/anime/{anime_id}",
    params(
        ("anime_id" = String, Path, description = "Anime ID")
    ),
    request_body = RatingRequest,
    responses(
        (status = 200, description = "Rating stored (created or updated in place)", body = RatingEnvelope),
        (status = 400, description = "Rating out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Anime not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "ratings"
)]
pub async fn add_or_update_rating(
    path: web::Path<String>,
    req: web::Json<RatingRequest>,
    user: AuthenticatedUser,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let anime_id = parse_object_id(&path.into_inner())?;

    if !(1..=5).contains(&req.rating) {
        return Err(ApiError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let anime_exists = db
        .collection::<Anime>("anime")
        .find_one(doc! { "_id": anime_id }, None)
        .await?;
    if anime_exists.is_none() {
        return Err(ApiError::NotFound("Anime not found".to_string()));
    }

    let ratings = db.collection::<Rating>("ratings");
    let pair_filter = doc! { "user_id": user.user_id, "anime_id": anime_id };

    // One row per (user, anime): a second vote overwrites the first.
    let stored = match ratings.find_one(pair_filter.clone(), None).await? {
        Some(existing) => {
            ratings
                .update_one(
                    pair_filter.clone(),
                    doc! { "$set": { "rating": req.rating } },
                    None,
                )
                .await?;
            Rating {
                rating: req.rating,
                ..existing
            }
        }
        None => {
            let rating = Rating {
                id: None,
                rating: req.rating,
                user_id: user.user_id,
                anime_id,
                created_at: Utc::now(),
            };
            let inserted = ratings.insert_one(&rating, None).await?;
            Rating {
                id: inserted.inserted_id.as_object_id(),
                ..rating
            }
        }
    };

    // Best-effort aggregate refresh; failure is logged, never returned.
    recalculate_average_rating(&db, anime_id).await;

    let usernames = lookup_usernames(&db, &[user.user_id]).await?;

    Ok(HttpResponse::Ok().json(RatingEnvelope::new(RatingResponse {
        id: stored.id.map(|id| id.to_hex()).unwrap_or_default(),
        rating: stored.rating,
        user: UserRef {
            id: user.user_id.to_hex(),
            username: usernames.get(&user.user_id).cloned().unwrap_or_default(),
        },
        anime_id: anime_id.to_hex(),
        created_at: stored.created_at,
    })))
}
