use crate::api::parse_object_id;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{Anime, AnimeEnvelope, AnimeListEnvelope, AnimeResponse, User};
use actix_web::{web, HttpResponse};
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::{Cursor, Database};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

const RECOMMENDATION_LIMIT: i64 = 10;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AnimeQuery {
    #[schema(example = "naruto")]
    pub search: Option<String>,
    #[schema(example = "Action")]
    pub genre: Option<String>,
}

async fn collect_anime(mut cursor: Cursor<Anime>) -> Result<Vec<AnimeResponse>, ApiError> {
    let mut results = Vec::new();
    while cursor.advance().await? {
        let anime: Anime = cursor.deserialize_current()?;
        results.push(AnimeResponse::from(anime));
    }
    Ok(results)
}

#[utoipa::path(
    get,
    path = "/api/anime",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive title substring"),
        ("genre" = Option<String>, Query, description = "Genre the anime must carry")
    ),
    responses(
        (status = 200, description = "Catalog entries, newest first", body = AnimeListEnvelope)
    ),
    tag = "anime"
)]
pub async fn get_all_anime(
    _user: Option<AuthenticatedUser>,
    db: web::Data<Database>,
    query: web::Query<AnimeQuery>,
) -> Result<HttpResponse, ApiError> {
    let mut filter = Document::new();

    if let Some(search) = query.search.as_deref() {
        filter.insert("title", doc! { "$regex": search, "$options": "i" });
    }

    if let Some(genre) = query.genre.as_deref() {
        filter.insert("genre", doc! { "$in": [genre] });
    }

    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();

    let cursor = db
        .collection::<Anime>("anime")
        .find(filter, options)
        .await?;
    let results = collect_anime(cursor).await?;

    Ok(HttpResponse::Ok().json(AnimeListEnvelope::with_count(results)))
}

#[utoipa::path(
    get,
    path = "/api/anime/recommendations",
    responses(
        (status = 200, description = "Top rated anime", body = AnimeListEnvelope)
    ),
    tag = "anime"
)]
pub async fn get_recommendations(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let options = FindOptions::builder()
        .sort(doc! { "average_rating": -1, "total_ratings": -1 })
        .limit(RECOMMENDATION_LIMIT)
        .build();

    let cursor = db
        .collection::<Anime>("anime")
        .find(doc! {}, options)
        .await?;
    let results = collect_anime(cursor).await?;

    Ok(HttpResponse::Ok().json(AnimeListEnvelope::new(results)))
}

#[utoipa::path(
    get,
    path = "/api/anime/saved",
    responses(
        (status = 200, description = "The caller's saved anime", body = AnimeListEnvelope),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "anime"
)]
pub async fn get_saved_anime(
    user: AuthenticatedUser,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let users = db.collection::<User>("users");

    let current = users
        .find_one(doc! { "_id": user.user_id }, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let cursor = db
        .collection::<Anime>("anime")
        .find(doc! { "_id": { "$in": current.saved_anime.clone() } }, None)
        .await?;
    let found = collect_anime(cursor).await?;

    // Preserve the order entries were saved in.
    let mut by_id: HashMap<String, AnimeResponse> =
        found.into_iter().map(|a| (a.id.clone(), a)).collect();
    let results: Vec<AnimeResponse> = current
        .saved_anime
        .iter()
        .filter_map(|id| by_id.remove(&id.to_hex()))
        .collect();

    Ok(HttpResponse::Ok().json(AnimeListEnvelope::new(results)))
}

#[utoipa::path(
    get,
    path = "/api/anime/{id}",
    params(
        ("id" = String, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "Catalog entry", body = AnimeEnvelope),
        (status = 404, description = "Anime not found")
    ),
    tag = "anime"
)]
pub async fn get_anime_by_id(
    _user: Option<AuthenticatedUser>,
    path: web::Path<String>,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let anime_id = parse_object_id(&path.into_inner())?;

    let anime = db
        .collection::<Anime>("anime")
        .find_one(doc! { "_id": anime_id }, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("Anime not found".to_string()))?;

    Ok(HttpResponse::Ok().json(AnimeEnvelope::new(AnimeResponse::from(anime))))
}

#[utoipa::path(
    post,
    path = "/api/anime/{id}/like",
    params(
        ("id" = String, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "Like toggled; `liked` reports the new membership"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Anime not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "anime"
)]
pub async fn like_anime(
    path: web::Path<String>,
    user: AuthenticatedUser,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let anime_id = parse_object_id(&path.into_inner())?;
    let collection = db.collection::<Anime>("anime");

    let anime = collection
        .find_one(doc! { "_id": anime_id }, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("Anime not found".to_string()))?;

    // Flip membership; repeated toggles alternate and never error.
    let liked = !anime.likes.contains(&user.user_id);
    let update = if liked {
        doc! { "$addToSet": { "likes": user.user_id } }
    } else {
        doc! { "$pull": { "likes": user.user_id } }
    };

    collection
        .update_one(doc! { "_id": anime_id }, update, None)
        .await?;

    let updated = collection
        .find_one(doc! { "_id": anime_id }, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("Anime not found".to_string()))?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": AnimeResponse::from(updated),
        "liked": liked
    })))
}

#[utoipa::path(
    post,
    path = "/api/anime/{id}/save",
    params(
        ("id" = String, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "Save toggled; `saved` reports the new membership"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Anime not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "anime"
)]
pub async fn save_anime(
    path: web::Path<String>,
    user: AuthenticatedUser,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let anime_id = parse_object_id(&path.into_inner())?;

    let anime_exists = db
        .collection::<Anime>("anime")
        .find_one(doc! { "_id": anime_id }, None)
        .await?;
    if anime_exists.is_none() {
        return Err(ApiError::NotFound("Anime not found".to_string()));
    }

    let users = db.collection::<User>("users");
    let current = users
        .find_one(doc! { "_id": user.user_id }, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let saved = !current.saved_anime.contains(&anime_id);
    let update = if saved {
        doc! { "$addToSet": { "saved_anime": anime_id } }
    } else {
        doc! { "$pull": { "saved_anime": anime_id } }
    };

    users
        .update_one(doc! { "_id": user.user_id }, update, None)
        .await?;

    let updated = users
        .find_one(doc! { "_id": user.user_id }, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let saved_ids: Vec<String> = updated.saved_anime.iter().map(|id| id.to_hex()).collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": saved_ids,
        "saved": saved
    })))
}
