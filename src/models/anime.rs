use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored document for the `anime` collection. `likes` holds user ids with
/// set semantics; `average_rating`/`total_ratings` are maintained by the
/// rating stats service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anime {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub image: String,
    pub genre: Vec<String>,
    pub likes: Vec<ObjectId>,
    pub average_rating: f64,
    pub total_ratings: i64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnimeResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub genre: Vec<String>,
    pub likes: Vec<String>,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Anime> for AnimeResponse {
    fn from(anime: Anime) -> Self {
        AnimeResponse {
            id: anime.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: anime.title,
            description: anime.description,
            image: anime.image,
            genre: anime.genre,
            likes: anime.likes.iter().map(|id| id.to_hex()).collect(),
            average_rating: anime.average_rating,
            total_ratings: anime.total_ratings,
            created_at: anime.created_at,
        }
    }
}
