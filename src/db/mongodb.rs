use crate::config::Config;
use crate::models::{Anime, Rating, User};
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

pub async fn create_mongodb_client(config: &Config) -> Result<Database, anyhow::Error> {
    let client = Client::with_uri_str(&config.mongodb.uri).await?;
    let db = client.database(&config.mongodb.database);
    Ok(db)
}

/// Startup schema bootstrap: uniqueness lives in indexes, not application
/// checks alone. One rating row per (user, anime) pair is enforced here.
pub async fn ensure_indexes(db: &Database) -> Result<(), anyhow::Error> {
    let unique = IndexOptions::builder().unique(true).build();

    let users = db.collection::<User>("users");
    users
        .create_index(
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(unique.clone())
                .build(),
            None,
        )
        .await?;
    users
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique.clone())
                .build(),
            None,
        )
        .await?;

    let ratings = db.collection::<Rating>("ratings");
    ratings
        .create_index(
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "anime_id": 1 })
                .options(unique)
                .build(),
            None,
        )
        .await?;

    let anime = db.collection::<Anime>("anime");
    anime
        .create_index(
            IndexModel::builder()
                .keys(doc! { "average_rating": -1, "total_ratings": -1 })
                .build(),
            None,
        )
        .await?;

    Ok(())
}
