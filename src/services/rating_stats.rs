use crate::models::{Anime, Rating};
use log::{debug, error};
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::Database;

/// Recomputes an anime's `average_rating`/`total_ratings` from the full
/// `ratings` collection and writes them back. Runs after every rating
/// create, update or delete. Best-effort: a failure here is logged and
/// never surfaced to the request that triggered it. The rating write and
/// this write-back are not transactional; concurrent recomputations for
/// one anime converge on the next rating event.
pub async fn recalculate_average_rating(db: &Database, anime_id: ObjectId) {
    if let Err(e) = recalculate(db, anime_id).await {
        error!(
            "Failed to recalculate average rating for anime {}: {:?}",
            anime_id, e
        );
    }
}

async fn recalculate(db: &Database, anime_id: ObjectId) -> Result<(), mongodb::error::Error> {
    let ratings = db.collection::<Rating>("ratings");

    let pipeline = vec![
        doc! { "$match": { "anime_id": anime_id } },
        doc! { "$group": {
            "_id": "$anime_id",
            "average_rating": { "$avg": "$rating" },
            "total_ratings": { "$sum": 1 },
        }},
    ];

    let mut cursor = ratings.aggregate(pipeline, None).await?;

    // No ratings left resets the aggregate to zero.
    let (average, total) = if cursor.advance().await? {
        let result = cursor.deserialize_current()?;
        let average = result.get_f64("average_rating").unwrap_or(0.0);
        let total = i64::from(result.get_i32("total_ratings").unwrap_or(0));
        (round_one_decimal(average), total)
    } else {
        (0.0, 0)
    };

    db.collection::<Anime>("anime")
        .update_one(
            doc! { "_id": anime_id },
            doc! { "$set": { "average_rating": average, "total_ratings": total } },
            None,
        )
        .await?;

    debug!(
        "Anime {} aggregate updated: average={}, total={}",
        anime_id, average, total
    );

    Ok(())
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_one_decimal(4.0 / 3.0), 1.3);
        assert_eq!(round_one_decimal(11.0 / 3.0), 3.7);
        assert_eq!(round_one_decimal(4.25), 4.3);
        assert_eq!(round_one_decimal(0.0), 0.0);
        assert_eq!(round_one_decimal(5.0), 5.0);
    }
}
