use crate::models::Anime;
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::Database;

struct SeedAnime {
    title: &'static str,
    description: &'static str,
    image: &'static str,
    genre: &'static [&'static str],
}

const CATALOG: &[SeedAnime] = &[
    SeedAnime {
        title: "Attack on Titan",
        description: "In a world where humanity lives inside cities surrounded by enormous walls due to the Titans, gigantic humanoid creatures who devour humans seemingly without reason.",
        image: "aot.png",
        genre: &["Action", "Drama", "Fantasy"],
    },
    SeedAnime {
        title: "Black Clover",
        description: "Asta and Yuno were abandoned at the same church on the same day. While Yuno has talent with magic, Asta has none. They both dream of becoming the Wizard King.",
        image: "black clover.png",
        genre: &["Action", "Comedy", "Fantasy"],
    },
    SeedAnime {
        title: "Bleach",
        description: "High school student Ichigo Kurosaki, who has the ability to see ghosts, gains soul reaper powers from Rukia Kuchiki and sets out to save the world from evil spirits.",
        image: "bleach.png",
        genre: &["Action", "Adventure", "Supernatural"],
    },
    SeedAnime {
        title: "Dragon Ball Z",
        description: "After learning that he is from another planet, a warrior named Goku and his friends are prompted to defend it from an onslaught of extraterrestrial enemies.",
        image: "dbz.png",
        genre: &["Action", "Adventure", "Comedy"],
    },
    SeedAnime {
        title: "Death Note",
        description: "An intelligent high school student goes on a secret crusade to eliminate criminals from the world after discovering a notebook capable of killing anyone whose name is written into it.",
        image: "death notr.png",
        genre: &["Mystery", "Psychological", "Thriller"],
    },
    SeedAnime {
        title: "Demon Slayer",
        description: "A family is attacked by demons and only two members survive - Tanjiro and his sister Nezuko, who is turning into a demon slowly. Tanjiro sets out to become a demon slayer.",
        image: "demon slayer.png",
        genre: &["Action", "Supernatural", "Historical"],
    },
    SeedAnime {
        title: "Jujutsu Kaisen",
        description: "A boy swallows a cursed talisman - the finger of a demon - and becomes cursed himself. He enters a shaman school to be able to locate the demons other body parts and thus exorcise himself.",
        image: "jjk.png",
        genre: &["Action", "Supernatural", "School"],
    },
    SeedAnime {
        title: "My Hero Academia",
        description: "In a world where most people have superpowers called Quirks, a boy born without them dreams of becoming a hero and enrolls in a prestigious hero academy.",
        image: "my hero.png",
        genre: &["Action", "Comedy", "School"],
    },
    SeedAnime {
        title: "Naruto",
        description: "Naruto Uzumaki, a young ninja who seeks recognition from his peers and dreams of becoming the Hokage, the leader of his village.",
        image: "naruto.png",
        genre: &["Action", "Adventure", "Comedy"],
    },
    SeedAnime {
        title: "One Piece",
        description: "Follows the adventures of Monkey D. Luffy and his pirate crew in order to find the greatest treasure ever left by the legendary Pirate, Gold Roger.",
        image: "one piece.png",
        genre: &["Action", "Adventure", "Comedy"],
    },
];

/// Inserts the initial catalog when the `anime` collection is empty.
/// An already-populated catalog is left untouched.
pub async fn seed_catalog(db: &Database) -> Result<(), anyhow::Error> {
    let collection = db.collection::<Anime>("anime");

    let existing = collection.count_documents(doc! {}, None).await?;
    if existing > 0 {
        log::debug!("Catalog already seeded ({} entries)", existing);
        return Ok(());
    }

    let now = Utc::now();
    let entries: Vec<Anime> = CATALOG
        .iter()
        .map(|seed| Anime {
            id: None,
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            image: seed.image.to_string(),
            genre: seed.genre.iter().map(|g| g.to_string()).collect(),
            likes: Vec::new(),
            average_rating: 0.0,
            total_ratings: 0,
            created_at: now,
        })
        .collect();

    collection.insert_many(&entries, None).await?;
    log::info!("Seeded catalog with {} anime", entries.len());

    Ok(())
}
