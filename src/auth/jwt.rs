use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id (ObjectId hex)
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: ObjectId, email: String, expiration_hours: i64) -> Self {
        let now = Utc::now();
        Claims {
            sub: user_id.to_hex(),
            email,
            exp: (now + Duration::hours(expiration_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn create_token(claims: &Claims, secret: &str) -> Result<String, anyhow::Error> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, anyhow::Error> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip_preserves_claims() {
        let user_id = ObjectId::new();
        let claims = Claims::new(user_id, "a@b.com".to_string(), 24);
        let token = create_token(&claims, "test-secret").unwrap();

        let decoded = verify_token(&token, "test-secret").unwrap();
        assert_eq!(decoded.sub, user_id.to_hex());
        assert_eq!(decoded.email, "a@b.com");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::new(ObjectId::new(), "a@b.com".to_string(), 24);
        let token = create_token(&claims, "test-secret").unwrap();

        assert!(verify_token(&token, "other-secret").is_err());
    }
}
