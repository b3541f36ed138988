use crate::auth::{create_token, hash_password, verify_password, AuthenticatedUser, Claims};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, LoginRequest, RegisterRequest, User, UserEnvelope, UserResponse,
};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::Database;
use serde_json::json;
use uuid::Uuid;

fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), ApiError> {
    // Bounds count characters, not bytes.
    let username_len = username.chars().count();
    if username_len < 3 || username_len > 30 {
        return Err(ApiError::Validation(
            "Username must be 3-30 characters".to_string(),
        ));
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(ApiError::Validation(
            "Please provide a valid email".to_string(),
        ));
    }
    if password.len() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Invalid username, email or password"),
        (status = 409, description = "User already exists")
    ),
    tag = "auth"
)]
pub async fn register(
    req: web::Json<RegisterRequest>,
    db: web::Data<Database>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let username = req.username.trim().to_string();
    validate_registration(&username, &req.email, &req.password)?;

    let users = db.collection::<User>("users");

    let existing = users
        .find_one(
            doc! { "$or": [ { "email": req.email.as_str() }, { "username": username.as_str() } ] },
            None,
        )
        .await?;

    if existing.is_some() {
        return Err(ApiError::Conflict(
            "User with this email or username already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    let user = User {
        id: None,
        username,
        email: req.email.clone(),
        password_hash,
        is_guest: false,
        saved_anime: Vec::new(),
        created_at: Utc::now(),
    };

    let inserted = users.insert_one(&user, None).await?;
    let user_id = inserted
        .inserted_id
        .as_object_id()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("Inserted id was not an ObjectId")))?;

    let claims = Claims::new(user_id, user.email.clone(), config.jwt.expiration_hours);
    let token = create_token(&claims, &config.jwt.secret)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        success: true,
        token,
        user: UserResponse::from(User {
            id: Some(user_id),
            ..user
        }),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "User not found")
    ),
    tag = "auth"
)]
pub async fn login(
    req: web::Json<LoginRequest>,
    db: web::Data<Database>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let users = db.collection::<User>("users");

    let user = users
        .find_one(doc! { "email": req.email.as_str() }, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    // Guest accounts carry no usable credential.
    let is_valid = !user.is_guest && verify_password(&req.password, &user.password_hash)?;
    if !is_valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let user_id = user
        .id
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("Stored user has no id")))?;

    let claims = Claims::new(user_id, user.email.clone(), config.jwt.expiration_hours);
    let token = create_token(&claims, &config.jwt.secret)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        token,
        user: UserResponse::from(user),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/guest",
    responses(
        (status = 201, description = "Guest account created", body = AuthResponse)
    ),
    tag = "auth"
)]
pub async fn guest_login(
    db: web::Data<Database>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let users = db.collection::<User>("users");

    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("guest_{}", &suffix[..8]);
    let email = format!("{}@guest.local", username);

    let user = User {
        id: None,
        username,
        email,
        password_hash: String::new(),
        is_guest: true,
        saved_anime: Vec::new(),
        created_at: Utc::now(),
    };

    let inserted = users.insert_one(&user, None).await?;
    let user_id = inserted
        .inserted_id
        .as_object_id()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("Inserted id was not an ObjectId")))?;

    let claims = Claims::new(user_id, user.email.clone(), config.jwt.expiration_hours);
    let token = create_token(&claims, &config.jwt.secret)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        success: true,
        token,
        user: UserResponse::from(User {
            id: Some(user_id),
            ..user
        }),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserEnvelope),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "auth"
)]
pub async fn me(
    user: AuthenticatedUser,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let users = db.collection::<User>("users");

    let current = users
        .find_one(doc! { "_id": user.user_id }, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserEnvelope::new(UserResponse::from(current))))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "auth"
)]
pub async fn logout(_user: AuthenticatedUser) -> Result<HttpResponse, ApiError> {
    // Tokens are stateless; the client discards its copy.
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Logged out"
    })))
}
