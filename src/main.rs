use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod api;
mod auth;
mod config;
mod db;
mod error;
mod models;
mod services;

use config::Config;
use db::{create_mongodb_client, ensure_indexes, seed_catalog};

async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "error": "Route not found"
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().expect("Failed to load configuration");

    log::info!(
        "Starting server on {}:{}",
        config.server.host,
        config.server.port
    );

    let db = create_mongodb_client(&config)
        .await
        .expect("Failed to create MongoDB client");

    ensure_indexes(&db).await.expect("Failed to create indexes");
    seed_catalog(&db).await.expect("Failed to seed catalog");

    log::info!("Database connection established");

    let openapi = api::ApiDoc::openapi();

    let server_host = config.server.host.clone();
    let server_port = config.server.port;
    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(db.clone()))
            .route(
                "/api/docs",
                web::get().to(|| async {
                    actix_web::HttpResponse::PermanentRedirect()
                        .append_header(("Location", "/api/docs/"))
                        .finish()
                }),
            )
            .service(
                SwaggerUi::new("/api/docs/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(api::health))
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(api::auth::register))
                            .route("/login", web::post().to(api::auth::login))
                            .route("/guest", web::post().to(api::auth::guest_login))
                            .route("/me", web::get().to(api::auth::me))
                            .route("/logout", web::post().to(api::auth::logout)),
                    )
                    .service(
                        web::scope("/anime")
                            .route("", web::get().to(api::anime::get_all_anime))
                            .route(
                                "/recommendations",
                                web::get().to(api::anime::get_recommendations),
                            )
                            .route("/saved", web::get().to(api::anime::get_saved_anime))
                            .route("/{id}", web::get().to(api::anime::get_anime_by_id))
                            .route("/{id}/like", web::post().to(api::anime::like_anime))
                            .route("/{id}/save", web::post().to(api::anime::save_anime)),
                    )
                    .service(
                        web::scope("/comments")
                            .route(
                                "/anime/{anime_id}",
                                web::get().to(api::comment::get_comments_by_anime),
                            )
                            .route("/anime/{anime_id}", web::post().to(api::comment::add_comment))
                            .route("/{id}", web::delete().to(api::comment::delete_comment)),
                    )
                    .service(
                        web::scope("/ratings")
                            .route(
                                "/anime/{anime_id}",
                                web::get().to(api::rating::get_ratings_by_anime),
                            )
                            .route(
                                "/anime/{anime_id}/user",
                                web::get().to(api::rating::get_user_rating),
                            )
                            .route(
                                "/anime/{anime_id}",
                                web::post().to(api::rating::add_or_update_rating),
                            ),
                    )
                    .default_service(web::route().to(route_not_found)),
            )
            .service(Files::new("/uploads", config.assets.uploads_dir.clone()));

        if config.server.production {
            // The client bundle answers every unmatched non-API path.
            let index_path = format!("{}/index.html", config.assets.frontend_build_dir);
            app = app.service(
                Files::new("/", config.assets.frontend_build_dir.clone())
                    .index_file("index.html")
                    .default_handler(fn_service(move |req: ServiceRequest| {
                        let index_path = index_path.clone();
                        async move {
                            let (req, _) = req.into_parts();
                            let file = NamedFile::open_async(&index_path).await?;
                            let res = file.into_response(&req);
                            Ok(ServiceResponse::new(req, res))
                        }
                    })),
            );
        } else {
            app = app.default_service(web::route().to(route_not_found));
        }

        app
    })
    .bind(format!("{}:{}", server_host, server_port))?
    .run()
    .await
}
