mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppConfig, middleware::auth::AuthMiddleware, services::auth_service::TokenSigner};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting HR3 Management service...");
    log::info!("📊 Database: {} ({})", config.database_name, config.mongodb_uri);
    log::info!("🔐 Auth: {:?} tokens, {:?} policy, TTL {}s", config.auth_mode, config.auth_policy, config.token_ttl_secs);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&config.mongodb_uri, &config.database_name)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
        })?;

    let db_data = web::Data::new(db);

    log::info!("✅ MongoDB connected successfully");

    let signer = Arc::new(TokenSigner::new(
        &config.token_secret,
        chrono::Duration::seconds(config.token_ttl_secs),
    ));

    let bind = (config.host.clone(), config.port);

    log::info!("🌐 Server starting on {}:{}", bind.0, bind.1);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", bind.0, bind.1);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", bind.0, bind.1);

    let config_data = web::Data::new(config);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = config_data
            .cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(web::Data::from(signer.clone()))
            .app_data(config_data.clone())
            .wrap(AuthMiddleware::new(
                signer.clone(),
                config_data.auth_mode,
                config_data.auth_policy,
            ))
            .wrap(middleware::RequestMetrics)
            .wrap(cors)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await
}
