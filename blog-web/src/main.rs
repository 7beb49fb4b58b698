use dotenvy::dotenv;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use application::{BlogService, TagService};
use data::{post_repository::PostgresPostRepository, tag_repository::PostgresTagRepository};
use infrastructure::{
    config::AppConfig,
    database::{create_pool, run_migrations},
    jwt::JwtService,
    logging::init_logging,
};
use presentation::{routes, templates::TemplateEngine};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    init_logging();

    let config = AppConfig::from_env()?;
    let addr = format!("0.0.0.0:{}", config.http_port);

    tracing::info!("Starting blog server...");
    tracing::info!("HTTP server will listen on {}", addr);
    tracing::info!("CORS allowed origins: {}", config.cors_allowed_origins);

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;
    tracing::info!("Migrations completed successfully");

    // Initialize services
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret)?);

    let post_repo = Arc::new(PostgresPostRepository::new(pool.clone()));
    let tag_repo = Arc::new(PostgresTagRepository::new(pool));

    let blog_service = Arc::new(BlogService::new(post_repo, config.posts_per_page));
    let tag_service = Arc::new(TagService::new(tag_repo));
    let templates = Arc::new(TemplateEngine::new());

    tracing::info!("Services initialized successfully");

    let cors_allowed_origins = config.cors_allowed_origins.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(&cors_allowed_origins))
            .app_data(web::Data::new(jwt_service.clone()))
            .app_data(web::Data::new(blog_service.clone()))
            .app_data(web::Data::new(tag_service.clone()))
            .app_data(web::Data::new(templates.clone()))
            .configure(routes::configure)
    })
    .bind(&addr)?
    .run();

    tracing::info!("HTTP server running on {}", addr);

    server.await?;

    tracing::info!("Shutting down...");
    Ok(())
}

/// Configure CORS for the HTTP server with allowed origins from the environment
fn configure_cors(allowed_origins: &str) -> actix_cors::Cors {
    use actix_cors::Cors;
    use actix_web::http::header;

    let origins: Vec<&str> = allowed_origins.split(',').map(|s| s.trim()).collect();

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600);

    for origin in origins {
        if !origin.is_empty() {
            cors = cors.allowed_origin(origin);
            tracing::debug!("Added allowed CORS origin: {}", origin);
        }
    }

    cors
}
