use anyhow::{bail, Context, Result};

/// Runtime configuration, read once at startup from the environment
/// (optionally seeded from a .env file).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub http_port: u16,
    pub posts_per_page: u32,
    pub jwt_secret: String,
    pub cors_allowed_origins: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let database_max_connections = env_or("DATABASE_MAX_CONNECTIONS", "5")
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a number")?;
        let http_port = env_or("HTTP_PORT", "3000")
            .parse()
            .context("HTTP_PORT must be a port number")?;
        let posts_per_page: u32 = env_or("POSTS_PER_PAGE", "10")
            .parse()
            .context("POSTS_PER_PAGE must be a number")?;
        if posts_per_page == 0 {
            bail!("POSTS_PER_PAGE must be at least 1");
        }

        let cors_allowed_origins = env_or(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:8000,http://127.0.0.1:8000",
        );

        Ok(Self {
            database_url,
            database_max_connections,
            http_port,
            posts_per_page,
            jwt_secret,
            cors_allowed_origins,
        })
    }
}
