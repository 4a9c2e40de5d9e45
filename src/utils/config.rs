use std::env;
use std::time::Duration;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub redis_url: Option<String>,
    pub jwt_secret: String,
    pub name_cache_ttl: Duration,
    pub name_cache_capacity: u64,
    pub service_name: String,
}

/// Service label echoed in every response envelope.
pub fn service_name() -> String {
    env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string())
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| "PORT must be a valid number")?,
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "rust_blogdb".to_string()),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            jwt_secret: env::var("JWT_SECRET").map_err(|_| "JWT_SECRET is required")?,
            name_cache_ttl: Duration::from_secs(
                env::var("NAME_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .map_err(|_| "NAME_CACHE_TTL_SECS must be a valid number")?,
            ),
            name_cache_capacity: env::var("NAME_CACHE_CAPACITY")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .map_err(|_| "NAME_CACHE_CAPACITY must be a valid number")?,
            service_name: service_name(),
        })
    }
}
