use yahub_core::listing::NEWS_COUNT_ON_HOME_PAGE;
use yahub_core::moderation::BAD_WORDS;

use crate::auth::jwt::JwtConfig;

/// Default minimum password length for signup.
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. When absent the server runs on the in-memory store.
    pub database_url: Option<String>,
    /// News items on the home page (default: `10`).
    pub news_count_on_home_page: usize,
    /// Words a comment may not contain.
    pub banned_words: Vec<String>,
    /// Minimum password length accepted at signup (default: `8`).
    pub min_password_length: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `DATABASE_URL`            | unset (memory store)       |
    /// | `NEWS_COUNT_ON_HOME_PAGE` | `10`                       |
    /// | `BANNED_WORDS`            | `редиска,негодяй`          |
    /// | `MIN_PASSWORD_LENGTH`     | `8`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let news_count_on_home_page: usize = std::env::var("NEWS_COUNT_ON_HOME_PAGE")
            .unwrap_or_else(|_| NEWS_COUNT_ON_HOME_PAGE.to_string())
            .parse()
            .expect("NEWS_COUNT_ON_HOME_PAGE must be a valid usize");

        let banned_words = std::env::var("BANNED_WORDS")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(|_| BAD_WORDS.iter().map(|w| w.to_string()).collect());

        let min_password_length: usize = std::env::var("MIN_PASSWORD_LENGTH")
            .unwrap_or_else(|_| DEFAULT_MIN_PASSWORD_LENGTH.to_string())
            .parse()
            .expect("MIN_PASSWORD_LENGTH must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            news_count_on_home_page,
            banned_words,
            min_password_length,
            jwt,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
