//! Process configuration read once at startup.

use crate::auth::jwt::JwtConfig;

/// Settings for the HTTP server and its token signing.
///
/// Everything except `JWT_SECRET` has a local-development default, so a
/// `.env` with just the secret and `DATABASE_URL` is enough to run.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address, `HOST` (default `0.0.0.0`).
    pub host: String,
    /// Bind port, `PORT` (default `8000`).
    pub port: u16,
    /// Allowed CORS origins, `CORS_ORIGINS` as a comma-separated list
    /// (default `http://localhost:5173`, the Vite dev server).
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds, `REQUEST_TIMEOUT_SECS` (default `30`).
    pub request_timeout_secs: u64,
    /// Token secret and lifetimes, see [`JwtConfig::from_env`].
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Assemble the configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric variables and on a missing
    /// `JWT_SECRET`; a server with a broken config should not come up.
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".into())
                .parse()
                .expect("PORT must be a valid u16"),
            cors_origins,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a valid u64"),
            jwt: JwtConfig::from_env(),
        }
    }
}
