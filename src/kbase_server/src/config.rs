use std::path::PathBuf;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Directory uploaded files are written to and served from.
    pub uploads_dir: PathBuf,
    /// Base URL used in upload responses. When unset, the request's `Host`
    /// header is used.
    pub public_url: Option<String>,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Largest accepted upload body, in bytes.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var          | Default          |
    /// |------------------|------------------|
    /// | `HOST`           | `0.0.0.0`        |
    /// | `PORT`           | `3001`           |
    /// | `DATABASE_URL`   | (required)       |
    /// | `UPLOADS_DIR`    | `public/uploads` |
    /// | `PUBLIC_URL`     | (request host)   |
    /// | `CORS_ORIGINS`   | (any origin)     |
    /// | `MAX_UPLOAD_MB`  | `25`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var("PORT", 3001)?;
        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let uploads_dir = var("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public/uploads"));
        let public_url = var("PUBLIC_URL").map(|url| url.trim_end_matches('/').to_string());
        let max_upload_mb: usize = parse_var("MAX_UPLOAD_MB", 25)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            database_url,
            uploads_dir,
            public_url,
            cors_origins,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match var(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
