/// Configuration management for the web server
///
/// Configuration comes from environment variables. A `.env` file in the
/// working directory is loaded first when present.
///
/// # Environment Variables
///
/// - `APP_HOST`: Host to bind to (default: 0.0.0.0)
/// - `APP_PORT`: Port to bind to (default: 8080)
/// - `APP_PRODUCTION`: Production mode, enables HSTS and secure cookies (default: false)
/// - `APP_EXPOSE_ERROR_DETAILS`: Show database error text on pages (default: not production)
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `SESSION_COOKIE_NAME`: Login cookie name (default: taskdesk_session)
/// - `SESSION_TTL_HOURS`: Login lifetime in hours (default: 24)
/// - `RUN_MIGRATIONS`: Create the database if missing and apply migrations at startup (default: true)
/// - `RUST_LOG`: Log filter (default: taskdesk_web=debug,tower_http=debug)
/// - `LOG_FORMAT`: `json` for JSON log lines
///
/// # Example
///
/// ```no_run
/// use taskdesk_web::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use taskdesk_shared::db::pool;

/// Default login cookie name
pub const DEFAULT_COOKIE_NAME: &str = "taskdesk_session";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub app: AppConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Login session configuration
    pub session: SessionConfig,

    /// Apply pending migrations before serving
    pub run_migrations: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Production mode
    pub production: bool,

    /// Include raw error text in the system-error message
    pub expose_error_details: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    #[serde(skip_serializing)]
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Login session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token
    pub cookie_name: String,

    /// How long a login lasts
    pub ttl_hours: i64,

    /// Mark the cookie `Secure` (set in production)
    pub secure_cookie: bool,
}

impl DatabaseConfig {
    /// Pool settings for this database, other knobs at their defaults
    pub fn pool_config(&self) -> pool::DatabaseConfig {
        pool::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            ..pool::DatabaseConfig::default()
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours)
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing
    /// - A variable has an unparseable value
    /// - The cookie name contains characters not allowed in a cookie name
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("APP_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("APP_PORT is not a valid port: {}", e))?;

        let production = parse_flag("APP_PRODUCTION", lookup("APP_PRODUCTION"), false)?;
        let expose_error_details = parse_flag(
            "APP_EXPOSE_ERROR_DETAILS",
            lookup("APP_EXPOSE_ERROR_DETAILS"),
            !production,
        )?;

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is invalid: {}", e))?;

        let cookie_name =
            lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
        if !is_valid_cookie_name(&cookie_name) {
            anyhow::bail!("SESSION_COOKIE_NAME must be a non-empty token (letters, digits, '-', '_')");
        }

        let ttl_hours = lookup("SESSION_TTL_HOURS")
            .unwrap_or_else(|| "24".to_string())
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("SESSION_TTL_HOURS is invalid: {}", e))?;
        if ttl_hours <= 0 {
            anyhow::bail!("SESSION_TTL_HOURS must be positive");
        }

        let run_migrations = parse_flag("RUN_MIGRATIONS", lookup("RUN_MIGRATIONS"), true)?;

        Ok(Self {
            app: AppConfig {
                host,
                port,
                production,
                expose_error_details,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            session: SessionConfig {
                cookie_name,
                ttl_hours,
                secure_cookie: production,
            },
            run_migrations,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn parse_flag(name: &str, value: Option<String>, default: bool) -> anyhow::Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", name, other),
    }
}

fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
