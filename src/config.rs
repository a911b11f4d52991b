use std::env;
use std::fmt;

/// Where the server delivers and reads the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// HTTP-only `token` cookie set by `POST /jwt`
    Cookie,
    /// Bare token returned by `POST /jwt`, sent back as `Authorization: Bearer`
    Bearer,
}

impl AuthMode {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cookie" => Ok(AuthMode::Cookie),
            "bearer" | "header" => Ok(AuthMode::Bearer),
            other => Err(ConfigError::InvalidValue(format!(
                "AUTH_MODE must be 'cookie' or 'bearer', got '{}'",
                other
            ))),
        }
    }
}

/// Which routes require a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Every POST/PUT/PATCH/DELETE except the token routes
    Writes,
    /// Only payment creation
    Payments,
}

impl AuthPolicy {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "writes" => Ok(AuthPolicy::Writes),
            "payments" => Ok(AuthPolicy::Payments),
            other => Err(ConfigError::InvalidValue(format!(
                "AUTH_POLICY must be 'writes' or 'payments', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingEnvVar(String),
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingEnvVar(name) => write!(f, "Missing environment variable: {}", name),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub token_secret: String,
    pub token_ttl_secs: i64,
    pub auth_mode: AuthMode,
    pub auth_policy: AuthPolicy,
    pub production: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so tests don't have to
    /// mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue(format!("PORT: {}", e)))?,
            None => 3030,
        };

        let mongodb_uri =
            lookup("MONGODB_URI").unwrap_or_else(|| "mongodb://localhost:27017".to_string());
        let database_name =
            lookup("MONGODB_DATABASE").unwrap_or_else(|| "hr3_management".to_string());

        let token_secret = lookup("ACCESS_TOKEN_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("ACCESS_TOKEN_SECRET".to_string()))?;

        let token_ttl_secs = match lookup("TOKEN_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::InvalidValue(format!("TOKEN_TTL_SECS: {}", e)))?,
            None => 3600,
        };
        if token_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue(
                "TOKEN_TTL_SECS must be greater than 0".to_string(),
            ));
        }

        let auth_mode = match lookup("AUTH_MODE") {
            Some(raw) => AuthMode::parse(&raw)?,
            None => AuthMode::Cookie,
        };
        let auth_policy = match lookup("AUTH_POLICY") {
            Some(raw) => AuthPolicy::parse(&raw)?,
            None => AuthPolicy::Writes,
        };

        let production = lookup("APP_ENV")
            .map(|env| env.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            mongodb_uri,
            database_name,
            token_secret,
            token_ttl_secs,
            auth_mode,
            auth_policy,
            production,
            cors_origins,
        })
    }
}
