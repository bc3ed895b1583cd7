use crate::errors::AppError;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Reads configuration from the process environment (after `.env`, if any).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::EnvError(format!("Invalid PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                AppError::EnvError(format!("Invalid DATABASE_MAX_CONNECTIONS '{}': {}", raw, e))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::EnvError("JWT_SECRET must be set".into()))?;

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            jwt_secret,
            allowed_origins,
        })
    }
}
