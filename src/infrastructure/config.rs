use anyhow::{Context, Result, bail};

pub const DEFAULT_DATABASE_URL: &str = "memory://";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Document store selected by `DATABASE_URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = lookup("HOST")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT").filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .context("JWT_SECRET must be set")?;

        let config = Self {
            database_url,
            host,
            port,
            jwt_secret,
        };
        config.store_backend()?;
        Ok(config)
    }

    pub fn store_backend(&self) -> Result<StoreBackend> {
        match self.database_url.split_once("://") {
            Some(("memory", _)) => Ok(StoreBackend::InMemory),
            Some((scheme, _)) => bail!("unsupported DATABASE_URL scheme: {}", scheme),
            None => bail!("DATABASE_URL is not a URL: {}", self.database_url),
        }
    }
}
