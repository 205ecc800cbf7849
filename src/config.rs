use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use secrecy::SecretString;

use crate::auth::AdminSecret;
use crate::error::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DATABASE_URL: &str = "sqlite://city_explorer.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub admin_secret: AdminSecret,
    pub cors_origin: String,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up
    /// a `.env` file.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let admin_secret = var("ADMIN_SECRET").map(SecretString::from);
        if admin_secret.is_none() {
            tracing::warn!("ADMIN_SECRET is not set, admin endpoints will reject every request");
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port: parse_or("PORT", var("PORT"), DEFAULT_PORT)?,
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                var("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            admin_secret: AdminSecret::new(admin_secret),
            cors_origin: var("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into()),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, Error> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| Error::config_error(format!("invalid listen address {}:{}", self.host, self.port)))
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, Error> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::config_error(format!("{key} has an invalid value '{value}'"))),
        None => Ok(default),
    }
}
