use std::env;
use std::fmt;

pub const DEFAULT_MYSQL_PORT: u16 = 3306;
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Process configuration, read once at startup and passed to every component
/// that needs it.
#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// Shared secret expected in the `X-API-KEY` header
    pub api_key: Option<String>,
    /// HTTP listen port
    pub port: u16,
    /// Run the schema initializer before accepting requests
    pub init_db_on_startup: bool,
}

/// MySQL connection parameters. Absent values are not validated here; they
/// surface as connection failures when a request first touches the store.
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Empty values count
    /// as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            database: DatabaseConfig {
                host: get("MYSQLHOST"),
                user: get("MYSQLUSER"),
                password: get("MYSQLPASSWORD"),
                database: get("MYSQLDATABASE"),
                port: parse_or("MYSQLPORT", get("MYSQLPORT"), DEFAULT_MYSQL_PORT),
            },
            api_key: get("API_KEY"),
            port: parse_or("PORT", get("PORT"), DEFAULT_HTTP_PORT),
            init_db_on_startup: parse_or("INIT_DB_ON_STARTUP", get("INIT_DB_ON_STARTUP"), true),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + fmt::Display + Copy,
{
    match raw {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{}={:?} is not valid, using {}", key, v, default);
            default
        }),
        None => default,
    }
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() { "<set>" } else { "<unset>" }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database", &self.database)
            .field("api_key", &redact(&self.api_key))
            .field("port", &self.port)
            .field("init_db_on_startup", &self.init_db_on_startup)
            .finish()
    }
}
