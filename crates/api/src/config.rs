use anyhow::{anyhow, bail, Result};
use infra::db::DbConfig;
use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub store_backend: StoreBackend,
    pub port: u16,
    pub gql_introspection: bool,
    pub allowed_origins: Vec<String>,
    pub skip_auto_migrate: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_max_connections: 30,
            store_backend: StoreBackend::Postgres,
            port: 8080,
            gql_introspection: false,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            skip_auto_migrate: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let flag = |key: &str| {
            lookup(key)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };

        let store_backend = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("unknown STORE_BACKEND `{other}` (expected postgres or memory)"),
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.database_max_connections),
            store_backend,
            port: match lookup("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|e| anyhow!("invalid PORT `{port}`: {e}"))?,
                None => defaults.port,
            },
            gql_introspection: flag("GQL_INTROSPECTION"),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.allowed_origins),
            skip_auto_migrate: flag("SKIP_AUTO_MIGRATE"),
        })
    }

    pub fn db_config(&self) -> Result<DbConfig> {
        let url = self
            .database_url
            .clone()
            .ok_or_else(|| anyhow!("DATABASE_URL must be set for the postgres backend"))?;
        Ok(DbConfig {
            url,
            max_connections: self.database_max_connections,
        })
    }
}
