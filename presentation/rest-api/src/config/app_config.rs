use super::{
    cors_config, database_config::DatabaseSettings, error::ConfigError,
    server_config::ServerConfig, storage_config::StorageConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub database: DatabaseSettings,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&super::error::env_lookup)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_lookup(lookup)?,
            cors: cors_config::init_cors(lookup),
            database: DatabaseSettings::from_lookup(lookup)?,
            storage: StorageConfig::from_lookup(lookup)?,
        })
    }
}
