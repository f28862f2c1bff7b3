use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;
use tracing::info;

use super::error::{ConfigError, optional, parsed, required};

/// Database settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub migrations_path: String,
}

impl DatabaseSettings {
    /// Environment variables:
    /// - DATABASE_URL: full connection string. When absent it is composed from
    ///   DB_HOST, DB_PORT, DB_USER, DB_PASSWORD (required), DB_NAME and DB_SSL_MODE
    /// - DB_MAX_CONNECTIONS: pool size (default: 5)
    /// - MIGRATIONS_PATH: directory of SQL migrations
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = match optional(lookup, "DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = optional(lookup, "DB_HOST").unwrap_or_else(|| "localhost".to_string());
                let port: u16 = parsed(lookup, "DB_PORT", 5432)?;
                let user = optional(lookup, "DB_USER").unwrap_or_else(|| "postgres".to_string());
                let password = required(lookup, "DB_PASSWORD")?;
                let name = optional(lookup, "DB_NAME")
                    .unwrap_or_else(|| "product_management".to_string());
                let ssl_mode =
                    optional(lookup, "DB_SSL_MODE").unwrap_or_else(|| "disable".to_string());
                format!("postgres://{user}:{password}@{host}:{port}/{name}?sslmode={ssl_mode}")
            }
        };

        Ok(Self {
            url,
            max_connections: parsed(lookup, "DB_MAX_CONNECTIONS", 5)?,
            migrations_path: optional(lookup, "MIGRATIONS_PATH")
                .unwrap_or_else(|| "infrastructure/persistence/migrations".to_string()),
        })
    }
}

/// Connects the pool and brings the schema up to date.
pub async fn init_database(settings: &DatabaseSettings) -> anyhow::Result<PgPool> {
    let config =
        DatabaseConfig::new(settings.url.clone()).with_max_connections(settings.max_connections);
    let pool = create_postgres_pool(&config).await?;
    run_migrations(&pool, &settings.migrations_path).await?;
    info!(migrations = %settings.migrations_path, "Database ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::lookup_from;

    #[test]
    fn should_use_database_url_verbatim() {
        let lookup = lookup_from(&[("DATABASE_URL", "postgres://u:p@db/x")]);
        let settings = DatabaseSettings::from_lookup(&lookup).unwrap();
        assert_eq!(settings.url, "postgres://u:p@db/x");
        assert_eq!(settings.max_connections, 5);
    }

    #[test]
    fn should_compose_url_from_parts() {
        let lookup = lookup_from(&[
            ("DB_HOST", "db"),
            ("DB_USER", "shop"),
            ("DB_PASSWORD", "secret"),
            ("DB_MAX_CONNECTIONS", "12"),
        ]);
        let settings = DatabaseSettings::from_lookup(&lookup).unwrap();
        assert_eq!(
            settings.url,
            "postgres://shop:secret@db:5432/product_management?sslmode=disable"
        );
        assert_eq!(settings.max_connections, 12);
    }

    #[test]
    fn should_require_password_without_database_url() {
        let result = DatabaseSettings::from_lookup(&lookup_from(&[("DB_HOST", "db")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("DB_PASSWORD"));
    }
}
