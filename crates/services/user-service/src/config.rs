//! User service configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use common::{DatabaseConfig, Environment, ServerConfig};

/// Demographic lookup endpoints and timeout budget.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Age inference service
    pub agify_url: String,
    /// Gender inference service
    pub genderize_url: String,
    /// Nationality inference service
    pub nationalize_url: String,
    /// Timeout for each lookup and for the joined fan-out, in milliseconds
    pub timeout_ms: u64,
}

impl EnrichmentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            agify_url: "https://api.agify.io".to_string(),
            genderize_url: "https://api.genderize.io".to_string(),
            nationalize_url: "https://api.nationalize.io".to_string(),
            timeout_ms: 3000,
        }
    }
}

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Deployment environment (local, dev, prod)
    pub environment: Environment,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Demographic lookup settings
    pub enrichment: EnrichmentConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            environment: parsed(&lookup, "APP_ENV").unwrap_or(defaults.environment),
            database: DatabaseConfig {
                url: database_url(&lookup).unwrap_or(defaults.database.url),
                max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: defaults.database.min_connections,
                idle_timeout_secs: parsed(&lookup, "HTTP_IDLE_TIMEOUT")
                    .or(defaults.database.idle_timeout_secs),
            },
            server: ServerConfig {
                host: lookup("HTTP_ADDRESS").unwrap_or(defaults.server.host),
                port: parsed(&lookup, "HTTP_PORT").unwrap_or(defaults.server.port),
                request_timeout_secs: parsed(&lookup, "HTTP_TIMEOUT")
                    .unwrap_or(defaults.server.request_timeout_secs),
            },
            enrichment: EnrichmentConfig {
                agify_url: lookup("AGIFY_URL").unwrap_or(defaults.enrichment.agify_url),
                genderize_url: lookup("GENDERIZE_URL")
                    .unwrap_or(defaults.enrichment.genderize_url),
                nationalize_url: lookup("NATIONALIZE_URL")
                    .unwrap_or(defaults.enrichment.nationalize_url),
                timeout_ms: parsed(&lookup, "ENRICH_TIMEOUT_MS")
                    .unwrap_or(defaults.enrichment.timeout_ms),
            },
        }
    }
}

/// Parse a variable, treating unparseable values as unset.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

/// `DATABASE_URL` wins; otherwise compose one when every `DB_*` part is set.
fn database_url(lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    if let Some(url) = lookup("DATABASE_URL") {
        return Some(url);
    }

    let host = lookup("DB_HOST")?;
    let port = lookup("DB_PORT")?;
    let user = lookup("DB_USER")?;
    let password = lookup("DB_PASSWORD")?;
    let name = lookup("DB_NAME")?;
    let ssl_mode = lookup("DB_SSLMODE").unwrap_or_else(|| "disable".to_string());

    Some(DatabaseConfig::postgres_url(
        &host, &port, &user, &password, &name, &ssl_mode,
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> UserServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        UserServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.environment, Environment::Local);
        assert_eq!(config.server.port, 8082);
        assert_eq!(config.server.request_timeout_secs, 4);
        assert_eq!(config.enrichment.timeout_ms, 3000);
        assert_eq!(config.enrichment.agify_url, "https://api.agify.io");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("APP_ENV", "prod"),
            ("HTTP_ADDRESS", "127.0.0.1"),
            ("HTTP_PORT", "9000"),
            ("HTTP_TIMEOUT", "10"),
            ("ENRICH_TIMEOUT_MS", "500"),
            ("AGIFY_URL", "http://localhost:1/agify"),
        ]);
        assert_eq!(config.environment, Environment::Prod);
        assert_eq!(config.server.addr(), "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout_secs, 10);
        assert_eq!(config.enrichment.timeout(), Duration::from_millis(500));
        assert_eq!(config.enrichment.agify_url, "http://localhost:1/agify");
    }

    #[test]
    fn test_unparseable_values_fall_back_to_defaults() {
        let config = config_from(&[("HTTP_PORT", "not-a-port"), ("APP_ENV", "staging")]);
        assert_eq!(config.server.port, 8082);
        assert_eq!(config.environment, Environment::Local);
    }

    #[test]
    fn test_database_url_composed_from_parts() {
        let config = config_from(&[
            ("DB_HOST", "db"),
            ("DB_PORT", "5433"),
            ("DB_USER", "people"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "people"),
            ("DB_SSLMODE", "require"),
        ]);
        assert_eq!(
            config.database.url,
            "postgres://people:secret@db:5433/people?sslmode=require"
        );
    }

    #[test]
    fn test_database_url_takes_precedence() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://direct/people"),
            ("DB_HOST", "ignored"),
        ]);
        assert_eq!(config.database.url, "postgres://direct/people");
    }

    #[test]
    fn test_partial_db_parts_use_default_url() {
        let config = config_from(&[("DB_HOST", "db")]);
        assert_eq!(config.database.url, DatabaseConfig::default().url);
    }
}
