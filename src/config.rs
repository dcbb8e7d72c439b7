use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sea-orm connection string (default: a local SQLite file)
    pub database_url: String,

    /// Listen address (default: "0.0.0.0:3000")
    pub bind_addr: String,

    /// JWT signing key for operator tokens
    pub secret: String,

    /// Operator token lifetime in hours (default: 24)
    pub token_ttl_hours: i64,

    /// Directory holding uploaded images (default: "./media")
    pub media_root: PathBuf,

    /// Maximum upload size in bytes (default: 5 MB)
    pub file_size_limit: usize,

    /// Operator seeded at startup when missing
    pub admin_username: String,
    pub admin_password: Option<String>,

    /// Admin index branding
    pub site_header: String,
    pub index_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://mobile_store.db?mode=rwc".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            secret: String::new(),
            token_ttl_hours: 24,
            media_root: PathBuf::from("./media"),
            file_size_limit: 5 * 1024 * 1024, // 5 MB
            admin_username: "admin".to_string(),
            admin_password: None,
            site_header: "mobile store".to_string(),
            index_title: "admin store".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables. `SECRET` is mandatory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();

        let secret = env::var("SECRET").map_err(|_| ConfigError::Missing("SECRET"))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::Missing("SECRET"));
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),
            bind_addr: env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            secret,
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS")?.unwrap_or(default.token_ttl_hours),
            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or(default.media_root),
            file_size_limit: parse_var("FILE_SIZE_LIMIT")?.unwrap_or(default.file_size_limit),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or(default.admin_username),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            site_header: env::var("SITE_HEADER").unwrap_or(default.site_header),
            index_title: env::var("INDEX_TITLE").unwrap_or(default.index_title),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.file_size_limit, 5 * 1024 * 1024);
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.site_header, "mobile store");
        assert_eq!(config.index_title, "admin store");
        assert!(config.admin_password.is_none());
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("MOBILE_STORE_TEST_LIMIT", "lots");
        let parsed: Result<Option<usize>, _> = parse_var("MOBILE_STORE_TEST_LIMIT");
        assert!(matches!(parsed, Err(ConfigError::Invalid { .. })));
        env::remove_var("MOBILE_STORE_TEST_LIMIT");
    }

    #[test]
    fn test_parse_var_missing_is_none() {
        let parsed: Option<u16> = parse_var("MOBILE_STORE_TEST_UNSET").unwrap();
        assert!(parsed.is_none());
    }
}
