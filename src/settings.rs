//! Process configuration read from the environment (and `.env`, if present).

use std::net::IpAddr;

use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_ADDRESS: [u8; 4] = [0, 0, 0, 0];
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("missing {0} environment variable")]
    Missing(&'static str),

    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub port: u16,
    pub bind_address: IpAddr,
    /// Connect to the database without TLS (`LOCAL` is set).
    pub local: bool,
    pub max_connections: u32,
    pub auto_migrate: bool,
    /// `RUST_LOG`, read after `.env` is loaded.
    pub log_filter: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let port = lookup("PORT").ok_or(ConfigError::Missing("PORT"))?;
        let port = parse("PORT", port)?;

        let bind_address = match lookup("BIND_ADDRESS") {
            Some(value) => parse("BIND_ADDRESS", value)?,
            None => IpAddr::from(DEFAULT_BIND_ADDRESS),
        };
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => parse("DATABASE_MAX_CONNECTIONS", value)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }
        let auto_migrate = !matches!(
            lookup("AUTO_MIGRATE").as_deref().map(str::trim),
            Some("0" | "false" | "no")
        );

        Ok(Settings {
            database_url,
            port,
            bind_address,
            local: lookup("LOCAL").is_some(),
            max_connections,
            auto_migrate,
            log_filter: lookup("RUST_LOG"),
        })
    }

    /// The configured log filter, or `info` when unset or unparsable.
    pub fn log_filter(&self) -> EnvFilter {
        self.log_filter
            .as_deref()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let settings = settings(&[("DATABASE_URL", "postgres://db/split"), ("PORT", "4000")]).unwrap();
        assert_eq!(settings.port, 4000);
        assert_eq!(settings.bind_address, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(settings.max_connections, 5);
        assert!(!settings.local);
        assert!(settings.auto_migrate);
        assert_eq!(settings.log_filter, None);
        assert_eq!(settings.log_filter().to_string(), "info");
    }

    #[test]
    fn rust_log_is_read_with_the_other_settings() {
        let settings = settings(&[
            ("DATABASE_URL", "postgres://db/split"),
            ("PORT", "4000"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(settings.log_filter.as_deref(), Some("debug"));
        assert_eq!(settings.log_filter().to_string(), "debug");
    }

    #[test]
    fn unparsable_log_filter_falls_back_to_info() {
        let settings = settings(&[
            ("DATABASE_URL", "postgres://db/split"),
            ("PORT", "4000"),
            ("RUST_LOG", "splitledger=loud"),
        ])
        .unwrap();
        assert_eq!(settings.log_filter().to_string(), "info");
    }

    #[test]
    fn missing_port_is_an_error() {
        let err = settings(&[("DATABASE_URL", "postgres://db/split")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("PORT"));
        assert_eq!(err.to_string(), "missing PORT environment variable");
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = settings(&[("PORT", "4000")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = settings(&[("DATABASE_URL", "postgres://db/split"), ("PORT", "http")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "http".into()
            }
        );
    }

    #[test]
    fn local_flag_and_overrides() {
        let settings = settings(&[
            ("DATABASE_URL", "postgres://localhost/split"),
            ("PORT", "8080"),
            ("LOCAL", "1"),
            ("BIND_ADDRESS", "127.0.0.1"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("AUTO_MIGRATE", "false"),
        ])
        .unwrap();
        assert!(settings.local);
        assert_eq!(settings.bind_address, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(settings.max_connections, 12);
        assert!(!settings.auto_migrate);
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = settings(&[
            ("DATABASE_URL", "postgres://db/split"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DATABASE_MAX_CONNECTIONS", .. }));
    }
}
