//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and overridden by `FINANCE__*` environment
//! variables (e.g. `FINANCE__SERVER__PORT=8080`).
//!
//! See `settings.example.toml` for every key.
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use engine::Currency;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub currency: Currency,
    /// IANA zone for calendar-month metrics and report timestamps.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> Tz {
    chrono_tz::Africa::Lagos
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    #[serde(default)]
    pub report: Report,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("FINANCE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_apply_to_missing_sections() {
        let settings = parse("");
        assert_eq!(settings.app.level, "info");
        assert!(settings.server.is_none());
        assert_eq!(settings.report.currency, Currency::Ngn);
        assert_eq!(settings.report.timezone, chrono_tz::Africa::Lagos);
    }

    #[test]
    fn full_file_is_read() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 3000
            database = { sqlite = "finance.db" }

            [report]
            currency = "EUR"
            timezone = "Europe/Rome"
            "#,
        );
        let server = settings.server.unwrap();
        assert_eq!(server.port, 3000);
        assert_eq!(server.database, Database::Sqlite("finance.db".to_string()));
        assert_eq!(settings.report.currency, Currency::Eur);
        assert_eq!(settings.report.timezone, chrono_tz::Europe::Rome);
    }

    #[test]
    fn memory_database_is_a_plain_string() {
        let settings = parse(
            r#"
            [server]
            port = 3000
            database = "memory"
            "#,
        );
        assert_eq!(settings.server.unwrap().database, Database::Memory);
    }
}
