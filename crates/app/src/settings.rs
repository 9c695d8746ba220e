//! Process settings.
//!
//! Layered, last wins: built-in defaults, the optional TOML file
//! (`config/budgeting.toml` unless `--config` says otherwise), `BUDGETING__*`
//! environment variables, then command-line flags.

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/budgeting.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Self::Sqlite("budgeting.db".to_string())
    }
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Server {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub database: Database,
}

#[derive(Debug, Parser)]
#[command(name = "budgeting", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the listen address.
    #[arg(long)]
    bind: Option<String>,
    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,
    /// `memory`, or the path of a SQLite file.
    #[arg(long)]
    database: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let builder = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("BUDGETING").separator("__"));
        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.apply(args);
        Ok(settings)
    }

    fn apply(&mut self, args: Args) {
        if let Some(bind) = args.bind {
            self.server.bind = bind;
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(database) = args.database {
            self.database = match database.as_str() {
                "memory" => Database::Memory,
                _ => Database::Sqlite(database),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(raw: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.addr(), "127.0.0.1:8080");
        assert_eq!(settings.database.url(), "sqlite:budgeting.db?mode=rwc");
    }

    #[test]
    fn reads_sections() {
        let settings = from_toml(
            r#"
            database = "memory"

            [app]
            level = "debug"

            [server]
            port = 3000
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server.addr(), "127.0.0.1:3000");
        assert_eq!(settings.database, Database::Memory);
        assert_eq!(settings.database.url(), "sqlite::memory:");
    }

    #[test]
    fn sqlite_path_from_table() {
        let settings = from_toml(r#"database = { sqlite = "/var/lib/budgeting.db" }"#);
        assert_eq!(
            settings.database,
            Database::Sqlite("/var/lib/budgeting.db".to_string())
        );
    }

    #[test]
    fn flags_override_file() {
        let mut settings = from_toml("[server]\nbind = \"0.0.0.0\"");
        settings.apply(Args::parse_from([
            "budgeting",
            "--port",
            "9000",
            "--database",
            "memory",
        ]));
        assert_eq!(settings.server.addr(), "0.0.0.0:9000");
        assert_eq!(settings.database, Database::Memory);
    }
}
