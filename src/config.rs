// Runtime configuration, read from environment variables.

use crate::store::{ApiStore, CsvStore, RecordStore};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_DB_DIR: &str = "db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Csv,
    Api,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "file" => Ok(Backend::Csv),
            "api" | "http" => Ok(Backend::Api),
            other => bail!("unknown backend '{}' (expected 'csv' or 'api')", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    pub db_dir: PathBuf,
    pub api_url: String,
    pub username: String,
}

impl Config {
    /// Build a Config from `INVENTORY_*` variables, falling back to the
    /// CSV files under `./db`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable lookup, for tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = match lookup("INVENTORY_BACKEND") {
            Some(raw) => raw.parse::<Backend>().context("Invalid INVENTORY_BACKEND")?,
            None => Backend::Csv,
        };
        let db_dir = lookup("INVENTORY_DB_DIR").unwrap_or_else(|| DEFAULT_DB_DIR.into());
        let api_url = lookup("INVENTORY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let username = lookup("INVENTORY_USERNAME")
            .or_else(|| lookup("USER"))
            .unwrap_or_else(|| "guest".into());
        Ok(Config {
            backend,
            db_dir: PathBuf::from(db_dir),
            api_url: api_url.trim_end_matches('/').to_string(),
            username,
        })
    }

    pub fn default_snapshot(&self) -> PathBuf {
        self.db_dir.join("products_default.csv")
    }

    /// Open the configured record store.
    pub fn open_store(&self) -> Result<Box<dyn RecordStore>> {
        let store: Box<dyn RecordStore> = match self.backend {
            Backend::Csv => Box::new(CsvStore::in_dir(&self.db_dir)),
            Backend::Api => Box::new(
                ApiStore::new(&self.api_url, self.default_snapshot())
                    .context("Failed to build HTTP client")?,
            ),
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_csv_in_db() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.backend, Backend::Csv);
        assert_eq!(cfg.db_dir, PathBuf::from("db"));
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.username, "guest");
        assert_eq!(cfg.default_snapshot(), PathBuf::from("db/products_default.csv"));
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("INVENTORY_BACKEND", "API"),
            ("INVENTORY_API_URL", "https://shop.example/api/"),
            ("USER", "prof"),
        ])
        .unwrap();
        assert_eq!(cfg.backend, Backend::Api);
        assert_eq!(cfg.api_url, "https://shop.example/api");
        assert_eq!(cfg.username, "prof");
    }

    #[test]
    fn username_variable_wins_over_user() {
        let cfg = config(&[("INVENTORY_USERNAME", "@clerk"), ("USER", "root")]).unwrap();
        assert_eq!(cfg.username, "@clerk");
    }

    #[test]
    fn unknown_backend_is_an_error() {
        let err = config(&[("INVENTORY_BACKEND", "sqlite")]).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown backend 'sqlite'"));
    }

    #[test]
    fn opens_selected_store() {
        let csv = config(&[]).unwrap().open_store().unwrap();
        assert!(csv.describe().starts_with("csv file"));
        let api = config(&[("INVENTORY_BACKEND", "api")]).unwrap().open_store().unwrap();
        assert_eq!(api.describe(), "api http://localhost:3000");
    }
}
