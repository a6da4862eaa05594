use std::{env, path::PathBuf};

use dotenv::dotenv;

const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
const DEFAULT_IMPORT_FILE: &str = "patients.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_config: PathBuf,
    pub import_file: PathBuf,
}

impl Config {
    /// Reads the configuration from the environment, after loading `.env`
    /// if there is one.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_config: lookup("TDEE_LOG_CONFIG")
                .unwrap_or_else(|| DEFAULT_LOG_CONFIG.to_owned())
                .into(),
            import_file: lookup("TDEE_IMPORT_FILE")
                .unwrap_or_else(|| DEFAULT_IMPORT_FILE.to_owned())
                .into(),
        }
    }
}
