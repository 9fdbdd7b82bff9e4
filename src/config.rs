//! Configuration loaded from environment variables (and a `.env` file when
//! the binaries find one).
//!
//! - `FEEDME_DATABASE_URL` - SQLite database (default: `sqlite://feedme.db`)
//! - `FEEDME_SERVINGS` - comma separated serving choices (default: `2,4,6`)
//! - `FEEDME_BASE_SERVINGS` - servings recipes are written for (default: `2`)
//! - `RUST_LOG` - log filter (default: `info`)
//! - `FEEDME_LOG_FILE` - log file for the meal viewer (default: `meal_viewer.log`)

use std::env;
use std::path::PathBuf;

use crate::error::{FeedMeError, Result};
use crate::servings::{DEFAULT_BASE_SERVINGS, ServingOptions};

const DEFAULT_DATABASE_URL: &str = "sqlite://feedme.db";
const DEFAULT_LOG_FILE: &str = "meal_viewer.log";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub serving_options: ServingOptions,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            lookup("FEEDME_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let choices = match lookup("FEEDME_SERVINGS") {
            Some(raw) => parse_choices(&raw)?,
            None => ServingOptions::default().choices().to_vec(),
        };
        let base = match lookup("FEEDME_BASE_SERVINGS") {
            Some(raw) => parse_count("FEEDME_BASE_SERVINGS", &raw)?,
            None => DEFAULT_BASE_SERVINGS,
        };

        Ok(Self {
            database_url,
            serving_options: ServingOptions::new(choices, base)?,
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_file: lookup("FEEDME_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        })
    }
}

fn parse_count(name: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| FeedMeError::InvalidConfig(format!("{name}: '{raw}' is not a serving count")))
}

fn parse_choices(raw: &str) -> Result<Vec<u32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_count("FEEDME_SERVINGS", part))
        .collect()
}
