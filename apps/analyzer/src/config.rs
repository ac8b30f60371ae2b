use anyhow::{bail, Context, Result};

use crate::analysis::validation::SentimentPolicy;
use crate::llm_client::DEFAULT_BASE_URL;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/sentiment_analysis_db";
const DEFAULT_STORE_TABLE: &str = "reviews_analysis";

/// Process configuration loaded from environment variables.
/// Fails at startup if the generation-service credential is missing.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub database_url: String,
    pub store_table: String,
    pub sentiment_validation: SentimentPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'OPENAI_API_KEY' is not set")?;

        let store_table = optional("STORE_TABLE", DEFAULT_STORE_TABLE);
        if !is_sql_identifier(&store_table) {
            bail!("STORE_TABLE must be a plain SQL identifier, got '{store_table}'");
        }

        let sentiment_validation = match lookup("SENTIMENT_VALIDATION") {
            Some(v) => v
                .parse::<SentimentPolicy>()
                .map_err(anyhow::Error::msg)
                .context("SENTIMENT_VALIDATION is invalid")?,
            None => SentimentPolicy::default(),
        };

        Ok(Config {
            openai_api_key,
            openai_base_url: optional("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            database_url: optional("DATABASE_URL", DEFAULT_DATABASE_URL),
            store_table,
            sentiment_validation,
        })
    }
}

fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Config::from_lookup(lookup(&[])).err().unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_fails() {
        assert!(Config::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.openai_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.store_table, "reviews_analysis");
        assert_eq!(config.sentiment_validation, SentimentPolicy::Lenient);
    }

    #[test]
    fn test_overrides_apply() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:8000/v1"),
            ("DATABASE_URL", "postgres://db/reviews"),
            ("STORE_TABLE", "analysis_2024"),
            ("SENTIMENT_VALIDATION", "strict"),
        ]))
        .unwrap();
        assert_eq!(config.openai_base_url, "http://localhost:8000/v1");
        assert_eq!(config.database_url, "postgres://db/reviews");
        assert_eq!(config.store_table, "analysis_2024");
        assert_eq!(config.sentiment_validation, SentimentPolicy::Strict);
    }

    #[test]
    fn test_rejects_unsafe_table_name() {
        let result = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("STORE_TABLE", "reviews; DROP TABLE users"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_validation_mode() {
        let result = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SENTIMENT_VALIDATION", "sometimes"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_sql_identifier() {
        assert!(is_sql_identifier("reviews_analysis"));
        assert!(is_sql_identifier("_t1"));
        assert!(!is_sql_identifier("1table"));
        assert!(!is_sql_identifier(""));
        assert!(!is_sql_identifier("a-b"));
    }
}
