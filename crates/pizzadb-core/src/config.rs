use std::env::VarError;
use std::net::SocketAddr;

use crate::app_config::{AppConfig, Environment, PipelineConfig, PromoSource};
use crate::ConfigError;

const DEFAULT_CITY: &str = "Сыктывкар";
const DEFAULT_GEO_SEARCH_URL: &str = "https://search-maps.yandex.ru/v1/";
const DEFAULT_PROMO_URL: &str = "https://promokodi.ru/category/pitstsa/";

/// Load process-level configuration, reading a `.env` file first if present.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load process-level configuration from variables already in the process.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load per-run pipeline configuration from variables already in the process.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnvVar`] when a required credential is absent.
pub fn load_pipeline_config_from_env() -> Result<PipelineConfig, ConfigError> {
    build_pipeline_config(|key| std::env::var(key))
}

/// Build process-level configuration from the given lookup function.
///
/// Nothing here is required: every key has a default, so the server can start
/// without pipeline credentials and report their absence per run instead.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unparseable values.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let env = parse_environment(&or_default("PIZZADB_ENV", "development"));

    let bind_addr = or_default("PIZZADB_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PIZZADB_BIND_ADDR", &e))?;
    let log_level = or_default("PIZZADB_LOG_LEVEL", "info");

    let schedule = or_default("PIZZADB_SCRAPE_SCHEDULE", "0 0 */6 * * *");
    let scrape_schedule = Some(schedule.trim().to_string()).filter(|s| !s.is_empty());

    let trigger_tokens = or_default("PIZZADB_TRIGGER_TOKENS", "")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let rate_limit_per_min = parse_number(&lookup, "PIZZADB_RATE_LIMIT_PER_MIN", 30)?;
    let database_url = lookup("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());
    let db_max_connections = parse_number(&lookup, "PIZZADB_DB_MAX_CONNECTIONS", 5)?;
    let db_min_connections = parse_number(&lookup, "PIZZADB_DB_MIN_CONNECTIONS", 1)?;
    let db_acquire_timeout_secs = parse_number(&lookup, "PIZZADB_DB_ACQUIRE_TIMEOUT_SECS", 10)?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        scrape_schedule,
        trigger_tokens,
        rate_limit_per_min,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Build per-run pipeline configuration from the given lookup function.
///
/// The store URL, store key, and geo-search API key are required; an empty
/// value counts as missing.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnvVar`] for an absent credential and
/// [`ConfigError::InvalidEnvVar`] for unparseable optional values.
pub fn build_pipeline_config<F>(lookup: F) -> Result<PipelineConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let store_url = require("SUPABASE_URL")?;
    let store_key = require("SUPABASE_KEY")?;
    let geo_api_key = require("YANDEX_API_KEY")?;

    let promo_source = parse_promo_source(&or_default("PIZZADB_PROMO_SOURCE", "scrape"))?;

    Ok(PipelineConfig {
        store_url,
        store_key,
        geo_api_key,
        city: or_default("PIZZADB_CITY", DEFAULT_CITY),
        geo_search_url: or_default("PIZZADB_GEO_SEARCH_URL", DEFAULT_GEO_SEARCH_URL),
        geo_search_lang: or_default("PIZZADB_GEO_SEARCH_LANG", "ru_RU"),
        geo_search_results: parse_number(&lookup, "PIZZADB_GEO_SEARCH_RESULTS", 20)?,
        promo_source,
        promo_url: or_default("PIZZADB_PROMO_URL", DEFAULT_PROMO_URL),
        store_table: or_default("PIZZADB_STORE_TABLE", "pizza_places"),
        http_timeout_secs: parse_optional_number(&lookup, "PIZZADB_HTTP_TIMEOUT_SECS")?,
        user_agent: or_default("PIZZADB_USER_AGENT", "pizzadb/0.1 (vendor-catalog)"),
    })
}

fn parse_number<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| invalid(var, &e)),
        Err(_) => Ok(default),
    }
}

/// Like `parse_number`, but an unset or blank variable yields `None`.
fn parse_optional_number<F, T>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| invalid(var, &e)),
        _ => Ok(None),
    }
}

fn invalid(var: &str, reason: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_promo_source(s: &str) -> Result<PromoSource, ConfigError> {
    match s.trim() {
        "scrape" => Ok(PromoSource::Scrape),
        "static" => Ok(PromoSource::Static),
        other => Err(invalid(
            "PIZZADB_PROMO_SOURCE",
            &format!("expected \"scrape\" or \"static\", got \"{other}\""),
        )),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
