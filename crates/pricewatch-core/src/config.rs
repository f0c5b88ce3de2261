use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,de;q=0.8,fr;q=0.7";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let bind_addr = or_default("PRICEWATCH_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PRICEWATCH_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PRICEWATCH_LOG_LEVEL", "info");
    let stores_path = lookup("PRICEWATCH_STORES_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let scraper_request_timeout_secs = parse_u64("PRICEWATCH_REQUEST_TIMEOUT_SECS", "15")?;
    if scraper_request_timeout_secs == 0 {
        return Err(invalid(
            "PRICEWATCH_REQUEST_TIMEOUT_SECS",
            "timeout must be greater than zero".to_string(),
        ));
    }
    let scraper_max_redirects = parse_usize("PRICEWATCH_MAX_REDIRECTS", "5")?;

    let scraper_pacing_min_ms = parse_u64("PRICEWATCH_PACING_MIN_MS", "500")?;
    let scraper_pacing_max_ms = parse_u64("PRICEWATCH_PACING_MAX_MS", "1000")?;
    if scraper_pacing_min_ms > scraper_pacing_max_ms {
        return Err(invalid(
            "PRICEWATCH_PACING_MIN_MS",
            format!(
                "minimum pacing ({scraper_pacing_min_ms}ms) exceeds maximum ({scraper_pacing_max_ms}ms)"
            ),
        ));
    }

    let scraper_user_agents = match lookup("PRICEWATCH_USER_AGENTS") {
        Ok(raw) => Some(parse_user_agents(&raw).ok_or_else(|| {
            invalid(
                "PRICEWATCH_USER_AGENTS",
                "expected at least one '|'-separated user agent".to_string(),
            )
        })?),
        Err(_) => None,
    };
    let scraper_accept_language =
        or_default("PRICEWATCH_ACCEPT_LANGUAGE", DEFAULT_ACCEPT_LANGUAGE);

    let rate_limit_max_requests = parse_usize("PRICEWATCH_RATE_LIMIT_MAX_REQUESTS", "30")?;
    let rate_limit_window_secs = parse_u64("PRICEWATCH_RATE_LIMIT_WINDOW_SECS", "60")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        stores_path,
        scraper_request_timeout_secs,
        scraper_max_redirects,
        scraper_pacing_min_ms,
        scraper_pacing_max_ms,
        scraper_user_agents,
        scraper_accept_language,
        rate_limit_max_requests,
        rate_limit_window_secs,
    })
}

/// Splits a `|`-separated user-agent list. User agents contain commas and
/// semicolons, so neither can serve as the separator.
fn parse_user_agents(raw: &str) -> Option<Vec<String>> {
    let agents: Vec<String> = raw
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    (!agents.is_empty()).then_some(agents)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
