use crate::app_config::{AppConfig, Environment};
use crate::key::BaseSize;
use crate::ConfigError;

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
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("TALLAS_ENV", "development"))?;
    let log_level = or_default("TALLAS_LOG_LEVEL", env.default_log_level());
    let default_cups = parse_cups(&or_default("TALLAS_DEFAULT_CUPS", "34,36"))?;
    let base_sizes = parse_base_sizes(&or_default("TALLAS_BASE_SIZES", "XS,S,M,L"))?;

    Ok(AppConfig {
        env,
        log_level,
        default_cups,
        base_sizes,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TALLAS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Comma-separated positive cup numbers, e.g. `"34,36,38"`.
fn parse_cups(raw: &str) -> Result<Vec<u32>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "TALLAS_DEFAULT_CUPS".to_string(),
        reason,
    };

    let mut cups = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let cup = part
            .parse::<u32>()
            .map_err(|e| invalid(format!("'{part}': {e}")))?;
        if cup == 0 {
            return Err(invalid("cup sizes must be positive".to_string()));
        }
        cups.push(cup);
    }
    cups.sort_unstable();
    cups.dedup();
    Ok(cups)
}

/// Comma-separated base sizes, e.g. `"XS,S,M,L"`. Order is kept.
fn parse_base_sizes(raw: &str) -> Result<Vec<BaseSize>, ConfigError> {
    let mut sizes: Vec<BaseSize> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let size = part
            .parse::<BaseSize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "TALLAS_BASE_SIZES".to_string(),
                reason: e.to_string(),
            })?;
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }
    if sizes.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "TALLAS_BASE_SIZES".to_string(),
            reason: "at least one base size is required".to_string(),
        });
    }
    Ok(sizes)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
