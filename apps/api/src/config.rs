use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::layout::{PageConstants, A4_PAGE};

/// Upper bound for `PAGE_MAX_COLUMNS` and `PAGE_MAX_ROWS`; the column advisor runs one
/// calculation per allowed column.
pub const MAX_GRID_TRACKS: u32 = 32;

/// Application configuration loaded from environment variables.
/// Page constants start from A4 and accept per-field overrides.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub page: PageConstants,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base = A4_PAGE;
        let page = PageConstants {
            page_width: length(&lookup, "PAGE_WIDTH_MM", base.page_width, false)?,
            page_height: length(&lookup, "PAGE_HEIGHT_MM", base.page_height, false)?,
            max_columns: limit(&lookup, "PAGE_MAX_COLUMNS", base.max_columns, MAX_GRID_TRACKS)?,
            max_rows: limit(&lookup, "PAGE_MAX_ROWS", base.max_rows, MAX_GRID_TRACKS)?,
            max_slots: limit(&lookup, "PAGE_MAX_SLOTS", base.max_slots, u32::MAX)?,
            min_cell_size: length(&lookup, "PAGE_MIN_CELL_MM", base.min_cell_size, false)?,
            gap: length(&lookup, "PAGE_GAP_MM", base.gap, false)?,
            default_margin: length(&lookup, "PAGE_DEFAULT_MARGIN_MM", base.default_margin, true)?,
            default_header: length(&lookup, "PAGE_DEFAULT_HEADER_MM", base.default_header, true)?,
        };

        let capacity = page.max_columns * page.max_rows;
        if page.max_slots > capacity {
            bail!(
                "PAGE_MAX_SLOTS ({}) exceeds PAGE_MAX_COLUMNS x PAGE_MAX_ROWS ({capacity})",
                page.max_slots
            );
        }

        Ok(Config {
            port: optional(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            page,
        })
    }
}

fn optional<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

/// A length in millimetres: finite, and positive (or non-negative with `allow_zero`).
fn length(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f64,
    allow_zero: bool,
) -> Result<f64> {
    let value: f64 = optional(lookup, key, default)?;
    let in_range = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if !value.is_finite() || !in_range {
        let bound = if allow_zero { "non-negative" } else { "positive" };
        bail!("Environment variable '{key}' must be a finite {bound} length, got {value}");
    }
    Ok(value)
}

/// A capacity limit between 1 and `max`.
fn limit(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u32,
    max: u32,
) -> Result<u32> {
    let value: u32 = optional(lookup, key, default)?;
    if !(1..=max).contains(&value) {
        bail!("Environment variable '{key}' must be between 1 and {max}, got {value}");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_from(&[]).expect("empty env is valid");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.page, A4_PAGE);
    }

    #[test]
    fn test_page_overrides() {
        let config = config_from(&[
            ("PAGE_WIDTH_MM", "215.9"),
            ("PAGE_MAX_COLUMNS", "3"),
            ("PAGE_MAX_SLOTS", "15"),
        ])
        .expect("valid overrides");
        assert_eq!(config.page.page_width, 215.9);
        assert_eq!(config.page.max_columns, 3);
        assert_eq!(config.page.max_slots, 15);
        assert_eq!(config.page.page_height, A4_PAGE.page_height);
    }

    #[test]
    fn test_rejects_non_positive_lengths() {
        for (key, raw) in [
            ("PAGE_GAP_MM", "0"),
            ("PAGE_GAP_MM", "-2"),
            ("PAGE_WIDTH_MM", "-210"),
            ("PAGE_HEIGHT_MM", "inf"),
            ("PAGE_MIN_CELL_MM", "NaN"),
            ("PAGE_DEFAULT_MARGIN_MM", "-1"),
        ] {
            let err = config_from(&[(key, raw)]).expect_err("out of range");
            assert!(err.to_string().contains(key), "{key}={raw}: {err}");
        }
    }

    #[test]
    fn test_zero_margin_is_allowed() {
        let config = config_from(&[("PAGE_DEFAULT_MARGIN_MM", "0")]).expect("zero margin");
        assert_eq!(config.page.default_margin, 0.0);
    }

    #[test]
    fn test_rejects_absurd_limits() {
        let err = config_from(&[("PAGE_MAX_COLUMNS", "4294967295")]).expect_err("too many columns");
        assert!(err.to_string().contains("PAGE_MAX_COLUMNS"));

        let err = config_from(&[("PAGE_MAX_ROWS", "0")]).expect_err("zero rows");
        assert!(err.to_string().contains("PAGE_MAX_ROWS"));

        let err = config_from(&[("PAGE_MAX_SLOTS", "21")]).expect_err("more slots than cells");
        assert!(err.to_string().contains("PAGE_MAX_SLOTS"));
    }

    #[test]
    fn test_invalid_value_names_variable() {
        let err = config_from(&[("PAGE_MAX_ROWS", "five")]).expect_err("not a number");
        assert!(err.to_string().contains("PAGE_MAX_ROWS"));
    }
}
