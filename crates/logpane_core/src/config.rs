//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_CAPACITY, DEFAULT_INNER_PADDING, DEFAULT_LINE_SPACING, DEFAULT_OVERSCAN,
    DEFAULT_TEXT_SIZE, ENV_CAPACITY, ENV_LINE_SPACING, ENV_OVERSCAN, ENV_PADDING, ENV_PERF_LOG,
    ENV_TEXT_SIZE, ENV_WRAP,
};
use crate::env::parse_env_flag;
use crate::error::PaneError;
use crate::wrap::WrapMode;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Runtime configuration for a log view.
///
/// Styling values (padding, spacing, text size) belong to the host theme; they
/// live here so the layout engine can be driven without one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of stored lines; `0` disables eviction.
    pub capacity: usize,
    pub wrap: WrapMode,
    pub text_size: f32,
    pub inner_padding: f32,
    pub line_spacing: f32,
    /// Extra pixels above and below the viewport that are still materialized.
    pub overscan: f32,
    /// Emit relayout/refresh timings under the `logpane_view::perf` target.
    pub perf_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            wrap: WrapMode::Word,
            text_size: DEFAULT_TEXT_SIZE,
            inner_padding: DEFAULT_INNER_PADDING,
            line_spacing: DEFAULT_LINE_SPACING,
            overscan: DEFAULT_OVERSCAN,
            perf_log: false,
        }
    }
}

fn setting<T: FromStr>(name: &'static str) -> Result<Option<T>, PaneError> {
    let Ok(raw) = env::var(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| PaneError::InvalidSetting { name, value: raw })
}

fn float_setting(name: &'static str, allow_zero: bool) -> Result<Option<f32>, PaneError> {
    match setting::<f32>(name)? {
        Some(value) if value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0)) => {
            Ok(Some(value))
        }
        Some(value) => Err(PaneError::InvalidSetting {
            name,
            value: value.to_string(),
        }),
        None => Ok(None),
    }
}

fn wrap_setting() -> Result<Option<WrapMode>, PaneError> {
    match env::var(ENV_WRAP) {
        Ok(raw) if !raw.trim().is_empty() => raw.parse().map(Some),
        _ => Ok(None),
    }
}

fn flag_setting(name: &'static str) -> Result<Option<bool>, PaneError> {
    match env::var(name) {
        Ok(raw) => parse_env_flag(&raw)
            .map(Some)
            .ok_or(PaneError::InvalidSetting { name, value: raw }),
        Err(_) => Ok(None),
    }
}

fn or_default<T>(result: Result<Option<T>, PaneError>, fallback: T) -> T {
    match result {
        Ok(Some(value)) => value,
        Ok(None) => fallback,
        Err(err) => {
            warn!("{}; falling back to default", err);
            fallback
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// default for every missing or invalid value.
    ///
    /// # Returns
    /// A populated [`Config`]; invalid values are logged and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: or_default(setting(ENV_CAPACITY), defaults.capacity),
            wrap: or_default(wrap_setting(), defaults.wrap),
            text_size: or_default(float_setting(ENV_TEXT_SIZE, false), defaults.text_size),
            inner_padding: or_default(float_setting(ENV_PADDING, true), defaults.inner_padding),
            line_spacing: or_default(
                float_setting(ENV_LINE_SPACING, true),
                defaults.line_spacing,
            ),
            overscan: or_default(float_setting(ENV_OVERSCAN, true), defaults.overscan),
            perf_log: or_default(flag_setting(ENV_PERF_LOG), defaults.perf_log),
        }
    }

    /// Load configuration from environment variables, rejecting invalid values.
    ///
    /// # Errors
    /// Returns [`PaneError::InvalidWrapMode`] or [`PaneError::InvalidSetting`]
    /// for the first variable that cannot be parsed.
    pub fn try_from_env() -> Result<Self, PaneError> {
        let defaults = Self::default();
        Ok(Self {
            capacity: setting(ENV_CAPACITY)?.unwrap_or(defaults.capacity),
            wrap: wrap_setting()?.unwrap_or(defaults.wrap),
            text_size: float_setting(ENV_TEXT_SIZE, false)?.unwrap_or(defaults.text_size),
            inner_padding: float_setting(ENV_PADDING, true)?.unwrap_or(defaults.inner_padding),
            line_spacing: float_setting(ENV_LINE_SPACING, true)?
                .unwrap_or(defaults.line_spacing),
            overscan: float_setting(ENV_OVERSCAN, true)?.unwrap_or(defaults.overscan),
            perf_log: flag_setting(ENV_PERF_LOG)?.unwrap_or(defaults.perf_log),
        })
    }
}
