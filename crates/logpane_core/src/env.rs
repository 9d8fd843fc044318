//! Environment variable helpers for configuration and tests.

use std::env;
use std::sync::{Mutex, OnceLock};

/// Parse a boolean-like flag value.
///
/// Truthy: `1`, `true`, `yes`, `on`. Falsy: `0`, `false`, `no`, `off` and the
/// empty string. Matching ignores case and surrounding whitespace.
///
/// # Returns
/// `Some(bool)` for recognized values, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment; missing or unrecognized values
/// count as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

/// Process-wide mutex serializing environment mutation in tests.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[allow(unused_unsafe)]
fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: callers hold `env_lock()` while tests mutate the environment.
    unsafe {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}

/// Overrides one environment variable and restores it on drop.
pub struct EnvGuard {
    key: String,
    previous: Option<String>,
}

impl EnvGuard {
    /// Set `key=value` for the lifetime of the guard.
    pub fn set(key: &str, value: &str) -> Self {
        Self::replace(key, Some(value))
    }

    /// Remove `key` for the lifetime of the guard.
    pub fn remove(key: &str) -> Self {
        Self::replace(key, None)
    }

    fn replace(key: &str, value: Option<&str>) -> Self {
        let previous = env::var(key).ok();
        write_var(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_var(&self.key, self.previous.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_flag_accepts_truthy_and_falsy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
        assert_eq!(parse_env_flag("maybe"), None);
    }

    #[test]
    fn env_guard_restores_previous_state() {
        let _lock = env_lock().lock().expect("env lock");
        let key = "LOGPANE_TEST_ENV_GUARD";
        {
            let _set = EnvGuard::set(key, "on");
            assert!(env_flag_enabled(key));
            {
                let _removed = EnvGuard::remove(key);
                assert!(!env_flag_enabled(key));
            }
            assert_eq!(env::var(key).ok().as_deref(), Some("on"));
        }
        assert!(env::var(key).is_err());
    }
}
