//! # Runtime Configuration Module
//!
//! Environment variable-based configuration of the `may` coroutine runtime
//! the server runs on.
//!
//! ## Environment Variables
//!
//! ### `GETJSON_STACK_SIZE`
//!
//! Stack size for each request coroutine. Accepts values in:
//! - Decimal: `16384` (16 KB)
//! - Hexadecimal: `0x4000` (16 KB)
//!
//! Default: `0x4000` (16 KB). Unparseable values fall back to the default.
//!
//! ### `GETJSON_WORKERS`
//!
//! Number of `may` worker threads. Default: the machine's available
//! parallelism.
//!
//! ## Usage
//!
//! ```rust
//! use getjson::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```
//!
//! ```bash
//! GETJSON_STACK_SIZE=0x8000 GETJSON_WORKERS=4 getjson serve --port 8080
//! ```

use std::env;
use std::thread;
use tracing::info;

pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes (default: 16 KB / 0x4000)
    pub stack_size: usize,
    /// Worker threads driving the coroutines
    pub workers: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let stack_size = lookup("GETJSON_STACK_SIZE")
            .and_then(|val| parse_size(&val))
            .unwrap_or(DEFAULT_STACK_SIZE);
        let workers = lookup("GETJSON_WORKERS")
            .and_then(|val| val.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or_else(default_workers);
        RuntimeConfig {
            stack_size,
            workers,
        }
    }

    /// Apply to the global `may` configuration. Must run before the server
    /// spawns its first coroutine.
    pub fn apply(&self) {
        may::config()
            .set_stack_size(self.stack_size)
            .set_workers(self.workers);
        info!(
            stack_size = self.stack_size,
            workers = self.workers,
            "Coroutine runtime configured"
        );
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[]));
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_hex_and_decimal_stack_size() {
        let hex = RuntimeConfig::from_lookup(lookup(&[("GETJSON_STACK_SIZE", "0x8000")]));
        assert_eq!(hex.stack_size, 0x8000);
        let dec = RuntimeConfig::from_lookup(lookup(&[("GETJSON_STACK_SIZE", "32768")]));
        assert_eq!(dec.stack_size, 32768);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("GETJSON_STACK_SIZE", "big"),
            ("GETJSON_WORKERS", "0"),
        ]));
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
        assert_eq!(config.workers, default_workers());
    }

    #[test]
    fn test_workers() {
        let config = RuntimeConfig::from_lookup(lookup(&[("GETJSON_WORKERS", "3")]));
        assert_eq!(config.workers, 3);
    }
}
