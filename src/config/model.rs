//! Configuration model for cmdwarden
//!
//! File-level defaults for supervised runs plus an optional exit-code
//! mapping table. CLI flags override everything here.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Default settings applied to every run
    #[serde(default)]
    pub defaults: Defaults,

    /// Exit-code to status-label mapping for the table-driven mapper
    #[serde(default)]
    pub exit_codes: ExitCodes,
}

/// Default run settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    /// Default timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default interval between termination checks, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Whether to interrupt the waiting worker when a run is aborted
    #[serde(default)]
    pub interrupt_on_cancel: bool,
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            interrupt_on_cancel: false,
        }
    }
}

impl Defaults {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// `[exit_codes]` section
///
/// TOML table keys are strings, so codes are written quoted:
///
/// ```toml
/// [exit_codes]
/// fallback = "FAILED"
///
/// [exit_codes.map]
/// "0" = "COMPLETED"
/// "24" = "COMPLETED_WITH_WARNINGS"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExitCodes {
    /// Explicit code-to-label entries
    #[serde(default)]
    pub map: HashMap<String, String>,

    /// Label for codes not present in the map
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_fallback() -> String {
    "FAILED".to_string()
}

impl Default for ExitCodes {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            fallback: default_fallback(),
        }
    }
}

impl ExitCodes {
    /// Parse the string-keyed map into numeric exit codes
    pub fn table(&self) -> Result<HashMap<i32, String>> {
        self.map
            .iter()
            .map(|(code, label)| {
                let code: i32 = code
                    .parse()
                    .with_context(|| format!("invalid exit code in [exit_codes.map]: '{code}'"))?;
                Ok((code, label.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defaults.timeout_secs, 300);
        assert_eq!(config.defaults.poll_interval_ms, 1000);
        assert!(!config.defaults.interrupt_on_cancel);
        assert_eq!(config.exit_codes.fallback, "FAILED");
    }

    #[test]
    fn test_duration_accessors() {
        let defaults = Defaults {
            timeout_secs: 2,
            poll_interval_ms: 250,
            interrupt_on_cancel: true,
        };
        assert_eq!(defaults.timeout(), Duration::from_secs(2));
        assert_eq!(defaults.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_exit_code_table_parses_keys() {
        let mut map = HashMap::new();
        map.insert("0".to_string(), "COMPLETED".to_string());
        map.insert("24".to_string(), "WARN".to_string());
        let codes = ExitCodes {
            map,
            fallback: "FAILED".to_string(),
        };

        let table = codes.table().unwrap();
        assert_eq!(table.get(&0), Some(&"COMPLETED".to_string()));
        assert_eq!(table.get(&24), Some(&"WARN".to_string()));
    }

    #[test]
    fn test_exit_code_table_rejects_bad_key() {
        let mut map = HashMap::new();
        map.insert("zero".to_string(), "COMPLETED".to_string());
        let codes = ExitCodes {
            map,
            fallback: "FAILED".to_string(),
        };
        assert!(codes.table().is_err());
    }
}
