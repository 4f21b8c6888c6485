//! Engine configuration.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable overriding [`EngineConfig::event_capacity`].
pub const EVENT_CAPACITY_VAR: &str = "CSMM_EVENT_CAPACITY";
/// Environment variable overriding [`EngineConfig::log_settlements`].
pub const LOG_SETTLEMENTS_VAR: &str = "CSMM_LOG_SETTLEMENTS";

/// Configuration for the pool manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of lifecycle events kept; oldest are dropped first.
    pub event_capacity: usize,
    /// Log every committed debit/credit at info level.
    pub log_settlements: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_capacity: 1024,
            log_settlements: false,
        }
    }
}

impl EngineConfig {
    /// Builds a config from defaults overridden by environment variables.
    ///
    /// # Errors
    /// Returns [`EngineError::Config`] if a variable is set but unparsable.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(EVENT_CAPACITY_VAR) {
            config.event_capacity = raw.trim().parse().map_err(|_| {
                EngineError::Config(format!("{EVENT_CAPACITY_VAR} must be an integer, got {raw:?}"))
            })?;
        }

        if let Some(raw) = lookup(LOG_SETTLEMENTS_VAR) {
            config.log_settlements = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(EngineError::Config(format!(
                        "{LOG_SETTLEMENTS_VAR} must be a boolean, got {raw:?}"
                    )));
                }
            };
        }

        Ok(config)
    }

    /// Sets the event log capacity.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Enables or disables settlement logging.
    #[must_use]
    pub fn with_log_settlements(mut self, enabled: bool) -> Self {
        self.log_settlements = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.event_capacity, 1024);
        assert!(!config.log_settlements);
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            (EVENT_CAPACITY_VAR, "16"),
            (LOG_SETTLEMENTS_VAR, "true"),
        ]))
        .unwrap();
        assert_eq!(config.event_capacity, 16);
        assert!(config.log_settlements);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            EngineConfig::from_lookup(lookup(&[(EVENT_CAPACITY_VAR, "lots")])),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_lookup(lookup(&[(LOG_SETTLEMENTS_VAR, "maybe")])),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::default()
            .with_event_capacity(2)
            .with_log_settlements(true);
        assert_eq!(config.event_capacity, 2);
        assert!(config.log_settlements);
    }
}
