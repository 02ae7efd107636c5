/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Courier framework.
///
/// This struct contains all configurable values for Courier, loaded from TOML
/// files in XDG-compliant directories.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CourierConfig {
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
    /// Default values configuration
    pub defaults: DefaultsConfig,
}

/// Timeout-related configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline applied to a `call` when the caller passes no timeout, in milliseconds
    pub default_call_timeout_ms: u64,
    /// Default system-wide shutdown timeout in milliseconds
    pub system_shutdown_timeout_ms: u64,
}

/// Default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default actor name when none provided
    pub actor_name: String,
    /// Default bus name when none provided
    pub bus_name: String,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_call_timeout_ms: 30_000,
            system_shutdown_timeout_ms: 30_000,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            actor_name: "actor".to_string(),
            bus_name: "bus".to_string(),
        }
    }
}

impl CourierConfig {
    /// Convert the default call timeout to a Duration
    pub const fn default_call_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.default_call_timeout_ms)
    }

    /// Convert the system shutdown timeout to a Duration
    pub const fn system_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.system_shutdown_timeout_ms)
    }

    /// Load configuration from XDG-compliant locations
    ///
    /// This function attempts to load configuration from the following locations
    /// in order of preference:
    /// 1. `$XDG_CONFIG_HOME/courier/config.toml` (Linux/macOS)
    /// 2. `~/.config/courier/config.toml` (Linux fallback)
    ///
    /// If no configuration file is found, returns the default configuration.
    /// If a configuration file exists but is malformed, logs an error and uses
    /// defaults.
    pub fn load() -> Self {
        use tracing::{error, info};

        // Get the XDG base directories
        let xdg_dirs = match xdg::BaseDirectories::with_prefix("courier") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        // Try to find the configuration file
        let config_path = xdg_dirs.find_config_file("config.toml");

        if let Some(path) = config_path {
            info!("Loading configuration from: {}", path.display());
            match std::fs::read_to_string(&path) {
                Ok(config_str) => match toml::from_str::<Self>(&config_str) {
                    Ok(config) => {
                        info!("Successfully loaded configuration");
                        config
                    }
                    Err(e) => {
                        error!("Failed to parse configuration file {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    error!("Failed to read configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            }
        } else {
            info!("No configuration file found, using defaults");
            Self::default()
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: CourierConfig = CourierConfig::load();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = CourierConfig::default();
        assert_eq!(config.timeouts.default_call_timeout_ms, 30_000);
        assert_eq!(config.defaults.actor_name, "actor");
        assert_eq!(config.default_call_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_fills_missing_sections() {
        let config: CourierConfig =
            toml::from_str("[timeouts]\ndefault_call_timeout_ms = 250\n").unwrap();
        assert_eq!(config.timeouts.default_call_timeout_ms, 250);
        // Untouched sections fall back to their defaults.
        assert_eq!(config.timeouts.system_shutdown_timeout_ms, 30_000);
        assert_eq!(config.defaults.bus_name, "bus");
    }
}
