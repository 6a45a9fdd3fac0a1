//! Configuration system for the stack-machine simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline machine constants (memory size, tick budget).
//! 2. **Structures:** Hierarchical config for memory and simulation settings.
//! 3. **Loading:** Deserialization from JSON text or a JSON file.
//!
//! Every field is optional in JSON; missing fields take their default. Use
//! `Config::default()` when no configuration file is given.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::Error;

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of memory cells.
    ///
    /// Code takes one cell per encoded byte and each variable one cell, so this bounds the
    /// size of loadable programs.
    pub const MEMORY_SIZE: usize = 4096;

    /// Maximum ticks before the run is cut off.
    pub const TICK_LIMIT: u64 = 200_000_000;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use stackcpu_core::config::Config;
///
/// let json = r#"{
///     "memory": { "size": 8192 },
///     "simulation": { "tick_limit": 1000, "trace": true }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.memory.size, 8192);
/// assert_eq!(config.simulation.tick_limit, 1000);
/// assert!(config.simulation.trace);
///
/// let partial = Config::from_json(r#"{ "simulation": { "tick_limit": 50 } }"#).unwrap();
/// assert_eq!(partial.memory.size, 4096);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Run-loop configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }
}

/// Memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Memory size in cells
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
}

impl MemoryConfig {
    /// Returns the default memory size in cells.
    const fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
        }
    }
}

/// Run-loop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Tick budget; the run stops with `TickLimitExceeded` when it is reached
    #[serde(default = "SimulationConfig::default_tick_limit")]
    pub tick_limit: u64,

    /// Emit one debug record per tick through `tracing`
    #[serde(default)]
    pub trace: bool,
}

impl SimulationConfig {
    /// Returns the default tick budget.
    const fn default_tick_limit() -> u64 {
        defaults::TICK_LIMIT
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_limit: defaults::TICK_LIMIT,
            trace: false,
        }
    }
}
