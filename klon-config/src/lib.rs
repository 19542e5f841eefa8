//! Klon Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Klon crates.

use serde::{Deserialize, Serialize};

/// Configuration for copy-engine behavior
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether internal invariant violations abort even in release builds
    pub strict_defects: bool,
}

/// Configuration for the per-call identity registry
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Initial capacity of the identity side table
    pub initial_capacity: usize,
}

/// Build profile, selects defect-handling and logging defaults
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Dev,
    Release,
}

/// Engine stage enum for stage-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Classify,
    Registry,
    Copy,
}

impl Stage {
    /// Get the string name of the stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Classify => "classify",
            Stage::Registry => "registry",
            Stage::Copy => "copy",
        }
    }

    /// Get the log target name for this stage
    pub fn target(&self) -> String {
        format!("klon::{}", self.as_str())
    }
}

/// Log level vocabulary shared with the CLI project file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl EngineConfig {
    /// Profile-based defaults: Dev aborts on defects, Release degrades
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            strict_defects: profile == Profile::Dev,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_defects: false,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::Dev
    }
}
