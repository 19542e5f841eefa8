//! Klon API - Copy orchestration layer
//!
//! Provides the unified copy interface, including:
//! - Copy flow orchestration
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (KlonError)
//!
//! For CLI convenience, this crate provides a global singleton API.
//! For library use, prefer the explicit `copy_with_config(value, &config)` API.

use klon_log::info;
use std::sync::Arc;

use klon_core::CopyEngine;

// Re-export config
pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, to_log_level, RunConfig};

// Re-export config types from klon_config
pub use klon_config::{EngineConfig, LogLevel, Profile, RegistryConfig, Stage};

// Re-export error and types
pub mod error;
pub mod types;
pub use error::{ErrorReport, InternalError, KlonError};
pub use types::CopyOutput;

// Re-export core types
pub use klon_config;
pub use klon_core::{CopyStats, Value};

/// Structural copy with explicit configuration
///
/// This is the recommended API for library users. The operation is total:
/// it always returns a copy, never an error.
pub fn copy_with_config(value: &Value, config: &RunConfig) -> CopyOutput {
    info!(config.logger, "Starting copy");

    let mut engine = CopyEngine::with_config(
        config.engine.clone(),
        config.registry.clone(),
        Arc::clone(&config.logger),
    );
    let result = engine.copy(value);
    let stats = *engine.stats();

    info!(config.logger, "Copy completed: {stats}");
    CopyOutput {
        value: result,
        stats,
    }
}

/// Structural copy with default configuration
///
/// One value in, one structural copy out. No flags, no configuration
/// surface.
pub fn copy(value: &Value) -> Value {
    copy_with_config(value, &RunConfig::default()).value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_default_config() {
        let input = Value::array(vec![Value::number(1.0), Value::str("two")]);
        let result = copy(&input);

        assert!(result.is_array());
        assert!(!result.ptr_eq(&input));
    }

    #[test]
    fn test_copy_with_config_reports_stats() {
        let input = Value::array(vec![Value::number(1.0), Value::number(2.0)]);
        let output = copy_with_config(&input, &RunConfig::default());

        assert_eq!(output.stats.shells_allocated, 1);
        assert_eq!(output.stats.values_visited, 3);
        assert!(!output.value.ptr_eq(&input));
    }

    #[test]
    fn test_copy_primitive_roundtrip() {
        assert_eq!(copy(&Value::number(42.0)).as_number(), Some(42.0));
        assert!(copy(&Value::Null).is_null());
    }
}
