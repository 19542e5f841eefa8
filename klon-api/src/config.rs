//! API 层配置
//!
//! 包含执行配置 RunConfig 和全局单例（供 CLI 使用）

use klon_config::{EngineConfig, LogLevel, RegistryConfig};
use klon_log::{Level, LogConfig, Logger};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Copy execution configuration
#[derive(Clone)]
pub struct RunConfig {
    /// Whether to report run statistics
    pub show_stats: bool,
    /// Whether to dump the copied value after the run
    pub dump_value: bool,
    /// Engine configuration
    pub engine: EngineConfig,
    /// Identity registry configuration
    pub registry: RegistryConfig,
    /// Logger (optional)
    pub logger: Arc<Logger>,
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("show_stats", &self.show_stats)
            .field("dump_value", &self.dump_value)
            .field("engine", &self.engine)
            .field("registry", &self.registry)
            .finish()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            show_stats: false,
            dump_value: false,
            engine: EngineConfig::default(),
            registry: RegistryConfig::default(),
            logger: Logger::noop(),
        }
    }
}

impl RunConfig {
    /// Build a config from CLI-style options
    ///
    /// A log level switches the logger from noop to stdout.
    pub fn from_options(show_stats: bool, dump_value: bool, log_level: Option<LogLevel>) -> Self {
        let logger = match log_level {
            Some(level) => {
                let (logger, _ring) = LogConfig::new(to_log_level(level)).with_stdout().init();
                logger
            }
            None => Logger::noop(),
        };
        Self {
            show_stats,
            dump_value,
            engine: EngineConfig::default(),
            registry: RegistryConfig::default(),
            logger,
        }
    }
}

/// Map the shared config vocabulary onto klon-log levels
pub fn to_log_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::Trace,
        LogLevel::Debug => Level::Debug,
        LogLevel::Info => Level::Info,
        LogLevel::Warn => Level::Warn,
        LogLevel::Error => Level::Error,
    }
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration (must be called once before any operation)
///
/// # Panics
/// If config is already initialized
pub fn init(config: RunConfig) {
    GLOBAL_CONFIG
        .set(config)
        .expect("Config already initialized");
}

/// Get global config reference
///
/// # Panics
/// If config is not initialized
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get().expect("Config not initialized")
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_config() {
        let cfg = RunConfig::default();
        assert!(!cfg.show_stats);
        assert!(!cfg.dump_value);
        assert!(!cfg.engine.strict_defects);
        assert_eq!(cfg.registry.initial_capacity, 64);
    }

    #[test]
    fn test_run_config_clone() {
        let cfg = RunConfig::default();
        let cloned = cfg.clone();
        assert_eq!(cfg.show_stats, cloned.show_stats);
        assert_eq!(cfg.dump_value, cloned.dump_value);
    }

    #[test]
    fn test_run_config_debug() {
        let cfg = RunConfig::default();
        let debug_str = format!("{:?}", cfg);
        assert!(debug_str.contains("show_stats"));
        assert!(debug_str.contains("dump_value"));
        assert!(debug_str.contains("engine"));
        assert!(debug_str.contains("registry"));
    }

    #[test]
    fn test_from_options_with_level() {
        let cfg = RunConfig::from_options(true, false, Some(LogLevel::Debug));
        assert!(cfg.show_stats);
        assert_eq!(cfg.logger.level(), Level::Debug);
    }

    #[test]
    fn test_to_log_level() {
        assert_eq!(to_log_level(LogLevel::Trace), Level::Trace);
        assert_eq!(to_log_level(LogLevel::Error), Level::Error);
    }

    #[test]
    fn test_global_config_init_and_get() {
        // 注意：由于全局状态，这个测试需要在独立进程中运行
        // 或者使用 cargo test -- --test-threads=1
        if !is_initialized() {
            let cfg = RunConfig::default();
            let show_stats = cfg.show_stats;
            init(cfg);
            assert!(is_initialized());

            let retrieved = config();
            assert_eq!(retrieved.show_stats, show_stats);
        }
    }
}
