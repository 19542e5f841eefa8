//! CLI 配置
//!
//! 包含 CLI 特有的配置：分阶段日志级别

use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub classify: Option<Level>,
    pub registry: Option<Level>,
    pub copy: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::INFO,
            classify: None,
            registry: None,
            copy: None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            "klon::classify" => self.classify.unwrap_or(self.global),
            "klon::registry" => self.registry.unwrap_or(self.global),
            "klon::copy" => self.copy.unwrap_or(self.global),
            _ => self.global,
        }
    }
}
