//! API 错误类型
//!
//! 提供统一的错误类型和结构化错误报告。
//!
//! 拷贝操作本身是全函数，从不失败；这里的错误只来自编排层
//! （输入文档解析、配置）以及内部缺陷类的上报。

use thiserror::Error;

/// 内部缺陷（结构化）
pub use klon_core::InternalError;

/// Klon 错误类型
#[derive(Error, Debug, Clone)]
pub enum KlonError {
    /// 内部不变量违规（编程缺陷类）
    #[error("{0}")]
    Internal(#[from] InternalError),

    /// 输入文档错误
    #[error("Input error: {0}")]
    Input(String),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),
}

impl KlonError {
    /// 获取错误阶段名称
    pub fn stage(&self) -> &'static str {
        match self {
            KlonError::Internal(_) => "engine",
            KlonError::Input(_) => "input",
            KlonError::Config(_) => "config",
        }
    }

    /// 转换为结构化错误报告
    ///
    /// 适用于需要结构化数据的场景；CLI 可以直接打印。
    pub fn to_report(&self) -> ErrorReport {
        match self {
            KlonError::Internal(e) => ErrorReport {
                stage: "engine",
                error_kind: "InternalError".to_string(),
                message: e.to_string(),
            },
            KlonError::Input(msg) => ErrorReport {
                stage: "input",
                error_kind: "InputError".to_string(),
                message: msg.clone(),
            },
            KlonError::Config(msg) => ErrorReport {
                stage: "config",
                error_kind: "ConfigError".to_string(),
                message: msg.clone(),
            },
        }
    }
}

/// 结构化错误报告
///
/// 上层应用（CLI、Web、LSP）可以根据自己的需求格式化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// 错误阶段: input, config, engine
    pub stage: &'static str,
    /// 错误种类
    pub error_kind: String,
    /// 错误消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.error_kind, self.message)
    }
}
