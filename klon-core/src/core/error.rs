//! 内部错误类型
//!
//! 拷贝操作对支持的输入域是全函数，没有用户可见错误。
//! 这里只定义编程缺陷类：分类器/分派器之间的不变量被破坏。

use thiserror::Error;

/// 内部不变量违规（编程缺陷类）
///
/// Dev 配置下致命，Release 配置下降级为原子引用拷贝。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    /// 非重建策略的 tag 到达了重建路径
    #[error("non-reconstruct tag '{tag}' reached the reconstruct path")]
    PolicyMismatch { tag: &'static str },

    /// 注册表中的堆值没有身份
    #[error("registry was handed a value without heap identity")]
    MissingIdentity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InternalError::PolicyMismatch { tag: "function" };
        assert!(err.to_string().contains("function"));
        assert!(err.to_string().contains("reconstruct"));
    }
}
