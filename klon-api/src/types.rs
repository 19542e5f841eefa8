//! API 类型定义
//!
//! 拷贝操作的输出类型。

use klon_core::{CopyStats, Value};

/// 拷贝输出
#[derive(Debug)]
pub struct CopyOutput {
    /// 结构化拷贝结果
    pub value: Value,
    /// 本次调用的运行统计
    pub stats: CopyStats,
}
