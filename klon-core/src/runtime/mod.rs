//! Klon 运行时 (Runtime 层)
//!
//! 拷贝引擎实现。
//!
//! 本模块为 core 层类型提供实现：
//! - 类型分类器（tag + 拷贝策略）
//! - 身份注册表（别名/环收敛）
//! - 拷贝分派器（递归重建）

pub mod classify;
pub mod copy;
pub mod registry;

pub use classify::{classify, CopyPolicy, TypeTag};
pub use copy::{CopyEngine, CopyStats};
pub use registry::{CopyRegistry, ObjId};
