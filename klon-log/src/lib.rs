//! klon-log - 结构化日志系统
//!
//! 为 Klon 拷贝引擎设计的结构化日志系统，特点：
//! - **显式传递**：无全局logger，配置通过代码传入
//! - **非阻塞**：日志不卡主线程，满了覆盖旧数据
//! - **崩溃恢复**：环形缓冲区保留最后N条日志
//!
//! # 快速开始
//!
//! ```
//! use klon_log::{LogConfig, Level, debug};
//!
//! let (logger, ring) = LogConfig::new(Level::Debug).with_ring_buffer(1000).init();
//! debug!(logger, "engine ready");
//! ```
//!
//! 输出目标通过 feature 选择：`stdout`（默认）、`stderr`、`file`。
//! 环形缓冲区始终可用。

mod config;
mod logger;
mod record;
mod ring_buffer;
mod span;

#[macro_use]
mod macros;

pub use config::{LogConfig, OutputConfig};
#[cfg(feature = "file")]
pub use logger::FileSink;
#[cfg(feature = "stderr")]
pub use logger::StderrSink;
#[cfg(feature = "stdout")]
pub use logger::StdoutSink;
pub use logger::{LogSink, Logger, SpanGuard};
pub use record::{Level, Record};
pub use ring_buffer::{LogRingBuffer, RingBufferStats};
pub use span::{Span, SpanId};
