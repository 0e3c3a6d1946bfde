//! depscope-log - 结构化日志系统
//!
//! 为依赖作用域解析器设计的日志系统，特点：
//! - **显式传递**：无全局logger，`Arc<Logger>` 通过参数传入
//! - **惰性格式化**：级别未启用时不格式化消息
//! - **可回放**：环形缓冲区保留最后N条日志，测试里直接断言
//!
//! # 快速开始
//!
//! ```
//! use depscope_log::{debug, Level, LogRingBuffer, Logger};
//!
//! let ring = LogRingBuffer::new(64);
//! let logger = Logger::new(Level::Debug).with_sink(ring.clone());
//! debug!(logger, "resolving {}", "AppModule");
//! assert_eq!(ring.len(), 1);
//! ```

mod logger;
mod macros;
mod record;
mod ring_buffer;

pub use logger::{LogSink, Logger, SpanGuard};
pub use record::{Level, Record};
pub use ring_buffer::LogRingBuffer;

// 宏通过 #[macro_export] 自动导出到 crate 根：
// trace!, debug!, info!, warn!, error!, log!

/// 日志结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// 日志系统错误类型
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 无法识别的级别名称
    #[error("unknown log level: {0}")]
    UnknownLevel(String),
}

impl From<depscope_config::LogLevel> for Level {
    fn from(level: depscope_config::LogLevel) -> Self {
        use depscope_config::LogLevel;
        match level {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }
}

impl std::str::FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        depscope_config::LogLevel::parse(s)
            .map(Level::from)
            .ok_or_else(|| Error::UnknownLevel(s.to_string()))
    }
}
