//! CLI 配置
//!
//! 日志配置：全局级别加上解析器记录的单独级别

use depscope_config::LogLevel;
use tracing::Level;

/// tracing target of the CLI itself
pub const CLI_TARGET: &str = "depscope::cli";
/// tracing target that bridged resolver records are emitted under
pub const CORE_TARGET: &str = "depscope::core";

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub core: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            core: None,
        }
    }
}

impl LogConfig {
    pub fn from_level(level: LogLevel) -> Self {
        Self {
            global: to_tracing(level),
            core: None,
        }
    }

    /// Override the level of bridged resolver records
    pub fn with_core(mut self, core: Option<LogLevel>) -> Self {
        self.core = core.map(to_tracing);
        self
    }

    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            CORE_TARGET => self.core.unwrap_or(self.global),
            _ => self.global,
        }
    }
}

pub fn to_tracing(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}
