//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber`，按 target 过滤。解析器自己的 `depscope-log`
//! 记录经 [`TracingSink`] 转成 tracing 事件，与 CLI 日志走同一条输出。

use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::ValueEnum;
use depscope_log::{Level, LogSink, Record};
use tracing::Subscriber;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    Layer,
};

use crate::config::{LogConfig, CLI_TARGET, CORE_TARGET};
use crate::error::CliError;

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// 使用指定格式和日志配置初始化日志系统
///
/// Logs go to stderr; stdout carries the report.
pub fn init_with_file<P: AsRef<Path>>(
    log_config: &LogConfig,
    format: LogFormat,
    file: Option<P>,
) -> Result<(), CliError> {
    let targets = Targets::new()
        .with_default(log_config.global)
        .with_target(CORE_TARGET, log_config.level_for(CORE_TARGET))
        .with_target(CLI_TARGET, log_config.global);

    let console = create_format_layer(format, io::stderr).with_filter(targets.clone());

    // 指定文件时同时写入控制台和文件
    let file_layer = match file {
        Some(path) => {
            let handle = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path.as_ref())
                .map_err(|source| CliError::Read {
                    path: path.as_ref().display().to_string(),
                    source,
                })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(handle))
                    .with_filter(targets),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::LogInit(e.to_string()))
}

/// Create formatter layer based on format
fn create_format_layer<S, W, F>(format: LogFormat, make_writer: F) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}

/// Forwards resolver records into `tracing` under [`CORE_TARGET`]
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, record: &Record) {
        let origin = record.target;
        let phase = record.span.unwrap_or("-");
        match record.level {
            Level::Trace => {
                tracing::trace!(target: CORE_TARGET, origin, phase, "{}", record.message)
            }
            Level::Debug => {
                tracing::debug!(target: CORE_TARGET, origin, phase, "{}", record.message)
            }
            Level::Info => {
                tracing::info!(target: CORE_TARGET, origin, phase, "{}", record.message)
            }
            Level::Warn => {
                tracing::warn!(target: CORE_TARGET, origin, phase, "{}", record.message)
            }
            Level::Error => {
                tracing::error!(target: CORE_TARGET, origin, phase, "{}", record.message)
            }
        }
    }
}
