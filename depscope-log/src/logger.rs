//! 日志器实现

use crate::record::{Level, Record};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 日志输出目标trait
pub trait LogSink: Send + Sync {
    /// 写入日志记录
    fn write(&self, record: &Record);
}

/// 日志器配置和状态
pub struct Logger {
    /// 当前日志级别（原子存储）
    level: AtomicU8,
    /// 输出目标列表
    sinks: Mutex<Vec<Box<dyn LogSink>>>,
    /// Span栈（用于跟踪嵌套解析）
    span_stack: Mutex<Vec<&'static str>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // sink 崩溃不应让日志器永久失效
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Logger {
    /// 创建新的日志器
    pub fn new(level: Level) -> Arc<Self> {
        Arc::new(Logger {
            level: AtomicU8::new(level as u8),
            sinks: Mutex::new(Vec::new()),
            span_stack: Mutex::new(Vec::new()),
        })
    }

    /// 创建不输出任何内容的日志器
    pub fn noop() -> Arc<Self> {
        Self::new(Level::Error)
    }

    /// 添加输出目标
    pub fn with_sink<S: LogSink + 'static>(self: Arc<Self>, sink: S) -> Arc<Self> {
        self.add_sink(sink);
        self
    }

    /// 添加输出目标（已共享的日志器）
    pub fn add_sink<S: LogSink + 'static>(&self, sink: S) {
        lock(&self.sinks).push(Box::new(sink));
    }

    /// 动态设置日志级别
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// 获取当前日志级别
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or(Level::Info)
    }

    /// 检查指定级别是否启用
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// 记录日志（宏的落点）
    #[inline(never)]
    pub fn log(&self, level: Level, target: &'static str, message: impl Into<String>) {
        if !self.is_enabled(level) {
            return;
        }

        let mut record = Record::new(level, target, message);
        let span = lock(&self.span_stack).last().copied();
        if let Some(span) = span {
            record = record.with_span(span);
        }

        for sink in lock(&self.sinks).iter() {
            sink.write(&record);
        }
    }

    /// 进入一个新的span，返回守卫对象
    pub fn enter_span(self: &Arc<Self>, name: &'static str) -> SpanGuard {
        lock(&self.span_stack).push(name);
        SpanGuard {
            logger: Arc::clone(self),
        }
    }

    /// 获取当前span栈深度
    pub fn span_depth(&self) -> usize {
        lock(&self.span_stack).len()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("sinks", &lock(&self.sinks).len())
            .finish()
    }
}

/// Span守卫，退出时自动弹出span栈
pub struct SpanGuard {
    logger: Arc<Logger>,
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        lock(&self.logger.span_stack).pop();
    }
}
