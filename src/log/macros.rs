//! 日志宏
//!
//! 自动捕获文件、行号和模块路径
//!
//! # 示例
//!
//! ```ignore
//! use dynlog::info;
//!
//! let logger = manager.get_logger("App.Net")?;
//!
//! // 简单日志
//! info!(logger, "connection established")?;
//!
//! // 带 metadata 的日志
//! info!(logger, "request served", "status" => 200, "path" => "/api/users")?;
//! ```

/// 按指定级别记录日志，其余宏都展开为它
#[macro_export]
macro_rules! log_at {
    ($level:expr, $logger:expr, $msg:expr) => {
        $logger.log(
            $crate::log::LogRecord::new($level, $msg)
                .with_location(file!(), line!())
                .with_module(module_path!())
        ).await
    };
    ($level:expr, $logger:expr, $msg:expr, $($key:expr => $value:expr),* $(,)?) => {
        $logger.log(
            $crate::log::LogRecord::new($level, $msg)
                .with_location(file!(), line!())
                .with_module(module_path!())
                $(.with_metadata($key, $value))*
        ).await
    };
}

/// 记录 TRACE 级别日志
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Trace, $logger, $($arg)+)
    };
}

/// 记录 DEBUG 级别日志
///
/// ```ignore
/// debug!(logger, "cache miss", "key" => "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Debug, $logger, $($arg)+)
    };
}

/// 记录 INFO 级别日志
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Info, $logger, $($arg)+)
    };
}

/// 记录 WARN 级别日志
///
/// ```ignore
/// warn!(logger, "slow query", "duration_ms" => 1500, "threshold_ms" => 1000);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Warn, $logger, $($arg)+)
    };
}

/// 记录 ERROR 级别日志
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Error, $logger, $($arg)+)
    };
}

/// 记录 CRITICAL 级别日志
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($crate::log::LogLevel::Critical, $logger, $($arg)+)
    };
}
