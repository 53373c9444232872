//! 日志模块
//!
//! 按分类（点分层级名称）管理日志级别，运行时可以调整任意分类及其所有后代的级别，
//! 已经获取的 Logger 立即生效。
//!
//! # 特性
//!
//! - 日志级别：Trace, Debug, Info, Warn, Error, Critical, Off
//! - 分类按层级继承级别，`App.Db` 继承 `App`，最终继承 `Default`
//! - 运行时覆盖与恢复：`set_level(category, Some(level))` / `set_level(category, None)`
//! - 可扩展的格式化器：TextFormatter、JsonFormatter
//! - 输出目标：ConsoleAppender、FileAppender
//! - 基于配置的动态创建
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use dynlog::log::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = LoggerManagerConfig::from_json(r#"
//!         {
//!             rules: [
//!                 { level: "info" },
//!                 { category: "App.Db", level: "warn" },
//!             ],
//!             formatter: { type: "TextFormatter", options: { colored: false } },
//!             appender: { type: "ConsoleAppender", options: { target: "stdout" } },
//!         }
//!     "#)?;
//!
//!     let manager = LoggerManager::from_config(config)?;
//!     let logger = manager.get_logger("App.Db.Pool")?;
//!
//!     logger.info("dropped").await?;
//!     manager.set_level("App.Db", Some(LogLevel::Debug))?;
//!     logger.info("connection acquired").await?;
//!
//!     for config in manager.get_configurations()? {
//!         println!("{} {:?} {}", config.name, config.configured_level, config.effective_level);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod appender;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod hierarchy;
pub mod level;
pub mod log_record;
pub mod logger;
pub mod logger_manager;
pub mod macros;
pub mod sink;

// 重新导出核心类型
pub use appender::LogAppender;
pub use config::{FilterRule, LoggerManagerConfig, DEFAULT_PROVIDER};
pub use error::DynLogError;
pub use filter::LevelFilter;
pub use formatter::LogFormatter;
pub use hierarchy::DEFAULT_CATEGORY;
pub use level::LogLevel;
pub use log_record::{LogRecord, MetadataValue};
pub use logger::Logger;
pub use logger_manager::{LoggerConfiguration, LoggerManager};
pub use sink::{FormattedSink, LogSink};

// 重新导出子模块的注册函数
pub use appender::{
    register_appenders, ConsoleAppender, ConsoleAppenderConfig, FileAppender, FileAppenderConfig,
    Target,
};
pub use formatter::{
    register_formatters, JsonFormatter, JsonFormatterConfig, TextFormatter, TextFormatterConfig,
};
