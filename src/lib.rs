//! dynlog - 可在运行时调整的分层日志级别
//!
//! 每个分类（如 `App.Db.Pool`）从最近的已配置祖先继承级别，根分类为 `Default`。
//! 运行时修改某个分类的级别会同时作用于它的所有后代，已经获取的 Logger 无需重新获取。
//!
//! ## 模块
//!
//! - **cfg**: 类型注册表，通过 TypeOptions 按名称创建实现
//! - **log**: 级别层级、Logger 管理器、格式化器和输出目标

pub mod cfg;
pub mod log;

// 重新导出主要的公共 API
pub use cfg::{create_trait_from_type_options, register_trait, TypeOptions};

pub use log::{
    DynLogError, FilterRule, LevelFilter, LogAppender, LogFormatter, LogLevel, LogRecord,
    LogSink, Logger, LoggerConfiguration, LoggerManager, LoggerManagerConfig,
};
