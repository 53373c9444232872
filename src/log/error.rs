use crate::log::level::LogLevel;
use thiserror::Error;

/// 动态日志相关错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DynLogError {
    #[error("logger manager already initialized")]
    AlreadyInitialized,

    #[error("invalid category: '{0}'")]
    InvalidCategory(String),

    #[error(
        "inconsistent state for category '{category}': ({first_configured:?}, {first_effective}) vs ({second_configured:?}, {second_effective})"
    )]
    InconsistentState {
        category: String,
        first_configured: Option<LogLevel>,
        first_effective: LogLevel,
        second_configured: Option<LogLevel>,
        second_effective: LogLevel,
    },
}
