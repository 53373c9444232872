use crate::cfg::TypeOptions;
use crate::log::appender::{create_appender_from_options, register_appenders, LogAppender};
use crate::log::formatter::{create_formatter_from_options, register_formatters, LogFormatter};
use crate::log::log_record::LogRecord;
use anyhow::Result;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// 日志输出目标
///
/// 只会收到已经通过级别过滤的记录；写入失败由实现自己报告，过滤层不重试也不吞掉
#[async_trait::async_trait]
pub trait LogSink: Send + Sync {
    /// 写入一条日志记录
    async fn write(&self, record: &LogRecord) -> Result<()>;

    /// 刷新缓冲区（默认实现为空操作）
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// 注册所有日志组件（只执行一次）
static REGISTER_ONCE: OnceCell<()> = OnceCell::new();

fn register_components() -> Result<()> {
    REGISTER_ONCE.get_or_try_init(|| {
        register_formatters()?;
        register_appenders()
    })?;
    Ok(())
}

/// 由 Formatter 和 Appender 组成的输出目标
pub struct FormattedSink {
    formatter: Arc<dyn LogFormatter>,
    appender: Arc<dyn LogAppender>,
}

impl FormattedSink {
    pub fn new(formatter: Arc<dyn LogFormatter>, appender: Arc<dyn LogAppender>) -> Self {
        Self {
            formatter,
            appender,
        }
    }

    /// 通过类型注册表创建 Formatter 和 Appender
    pub fn from_options(formatter: &TypeOptions, appender: &TypeOptions) -> Result<Self> {
        register_components()?;

        let formatter: Arc<dyn LogFormatter> = Arc::from(create_formatter_from_options(formatter)?);
        let appender: Arc<dyn LogAppender> = Arc::from(create_appender_from_options(appender)?);

        Ok(Self::new(formatter, appender))
    }
}

#[async_trait::async_trait]
impl LogSink for FormattedSink {
    async fn write(&self, record: &LogRecord) -> Result<()> {
        let formatted = self.formatter.format(record)?;
        self.appender.append(&formatted).await
    }

    async fn flush(&self) -> Result<()> {
        self.appender.flush().await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::level::LogLevel;

    #[tokio::test]
    async fn test_formatted_sink_writes_file() -> Result<()> {
        let temp_file = tempfile::NamedTempFile::new()?;
        let sink = FormattedSink::from_options(
            &TypeOptions::named("JsonFormatter"),
            &TypeOptions {
                type_name: "FileAppender".to_string(),
                options: serde_json::json!({ "file_path": temp_file.path() }),
            },
        )?;

        sink.write(&LogRecord::new(LogLevel::Warn, "disk almost full").with_category("App.Disk"))
            .await?;
        sink.flush().await?;

        let contents = tokio::fs::read_to_string(temp_file.path()).await?;
        let value: serde_json::Value = serde_json::from_str(contents.trim())?;
        assert_eq!(value["category"], "App.Disk");
        assert_eq!(value["level"], "WARN");

        Ok(())
    }

    #[test]
    fn test_formatted_sink_unknown_appender() {
        let result = FormattedSink::from_options(
            &TypeOptions::named("TextFormatter"),
            &TypeOptions::named("KafkaAppender"),
        );
        assert!(result.is_err());
    }
}
