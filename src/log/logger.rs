use crate::log::filter::LevelFilter;
use crate::log::level::LogLevel;
use crate::log::log_record::{LogRecord, MetadataValue};
use crate::log::sink::LogSink;
use anyhow::Result;
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;

/// 分类日志句柄
///
/// 每个分类只有一个实例，由 LoggerManager 创建并缓存。
/// 过滤器可以原子替换，持有句柄的调用方无需重新获取就能看到级别变化。
pub struct Logger {
    name: String,
    filter: ArcSwap<LevelFilter>,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub(crate) fn new(name: impl Into<String>, filter: LevelFilter, sink: Arc<dyn LogSink>) -> Self {
        Self {
            name: name.into(),
            filter: ArcSwap::from_pointee(filter),
            sink,
        }
    }

    /// 分类名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 当前过滤器
    pub fn filter(&self) -> LevelFilter {
        **self.filter.load()
    }

    pub(crate) fn set_filter(&self, filter: LevelFilter) {
        self.filter.store(Arc::new(filter));
    }

    /// 当前有效级别
    pub fn level(&self) -> LogLevel {
        self.filter().effective_level()
    }

    /// 指定级别的日志是否会被输出
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.filter.load().allows(level)
    }

    /// 记录日志
    ///
    /// 未通过过滤的记录直接丢弃并返回 Ok，输出错误原样返回
    pub async fn log(&self, mut record: LogRecord) -> Result<()> {
        if !self.is_enabled(record.level) {
            return Ok(());
        }

        record.category.clone_from(&self.name);
        self.sink.write(&record).await
    }

    /// 记录带 metadata 的日志
    ///
    /// # 示例
    ///
    /// ```ignore
    /// logger.logm(
    ///     LogLevel::Info,
    ///     "user logged in",
    ///     vec![("user_id", 12345.into()), ("username", "alice".into())],
    /// ).await?;
    /// ```
    pub async fn logm(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        metadata: impl IntoIterator<Item = (impl Into<String>, MetadataValue)>,
    ) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let mut record = LogRecord::new(level, message);
        record
            .metadata
            .extend(metadata.into_iter().map(|(key, value)| (key.into(), value)));
        self.log(record).await
    }

    pub async fn trace(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Trace, message)).await
    }

    pub async fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Debug, message)).await
    }

    pub async fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Info, message)).await
    }

    pub async fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Warn, message)).await
    }

    pub async fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Error, message)).await
    }

    pub async fn critical(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(LogLevel::Critical, message)).await
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("filter", &self.filter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::sink::testing::CaptureSink;

    fn create_test_logger(filter: LevelFilter) -> (Logger, Arc<CaptureSink>) {
        let sink = Arc::new(CaptureSink::default());
        let logger = Logger::new("App.Net", filter, sink.clone());
        (logger, sink)
    }

    #[tokio::test]
    async fn test_logger_level_filtering() -> Result<()> {
        let (logger, sink) = create_test_logger(LevelFilter::Threshold(LogLevel::Info));

        logger.debug("debug msg").await?;
        logger.info("info msg").await?;
        logger.critical("critical msg").await?;

        assert_eq!(
            sink.messages(),
            vec!["App.Net INFO info msg", "App.Net CRITICAL critical msg"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_logger_set_filter() -> Result<()> {
        let (logger, sink) = create_test_logger(LevelFilter::Threshold(LogLevel::Warn));
        assert_eq!(logger.level(), LogLevel::Warn);

        logger.set_filter(LevelFilter::Threshold(LogLevel::Trace));
        assert_eq!(logger.level(), LogLevel::Trace);

        logger.trace("now visible").await?;
        assert_eq!(sink.messages(), vec!["App.Net TRACE now visible"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_logger_never_filter() -> Result<()> {
        let (logger, sink) = create_test_logger(LevelFilter::Never);

        logger.critical("dropped").await?;

        assert_eq!(logger.level(), LogLevel::Off);
        assert!(sink.messages().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_logger_off_level_record_dropped() -> Result<()> {
        let (logger, sink) = create_test_logger(LevelFilter::Always);

        logger.log(LogRecord::new(LogLevel::Off, "never")).await?;

        assert!(sink.messages().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_logger_logm_with_metadata() -> Result<()> {
        let (logger, sink) = create_test_logger(LevelFilter::Always);

        logger
            .logm(
                LogLevel::Info,
                "user action",
                vec![("user_id", 12345i64.into()), ("action", "login".into())],
            )
            .await?;

        assert_eq!(sink.messages(), vec!["App.Net INFO user action"]);
        Ok(())
    }

    #[test]
    fn test_logger_debug_format() {
        let (logger, _) = create_test_logger(LevelFilter::Never);
        assert_eq!(format!("{:?}", logger), r#"Logger { name: "App.Net", filter: Never }"#);
    }
}
