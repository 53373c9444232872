use crate::log::formatter::LogFormatter;
use crate::log::log_record::LogRecord;
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;

/// JsonFormatter 配置（保留扩展性）
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct JsonFormatterConfig {}

/// JSON 格式化器
pub struct JsonFormatter {}

impl JsonFormatter {
    pub fn new(_: JsonFormatterConfig) -> Self {
        Self {}
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        Ok(serde_json::to_string(record)?)
    }
}

crate::impl_from!(JsonFormatterConfig => JsonFormatter);
crate::impl_box_from!(JsonFormatter => dyn LogFormatter);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::level::LogLevel;

    #[test]
    fn test_json_formatter_format() {
        let formatter = JsonFormatter::new(JsonFormatterConfig::default());
        let record = LogRecord::new(LogLevel::Info, "test message")
            .with_category("App.Db")
            .with_location("file.rs", 42);

        let formatted = formatter.format(&record).unwrap();
        let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();

        assert_eq!(value["level"], "INFO");
        assert_eq!(value["category"], "App.Db");
        assert_eq!(value["message"], "test message");
        assert_eq!(value["file"], "file.rs");
        assert_eq!(value["line"], 42);
        assert!(value["timestamp"].is_number());
    }
}
