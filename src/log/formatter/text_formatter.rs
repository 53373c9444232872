use crate::log::formatter::LogFormatter;
use crate::log::level::LogLevel;
use crate::log::log_record::LogRecord;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use smart_default::SmartDefault;
use std::fmt::Write;

const DIMMED: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// TextFormatter 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct TextFormatterConfig {
    /// 是否启用颜色输出
    #[default = false]
    pub colored: bool,
}

/// 文本格式化器
///
/// 格式：`[时间戳] [线程ID] 级别 [分类] [文件:行号] 消息 | k=v ...`
pub struct TextFormatter {
    config: TextFormatterConfig,
}

impl TextFormatter {
    pub fn new(config: TextFormatterConfig) -> Self {
        Self { config }
    }

    fn push_dimmed(&self, buffer: &mut String, text: &str) {
        buffer.push('[');
        if self.config.colored {
            buffer.push_str(DIMMED);
            buffer.push_str(text);
            buffer.push_str(RESET);
        } else {
            buffer.push_str(text);
        }
        buffer.push_str("] ");
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let mut result = String::with_capacity(64 + record.category.len() + record.message.len());

        let timestamp: DateTime<Utc> = record.timestamp.into();
        self.push_dimmed(&mut result, &timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string());
        self.push_dimmed(&mut result, &record.thread_id);

        if self.config.colored {
            write!(result, "{} ", colored_level(record.level))?;
        } else {
            write!(result, "{:<5} ", record.level)?;
        }

        self.push_dimmed(&mut result, &record.category);

        if let (Some(file), Some(line)) = (&record.file, record.line) {
            self.push_dimmed(&mut result, &format!("{}:{}", file, line));
        }

        result.push_str(&record.message);

        if !record.metadata.is_empty() {
            result.push_str(" |");
            for (key, value) in &record.metadata {
                result.push(' ');
                if self.config.colored {
                    write!(result, "{}{}{}", CYAN, key, RESET)?;
                } else {
                    result.push_str(key);
                }
                write!(result, "={}", value)?;
            }
        }

        Ok(result)
    }
}

/// 带颜色的日志级别字符串
fn colored_level(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Critical => "\x1b[1;31mCRIT \x1b[0m",
        LogLevel::Error => "\x1b[31mERROR\x1b[0m",
        LogLevel::Warn => "\x1b[33mWARN \x1b[0m",
        LogLevel::Info => "\x1b[32mINFO \x1b[0m",
        LogLevel::Debug => "\x1b[36mDEBUG\x1b[0m",
        LogLevel::Trace => "\x1b[37;2mTRACE\x1b[0m",
        LogLevel::Off => "OFF  ",
    }
}

crate::impl_from!(TextFormatterConfig => TextFormatter);
crate::impl_box_from!(TextFormatter => dyn LogFormatter);
