use crate::log::hierarchy::DEFAULT_CATEGORY;
use crate::log::level::LogLevel;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::time::SystemTime;

/// 元数据值
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Null,
    /// 任意 JSON 兼容的数据（包括序列化后的结构体）
    Json(Value),
}

impl Serialize for MetadataValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MetadataValue::String(s) => serializer.serialize_str(s),
            MetadataValue::I64(n) => serializer.serialize_i64(*n),
            MetadataValue::U64(n) => serializer.serialize_u64(*n),
            MetadataValue::F64(n) => serializer.serialize_f64(*n),
            MetadataValue::Bool(b) => serializer.serialize_bool(*b),
            MetadataValue::Null => serializer.serialize_none(),
            MetadataValue::Json(v) => v.serialize(serializer),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{}", s),
            MetadataValue::I64(n) => write!(f, "{}", n),
            MetadataValue::U64(n) => write!(f, "{}", n),
            MetadataValue::F64(n) => write!(f, "{}", n),
            MetadataValue::Bool(b) => write!(f, "{}", b),
            MetadataValue::Null => write!(f, "null"),
            MetadataValue::Json(v) => write!(f, "'{}'", v),
        }
    }
}

macro_rules! impl_metadata_from {
    ($($source:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$source> for MetadataValue {
                fn from(v: $source) -> Self {
                    MetadataValue::$variant(v as $target)
                }
            }
        )*
    };
}

impl_metadata_from!(
    i64 => I64 as i64,
    i32 => I64 as i64,
    u64 => U64 as u64,
    u32 => U64 as u64,
    f64 => F64 as f64,
    f32 => F64 as f64,
);

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Value> for MetadataValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Self::Null,
            v => Self::Json(v),
        }
    }
}

impl MetadataValue {
    /// 从任意实现了 Serialize 的结构体创建，序列化失败时为 Null
    pub fn from_struct<T: Serialize>(value: T) -> Self {
        serde_json::to_value(value)
            .map(MetadataValue::Json)
            .unwrap_or(MetadataValue::Null)
    }
}

/// 日志记录
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// 日志级别
    pub level: LogLevel,
    /// 日志分类（由 Logger 在输出前填充）
    pub category: String,
    /// 日志消息
    pub message: String,
    /// 模块路径
    pub module: Option<String>,
    /// 源文件路径
    pub file: Option<String>,
    /// 行号
    pub line: Option<u32>,
    /// 时间戳
    pub timestamp: SystemTime,
    /// 线程 ID
    pub thread_id: String,
    /// 自定义元数据
    pub metadata: Vec<(String, MetadataValue)>,
}

impl LogRecord {
    /// 创建新的日志记录，分类默认为 `Default`
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            category: DEFAULT_CATEGORY.to_string(),
            message: message.into(),
            module: None,
            file: None,
            line: None,
            timestamp: SystemTime::now(),
            thread_id: format!("{:?}", std::thread::current().id()),
            metadata: Vec::new(),
        }
    }

    /// 添加元数据
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// 设置位置信息（文件和行号）
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// 设置模块路径
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// 设置分类
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

impl Serialize for LogRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        use std::time::UNIX_EPOCH;

        let timestamp = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let mut map = serializer.serialize_map(Some(9))?;
        map.serialize_entry("timestamp", &timestamp)?;
        map.serialize_entry("level", &self.level)?;
        map.serialize_entry("category", &self.category)?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("module", &self.module)?;
        map.serialize_entry("file", &self.file)?;
        map.serialize_entry("line", &self.line)?;
        map.serialize_entry("thread_id", &self.thread_id)?;

        if self.metadata.is_empty() {
            map.serialize_entry("metadata", &None::<()>)?;
        } else {
            let metadata: serde_json::Map<String, Value> = self
                .metadata
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::to_value(v).unwrap_or(Value::Null)))
                .collect();
            map.serialize_entry("metadata", &metadata)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_record_new() {
        let record = LogRecord::new(LogLevel::Info, "test message");

        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.category, "Default");
        assert_eq!(record.message, "test message");
        assert!(record.module.is_none());
        assert!(record.file.is_none());
        assert!(record.line.is_none());
        assert!(record.metadata.is_empty());
        assert!(!record.thread_id.is_empty());
    }

    #[test]
    fn test_log_record_builder() {
        let record = LogRecord::new(LogLevel::Warn, "warning")
            .with_category("App.Net")
            .with_module("main")
            .with_location("main.rs", 10)
            .with_metadata("user_id", 12345)
            .with_metadata("success", true);

        assert_eq!(record.category, "App.Net");
        assert_eq!(record.module.as_deref(), Some("main"));
        assert_eq!(record.file.as_deref(), Some("main.rs"));
        assert_eq!(record.line, Some(10));
        assert_eq!(record.metadata[0], ("user_id".to_string(), MetadataValue::I64(12345)));
        assert_eq!(record.metadata[1], ("success".to_string(), MetadataValue::Bool(true)));
    }

    #[test]
    fn test_metadata_value_display() {
        assert_eq!(MetadataValue::from("hello").to_string(), "hello");
        assert_eq!(MetadataValue::from(42u32).to_string(), "42");
        assert_eq!(MetadataValue::from(false).to_string(), "false");
        assert_eq!(MetadataValue::Null.to_string(), "null");
        assert_eq!(MetadataValue::from(serde_json::json!({"a": 1})).to_string(), "'{\"a\":1}'");
    }

    #[test]
    fn test_log_record_serialize() {
        let record = LogRecord::new(LogLevel::Info, "test message")
            .with_category("App.Db")
            .with_metadata("username", "alice");

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["level"], "INFO");
        assert_eq!(value["category"], "App.Db");
        assert_eq!(value["message"], "test message");
        assert_eq!(value["metadata"]["username"], "alice");
    }

    #[test]
    fn test_log_record_serialize_without_metadata() {
        let value = serde_json::to_value(LogRecord::new(LogLevel::Debug, "m")).unwrap();
        assert_eq!(value["metadata"], Value::Null);
    }

    #[test]
    fn test_metadata_value_from_struct() {
        #[derive(Serialize)]
        struct RequestInfo {
            endpoint: String,
            duration_ms: u64,
        }

        let value = MetadataValue::from_struct(RequestInfo {
            endpoint: "/api/users".to_string(),
            duration_ms: 123,
        });

        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["endpoint"], "/api/users");
        assert_eq!(json["duration_ms"], 123);
    }
}
