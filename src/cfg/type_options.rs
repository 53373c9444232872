// TypeOptions：按名称选择实现类型，并携带该类型的配置

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 类型选项结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeOptions {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "empty_options")]
    pub options: JsonValue,
}

fn empty_options() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

impl TypeOptions {
    /// 以类型名和空配置创建
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            options: empty_options(),
        }
    }

    /// 从 JSON 字符串创建 TypeOptions（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建 TypeOptions
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建 TypeOptions
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json5_support() -> Result<()> {
        let type_options = TypeOptions::from_json(
            r#"
        {
            // 注释
            "type": "FileAppender",
            "options": {
                file_path: "/var/log/app.log",  // 未引用的键
            }
        }"#,
        )?;

        assert_eq!(type_options.type_name, "FileAppender");
        assert_eq!(type_options.options["file_path"], "/var/log/app.log");
        Ok(())
    }

    #[test]
    fn test_yaml_and_toml() -> Result<()> {
        let from_yaml = TypeOptions::from_yaml(
            r#"
type: TextFormatter
options:
  colored: true
"#,
        )?;

        let from_toml = TypeOptions::from_toml(
            r#"
type = "TextFormatter"

[options]
colored = true
"#,
        )?;

        assert_eq!(from_yaml, from_toml);
        assert_eq!(from_yaml.options["colored"], true);
        Ok(())
    }

    #[test]
    fn test_missing_options_defaults_to_empty() -> Result<()> {
        let type_options = TypeOptions::from_json(r#"{ "type": "JsonFormatter" }"#)?;
        assert_eq!(type_options, TypeOptions::named("JsonFormatter"));
        Ok(())
    }

    #[test]
    fn test_invalid_json_error() {
        assert!(TypeOptions::from_json(r#"{ "type": "x", "options": { "a": "b }"#).is_err());
    }
}
