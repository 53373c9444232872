use crate::cfg::TypeOptions;
use crate::log::level::LogLevel;
use anyhow::Result;
use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// 默认的 provider 名称
pub const DEFAULT_PROVIDER: &str = "Console";

/// 初始级别规则
///
/// `category` 为空或为 `Default` 时作用于根分类；`level` 为空时表示 `Off`；
/// `provider` 为空时对所有 provider 生效
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilterRule {
    #[serde(default)]
    #[garde(pattern(r"^([^.]+(\.[^.]+)*)?$"))]
    pub category: Option<String>,

    #[serde(default)]
    #[garde(skip)]
    pub level: Option<LogLevel>,

    #[serde(default)]
    #[garde(skip)]
    pub provider: Option<String>,
}

impl FilterRule {
    /// 为指定分类创建规则
    pub fn new(category: impl Into<String>, level: LogLevel) -> Self {
        Self {
            category: Some(category.into()),
            level: Some(level),
            provider: None,
        }
    }

    /// 为根分类创建规则
    pub fn default_level(level: LogLevel) -> Self {
        Self {
            category: None,
            level: Some(level),
            provider: None,
        }
    }

    /// 限定规则只对某个 provider 生效
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// 规则是否适用于指定 provider
    pub fn applies_to(&self, provider: &str) -> bool {
        self.provider.as_deref().map_or(true, |p| p.is_empty() || p == provider)
    }
}

/// LoggerManager 配置
///
/// # 示例
///
/// ```ignore
/// let config = LoggerManagerConfig::from_json(r#"{
///     rules: [
///         { level: "warn" },
///         { category: "App.Db", level: "debug" },
///     ],
///     formatter: { type: "TextFormatter", options: { colored: true } },
///     appender: { type: "ConsoleAppender" },
/// }"#)?;
/// let manager = LoggerManager::from_config(config)?;
/// ```
#[derive(Debug, Clone, Deserialize, SmartDefault, Validate)]
#[serde(default)]
pub struct LoggerManagerConfig {
    /// 当前 provider 名称，只应用适用于它的规则
    #[default = "Console"]
    #[garde(length(min = 1))]
    pub provider: String,

    /// 初始级别规则（有序，同一分类第一条生效）
    #[default(vec![FilterRule::default_level(LogLevel::Info)])]
    #[garde(dive)]
    pub rules: Vec<FilterRule>,

    /// Formatter 配置
    #[default(TypeOptions::named("TextFormatter"))]
    #[garde(skip)]
    pub formatter: TypeOptions,

    /// Appender 配置
    #[default(TypeOptions::named("ConsoleAppender"))]
    #[garde(skip)]
    pub appender: TypeOptions,
}

impl LoggerManagerConfig {
    /// 从 JSON 字符串创建（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// 适用于当前 provider 的规则，保持原有顺序
    pub fn provider_rules(&self) -> impl Iterator<Item = &FilterRule> + '_ {
        self.rules
            .iter()
            .filter(move |rule| rule.applies_to(&self.provider))
    }
}
