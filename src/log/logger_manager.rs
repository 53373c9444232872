use crate::log::config::{FilterRule, LoggerManagerConfig};
use crate::log::error::DynLogError;
use crate::log::filter::LevelFilter;
use crate::log::hierarchy::{self, DEFAULT_CATEGORY};
use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use crate::log::sink::{FormattedSink, LogSink};
use arc_swap::ArcSwap;
use dashmap::DashMap;
use garde::Validate;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 分类的级别配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerConfiguration {
    /// 分类名
    pub name: String,
    /// 启动时配置的级别
    pub configured_level: Option<LogLevel>,
    /// 当前生效的级别
    pub effective_level: LogLevel,
}

/// Logger 管理器
///
/// 维护启动时配置的级别、运行时覆盖的过滤器、默认过滤器，以及所有分类的 Logger 句柄。
///
/// - 运行时覆盖表和句柄缓存都是并发 map，单个 key 的操作是原子的，
///   一次 `set_level` 跨多个 key 的更新不是事务性的
/// - 默认过滤器和每个句柄的过滤器都通过 ArcSwap 原子替换
/// - 启动配置只在 `initialize` 时写入一次
pub struct LoggerManager {
    sink: Arc<dyn LogSink>,
    initialized: AtomicBool,
    configured: OnceCell<HashMap<String, LogLevel>>,
    running: DashMap<String, LevelFilter>,
    default: ArcSwap<LevelFilter>,
    loggers: DashMap<String, Arc<Logger>>,
}

impl LoggerManager {
    /// 创建未初始化的管理器，所有 Logger 共享同一个输出目标
    ///
    /// 未初始化时没有任何规则，默认过滤器丢弃所有日志
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            initialized: AtomicBool::new(false),
            configured: OnceCell::new(),
            running: DashMap::new(),
            default: ArcSwap::from_pointee(LevelFilter::Never),
            loggers: DashMap::new(),
        }
    }

    /// 创建并用给定规则初始化
    pub fn with_rules<I>(sink: Arc<dyn LogSink>, rules: I) -> Result<Self, DynLogError>
    where
        I: IntoIterator<Item = FilterRule>,
    {
        let manager = Self::new(sink);
        manager.initialize(rules)?;
        Ok(manager)
    }

    /// 从配置创建
    ///
    /// 校验配置，通过类型注册表创建输出目标，并应用适用于当前 provider 的规则
    pub fn from_config(config: LoggerManagerConfig) -> anyhow::Result<Self> {
        if let Err(errors) = config.validate() {
            return Err(anyhow::anyhow!("configuration validation failed: {}", errors));
        }

        let sink = FormattedSink::from_options(&config.formatter, &config.appender)?;
        let manager = Self::with_rules(Arc::new(sink), config.provider_rules().cloned())?;
        Ok(manager)
    }

    /// 应用启动规则，只能调用一次
    ///
    /// 根分类的规则成为默认过滤器，其余规则进入运行时覆盖表；
    /// 同一分类只有第一条规则生效
    pub fn initialize<I>(&self, rules: I) -> Result<(), DynLogError>
    where
        I: IntoIterator<Item = FilterRule>,
    {
        let rules: Vec<FilterRule> = rules.into_iter().collect();
        for rule in &rules {
            if let Some(category) = rule.category.as_deref() {
                if !category.is_empty() && !hierarchy::is_valid(category) {
                    return Err(DynLogError::InvalidCategory(category.to_string()));
                }
            }
        }

        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DynLogError::AlreadyInitialized);
        }

        let mut configured = HashMap::new();
        for rule in &rules {
            let category = match rule.category.as_deref() {
                None | Some("") => DEFAULT_CATEGORY,
                Some(category) => category,
            };
            if configured.contains_key(category) {
                continue;
            }

            let level = rule.level.unwrap_or(LogLevel::Off);
            configured.insert(category.to_string(), level);

            if category == DEFAULT_CATEGORY {
                self.default.store(Arc::new(LevelFilter::from(level)));
            } else {
                self.running
                    .insert(category.to_string(), LevelFilter::from(level));
            }
        }

        let categories = configured.len();
        self.configured
            .set(configured)
            .map_err(|_| DynLogError::AlreadyInitialized)?;

        // 初始化之前创建的句柄按新规则重新解析
        self.refresh_loggers(|_| true);

        tracing::info!(rules = rules.len(), categories, "logger manager initialized");
        Ok(())
    }

    /// 获取分类的 Logger，不存在时创建
    ///
    /// 同一分类总是返回同一个实例
    pub fn get_logger(&self, category: &str) -> Result<Arc<Logger>, DynLogError> {
        if !hierarchy::is_valid(category) {
            return Err(DynLogError::InvalidCategory(category.to_string()));
        }

        if let Some(logger) = self.loggers.get(category) {
            return Ok(Arc::clone(logger.value()));
        }

        // 持有 entry 期间解析过滤器，与 set_level 的句柄遍历互斥
        let entry = self.loggers.entry(category.to_string()).or_insert_with(|| {
            Arc::new(Logger::new(
                category,
                self.resolve(category),
                Arc::clone(&self.sink),
            ))
        });
        Ok(Arc::clone(entry.value()))
    }

    /// 所有已创建 Logger 的分类名
    pub fn loggers(&self) -> Vec<String> {
        self.loggers.iter().map(|entry| entry.key().clone()).collect()
    }

    /// 设置分类及其所有后代的最低级别，`level` 为 None 时恢复为启动配置
    ///
    /// - `Default`：替换默认过滤器，恢复时使用配置的默认级别，没有配置时丢弃所有日志
    /// - 其他分类：更新覆盖表中该分类及其后代的条目（按层级匹配，`Foo.Ba` 不包含 `Foo.Bar`）；
    ///   恢复时删除这些条目，再写回命名空间内的启动配置
    ///
    /// 更新覆盖表之后，重新解析命名空间内所有已创建句柄的过滤器
    pub fn set_level(&self, category: &str, level: Option<LogLevel>) -> Result<(), DynLogError> {
        if !hierarchy::is_valid(category) {
            return Err(DynLogError::InvalidCategory(category.to_string()));
        }

        if category == DEFAULT_CATEGORY {
            let filter = match level {
                Some(level) => LevelFilter::from(level),
                None => self
                    .configured_level(DEFAULT_CATEGORY)
                    .map_or(LevelFilter::Never, LevelFilter::from),
            };
            self.default.store(Arc::new(filter));

            // 所有分类最终都继承自 Default
            let updated = self.refresh_loggers(|_| true);
            tracing::debug!(category, ?level, updated, "default log level changed");
            return Ok(());
        }

        let affected: Vec<String> = self
            .running
            .iter()
            .filter(|entry| hierarchy::is_within(entry.key(), category))
            .map(|entry| entry.key().clone())
            .collect();

        match level {
            Some(level) => {
                let filter = LevelFilter::from(level);
                self.running.insert(category.to_string(), filter);
                for key in &affected {
                    if let Some(mut entry) = self.running.get_mut(key) {
                        *entry = filter;
                    }
                }
            }
            None => {
                for key in &affected {
                    self.running.remove(key);
                }
                if let Some(configured) = self.configured.get() {
                    for (name, level) in configured {
                        if name != DEFAULT_CATEGORY && hierarchy::is_within(name, category) {
                            self.running
                                .insert(name.clone(), LevelFilter::from(*level));
                        }
                    }
                }
            }
        }

        let updated = self.refresh_loggers(|name| hierarchy::is_within(name, category));
        tracing::debug!(
            category,
            ?level,
            overrides = affected.len(),
            updated,
            "log level changed"
        );
        Ok(())
    }

    /// 获取默认分类、所有已创建分类及其祖先的级别配置，按分类名排序
    ///
    /// 同一次调用中的所有解析都基于覆盖表和默认过滤器的同一份快照
    pub fn get_configurations(&self) -> Result<Vec<LoggerConfiguration>, DynLogError> {
        let snapshot: HashMap<String, LevelFilter> = self
            .running
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        let default = **self.default.load();

        let mut results = BTreeMap::new();
        results.insert(
            DEFAULT_CATEGORY.to_string(),
            LoggerConfiguration {
                name: DEFAULT_CATEGORY.to_string(),
                configured_level: self.configured_level(DEFAULT_CATEGORY),
                effective_level: default.effective_level(),
            },
        );

        for name in self.loggers() {
            for ancestor in hierarchy::ancestors(&name).filter(|a| *a != DEFAULT_CATEGORY) {
                let filter = hierarchy::resolve(ancestor, |n| snapshot.get(n).copied(), default);
                let config = LoggerConfiguration {
                    name: ancestor.to_string(),
                    configured_level: self.configured_level(ancestor),
                    effective_level: filter.effective_level(),
                };

                if let Some(existing) = results.get(ancestor) {
                    if *existing != config {
                        tracing::error!(
                            category = ancestor,
                            ?existing,
                            ?config,
                            "inconsistent logger configuration"
                        );
                        return Err(DynLogError::InconsistentState {
                            category: ancestor.to_string(),
                            first_configured: existing.configured_level,
                            first_effective: existing.effective_level,
                            second_configured: config.configured_level,
                            second_effective: config.effective_level,
                        });
                    }
                    continue;
                }

                results.insert(ancestor.to_string(), config);
            }
        }

        Ok(results.into_values().collect())
    }

    /// 启动时配置的级别
    pub fn configured_level(&self, category: &str) -> Option<LogLevel> {
        self.configured
            .get()
            .and_then(|configured| configured.get(category).copied())
    }

    /// 分类当前的有效级别
    pub fn effective_level(&self, category: &str) -> LogLevel {
        self.resolve(category).effective_level()
    }

    /// 按层级解析分类的过滤器：最近的覆盖条目，没有时为默认过滤器
    pub fn resolve(&self, category: &str) -> LevelFilter {
        hierarchy::resolve(
            category,
            |name| self.running.get(name).map(|entry| *entry.value()),
            **self.default.load(),
        )
    }

    /// 刷新共享的输出目标
    pub async fn flush(&self) -> anyhow::Result<()> {
        self.sink.flush().await
    }

    /// 重新解析满足条件的句柄，返回更新的数量
    ///
    /// 解析和写入都在分片写锁内完成，同一句柄的并发刷新依次执行
    fn refresh_loggers<P>(&self, predicate: P) -> usize
    where
        P: Fn(&str) -> bool,
    {
        let mut updated = 0;
        for entry in self.loggers.iter_mut() {
            if predicate(entry.key()) {
                entry.value().set_filter(self.resolve(entry.key()));
                updated += 1;
            }
        }
        updated
    }
}
