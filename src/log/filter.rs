use crate::log::level::LogLevel;

/// 级别过滤器
///
/// 用带标签的值代替闭包，这样可以不调用任意逻辑就得到过滤器对应的有效级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelFilter {
    /// 级别不低于阈值的日志通过
    Threshold(LogLevel),
    /// 全部通过
    Always,
    /// 全部丢弃
    Never,
}

impl LevelFilter {
    /// 判断指定级别的日志是否通过
    pub fn allows(&self, level: LogLevel) -> bool {
        if level == LogLevel::Off {
            return false;
        }
        match self {
            LevelFilter::Threshold(threshold) => level >= *threshold,
            LevelFilter::Always => true,
            LevelFilter::Never => false,
        }
    }

    /// 过滤器的有效级别：能通过的最低级别，都不通过时为 `Off`
    pub fn effective_level(&self) -> LogLevel {
        LogLevel::SEVERITIES
            .into_iter()
            .find(|level| self.allows(*level))
            .unwrap_or(LogLevel::Off)
    }
}

/// 按最低级别构造过滤器
///
/// `Trace` 放行所有日志，得到 `Always`；`Off` 不放行任何日志，得到 `Never`
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Always,
            LogLevel::Off => LevelFilter::Never,
            level => LevelFilter::Threshold(level),
        }
    }
}
