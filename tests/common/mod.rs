use dynlog::log::{LogRecord, LogSink};
use std::sync::Mutex;

/// 记录所有写入的日志，用于断言
#[derive(Default)]
pub struct CaptureSink {
    records: Mutex<Vec<LogRecord>>,
}

impl CaptureSink {
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| format!("{} {} {}", r.category, r.level, r.message))
            .collect()
    }
}

#[async_trait::async_trait]
impl LogSink for CaptureSink {
    async fn write(&self, record: &LogRecord) -> anyhow::Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// 把 manager 自身的诊断日志输出到测试输出
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("dynlog=debug")
        .with_test_writer()
        .try_init();
}
