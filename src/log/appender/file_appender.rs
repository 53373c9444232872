use crate::log::appender::LogAppender;
use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, OnceCell};

/// FileAppender 配置
#[derive(Debug, Clone, Deserialize)]
pub struct FileAppenderConfig {
    /// 日志文件路径
    pub file_path: String,
}

/// 文件输出器
///
/// 第一次输出时才打开文件（追加模式），父目录不存在时自动创建
pub struct FileAppender {
    file: OnceCell<Mutex<File>>,
    config: FileAppenderConfig,
}

impl FileAppender {
    pub fn new(config: FileAppenderConfig) -> Self {
        Self {
            file: OnceCell::new(),
            config,
        }
    }

    /// 获取日志文件路径
    pub fn path(&self) -> &str {
        &self.config.file_path
    }

    async fn file(&self) -> Result<&Mutex<File>> {
        self.file
            .get_or_try_init(|| async {
                let path = PathBuf::from(&self.config.file_path);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }

                let file = tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .await?;

                Ok::<_, anyhow::Error>(Mutex::new(file))
            })
            .await
    }
}

#[async_trait::async_trait]
impl LogAppender for FileAppender {
    async fn append(&self, formatted_message: &str) -> Result<()> {
        let mut file = self.file().await?.lock().await;
        file.write_all(formatted_message.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        // 尚未打开的文件没有需要刷新的内容
        if let Some(file) = self.file.get() {
            file.lock().await.flush().await?;
        }
        Ok(())
    }
}

crate::impl_from!(FileAppenderConfig => FileAppender);
crate::impl_box_from!(FileAppender => dyn LogAppender);

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_appender_append() -> Result<()> {
        let temp_file = tempfile::NamedTempFile::new()?;
        let appender = FileAppender::new(FileAppenderConfig {
            file_path: temp_file.path().to_string_lossy().to_string(),
        });

        appender.append("First message").await?;
        appender.append("Second message").await?;
        appender.flush().await?;

        let contents = tokio::fs::read_to_string(temp_file.path()).await?;
        assert_eq!(contents, "First message\nSecond message\n");

        Ok(())
    }

    #[tokio::test]
    async fn test_file_appender_creates_directory() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let log_path = temp_dir.path().join("nested").join("dir").join("test.log");

        let appender = FileAppender::new(FileAppenderConfig {
            file_path: log_path.to_string_lossy().to_string(),
        });

        // 未输出前不创建文件
        assert!(!log_path.exists());

        appender.append("Test").await?;
        assert!(log_path.exists());

        Ok(())
    }

    #[tokio::test]
    async fn test_file_appender_open_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        // 目录本身不能作为文件打开
        let appender = FileAppender::new(FileAppenderConfig {
            file_path: temp_dir.path().to_string_lossy().to_string(),
        });

        assert!(appender.append("Test").await.is_err());
    }

    #[test]
    fn test_file_appender_from_config() {
        let appender = FileAppender::from(FileAppenderConfig {
            file_path: "/tmp/test.log".to_string(),
        });
        assert_eq!(appender.path(), "/tmp/test.log");
    }
}
