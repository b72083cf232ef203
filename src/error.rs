use thiserror::Error;

#[derive(Error, Debug)]
pub enum RutestError {
    #[error("无效的 glob 模式: {0}")]
    InvalidPattern(String),

    #[error("无效的选择器: {0}")]
    InvalidSelector(#[from] regex::Error),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for RutestError {
    fn from(err: anyhow::Error) -> Self {
        RutestError::Other(err.to_string())
    }
}

/// Result type for rutest crate
pub type Result<T> = std::result::Result<T, RutestError>;
