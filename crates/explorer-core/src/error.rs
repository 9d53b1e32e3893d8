use thiserror::Error;

/// 文件系统引擎错误类型。
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("路径不存在: {0}")]
    NotFound(String),

    #[error("无法访问: {0}")]
    Inaccessible(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
