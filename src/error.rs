//! 错误类型定义

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 数量文本解析失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("数量为空")]
    Empty,

    #[error("无效的数量: {0:?}")]
    Invalid(String),
}

/// 配置文件加载失败
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法读取配置文件 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("配置文件格式错误 {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
