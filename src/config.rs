use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::DEFAULT_QUANTITY;

/// 配置文件结构 (~/.config/shopping-list/config.toml)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 数量无法解析时使用的默认值
    pub fallback_quantity: u32,
    /// 删除前是否弹窗确认
    pub confirm_delete: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_quantity: DEFAULT_QUANTITY,
            confirm_delete: false,
            log_level: "info".to_string(),
        }
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shopping-list").join("config.toml"))
}

/// 从TOML文件加载配置，文件不存在时返回默认值
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
