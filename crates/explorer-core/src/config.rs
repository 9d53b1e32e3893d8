//! 浏览器文件浏览器配置。
//!
//! 浏览根目录是显式配置值，取代按操作系统硬编码的进程级默认目录。

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerConfig {
    /// 浏览与搜索的根目录。
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    /// 递归搜索的默认最大深度。
    #[serde(default = "default_max_search_depth")]
    pub max_search_depth: usize,
    /// 允许登录的用户名；为空时以 base_dir 下的子目录名为准。
    #[serde(default)]
    pub allowed_users: Vec<String>,
    /// HTTP 监听地址。
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl ExplorerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize explorer config")
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            max_search_depth: default_max_search_depth(),
            allowed_users: Vec::new(),
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

fn default_max_search_depth() -> usize {
    crate::search::DEFAULT_MAX_DEPTH
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}
