//! 统一的应用状态。

use std::collections::HashMap;
use std::sync::Arc;

use explorer_core::ExplorerConfig;
use tokio::sync::RwLock;

use super::auth::{CredentialProvider, DirectoryUserProvider};

/// 统一的应用状态，包含所有路由共享的数据。
pub struct AppState {
    /// 浏览器配置（浏览根目录、搜索深度等）。
    pub config: ExplorerConfig,
    /// 凭证校验（部署方可替换为真实的身份提供方）。
    pub credentials: Arc<dyn CredentialProvider>,
    /// 会话令牌到用户名的映射。
    pub sessions: RwLock<HashMap<String, String>>,
}

impl AppState {
    /// 创建新的应用状态。
    pub fn new(config: ExplorerConfig) -> Self {
        let credentials = Arc::new(DirectoryUserProvider::new(
            config.base_dir.clone(),
            config.allowed_users.clone(),
        ));
        Self {
            config,
            credentials,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}
