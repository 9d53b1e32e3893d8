//! 会话与登录路由。
//!
//! 凭证校验通过 [`CredentialProvider`] 委托出去；这里不保存任何
//! 密码，生产部署应接入真实的身份提供方。

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;
use wenlan_api_types::{LoginRequest, LoginResponse};

use super::explorer::ApiError;
use super::state::AppState;

/// 凭证校验接口。
pub trait CredentialProvider: Send + Sync {
    /// 校验用户名与凭证；通过时返回 true。
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// 基于浏览根目录的开发用凭证校验。
///
/// 用户集合为配置的 `allowed_users`，为空时取 base_dir 下的子目录名
/// （与目录布局一致的约定）。只校验用户集合与凭证非空，不校验密码
/// 内容；生产部署必须换成真实的 [`CredentialProvider`] 实现。
pub struct DirectoryUserProvider {
    base_dir: PathBuf,
    allowed_users: Vec<String>,
}

impl DirectoryUserProvider {
    pub fn new(base_dir: PathBuf, allowed_users: Vec<String>) -> Self {
        Self {
            base_dir,
            allowed_users,
        }
    }

    fn known_user(&self, username: &str) -> bool {
        if !self.allowed_users.is_empty() {
            return self.allowed_users.iter().any(|u| u == username);
        }
        self.base_dir.join(username).is_dir()
    }
}

impl CredentialProvider for DirectoryUserProvider {
    fn verify(&self, username: &str, password: &str) -> bool {
        !password.is_empty() && self.known_user(username)
    }
}

/// 创建会话 API 路由。
pub fn create_auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// 登录，成功时签发会话令牌。
async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if !state.credentials.verify(&request.username, &request.password) {
        warn!(username = %request.username, "login rejected");
        return Err(ApiError::unauthorized("invalid username or password"));
    }

    let token = Uuid::new_v4().to_string();
    state
        .sessions
        .write()
        .await
        .insert(token.clone(), request.username.clone());

    info!(username = %request.username, "login succeeded");
    let home_dir = state.config.base_dir.join(&request.username);
    Ok(Json(LoginResponse {
        token,
        home_dir: home_dir.display().to_string(),
    }))
}

/// 注销，吊销当前会话令牌。
async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<axum::http::StatusCode, ApiError> {
    let token = bearer_token(&headers).ok_or_else(|| ApiError::unauthorized("missing session token"))?;
    state.sessions.write().await.remove(&token);
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// 校验请求的会话令牌，返回会话对应的用户名。
pub async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let token = bearer_token(headers).ok_or_else(|| ApiError::unauthorized("missing session token"))?;
    state
        .sessions
        .read()
        .await
        .get(&token)
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("invalid or expired session token"))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_provider_rejects_empty_password() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("alice")).unwrap();

        let provider = DirectoryUserProvider::new(dir.path().to_path_buf(), Vec::new());
        assert!(provider.verify("alice", "secret"));
        assert!(!provider.verify("alice", ""));
        assert!(!provider.verify("mallory", "secret"));
    }

    #[test]
    fn test_allowed_users_override_directory_scan() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("alice")).unwrap();

        let provider =
            DirectoryUserProvider::new(dir.path().to_path_buf(), vec!["bob".to_string()]);
        assert!(provider.verify("bob", "secret"));
        assert!(!provider.verify("alice", "secret"));
    }
}
