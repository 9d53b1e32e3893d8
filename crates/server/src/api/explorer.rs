//! 文件浏览 API 路由。
//!
//! 提供目录浏览、元数据查看、递归搜索、上传与删除能力给前端使用。
//! 所有遍历逻辑委托给 explorer-core。

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use explorer_core::{
    ExplorerError, FileMetadata, Listing, SearchHit, format_timestamp, inspect, list, resolve,
    resolve_or_ancestor, search,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use wenlan_api_types::{ErrorResponse, SelectedPathsRequest, SelectedPathsResponse};

use super::auth::authorize;
use super::state::AppState;

/// 创建文件浏览 API 路由。
pub fn create_explorer_router() -> Router<Arc<AppState>> {
    Router::new()
        // 列出目录内容
        .route("/api/fs/list", get(list_directory))
        // 查看文件元数据
        .route("/api/fs/view", get(view_file))
        // 递归搜索
        .route("/api/fs/search", get(search_files))
        // 回显选中的文件路径
        .route("/api/fs/selected", post(selected_paths))
        // 上传文件
        .route("/api/fs/upload", post(upload_file))
        // 删除文件或目录
        .route("/api/fs/delete", post(delete_path))
}

/// 列出目录内容查询参数。
#[derive(Debug, Deserialize)]
struct ListDirectoryQuery {
    /// 目录路径。
    path: String,
}

/// 列出目录内容。
///
/// 路径不存在时修复到最近的存在祖先；列举失败时由引擎回退到父目录，
/// 响应中的 `effective_dir` 反映实际列举的目录。
async fn list_directory(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListDirectoryQuery>,
) -> Result<Json<Listing>, ApiError> {
    authorize(&state, &headers).await?;
    let dir = resolve_or_ancestor(&query.path)?;
    let listing = list(&dir)?;
    Ok(Json(listing))
}

/// 查看文件元数据查询参数。
#[derive(Debug, Deserialize)]
struct ViewFileQuery {
    path: String,
}

/// 文件元数据响应，附带展示用的修改时间字符串。
#[derive(Debug, Serialize)]
struct ViewFileResponse {
    #[serde(flatten)]
    metadata: FileMetadata,
    /// `YYYY-MM-DD HH:MM:SS` 格式的修改时间（展示层约定）。
    last_modified_display: String,
}

/// 查看文件元数据。路径不存在时返回 404。
async fn view_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ViewFileQuery>,
) -> Result<Json<ViewFileResponse>, ApiError> {
    authorize(&state, &headers).await?;
    let path = resolve(&query.path)?;
    let metadata = inspect(&path)?;
    let last_modified_display = format_timestamp(metadata.modified_at);
    Ok(Json(ViewFileResponse {
        metadata,
        last_modified_display,
    }))
}

/// 搜索查询参数。
#[derive(Debug, Deserialize)]
struct SearchQuery {
    /// 搜索根目录。
    dir: String,
    /// 名称子串（不区分大小写，空串命中一切）。
    #[serde(default)]
    query: String,
    /// 最大搜索深度；缺省取配置值。
    max_depth: Option<usize>,
}

/// 搜索结果响应。
#[derive(Debug, Serialize)]
struct SearchResponse {
    hits: Vec<SearchHit>,
    total: usize,
}

/// 在目录下递归搜索文件名。
async fn search_files(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    authorize(&state, &headers).await?;
    let root = resolve(&query.dir)?;
    let max_depth = query.max_depth.unwrap_or(state.config.max_search_depth);
    let hits = search(&root, &query.query, max_depth);
    let total = hits.len();
    Ok(Json(SearchResponse { hits, total }))
}

/// 回显用户在前端选中的文件路径。
async fn selected_paths(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SelectedPathsRequest>,
) -> Result<Json<SelectedPathsResponse>, ApiError> {
    authorize(&state, &headers).await?;
    Ok(Json(SelectedPathsResponse {
        selected_files: request.selected_files,
    }))
}

/// 上传查询参数。
#[derive(Debug, Deserialize)]
struct UploadQuery {
    /// 目标目录。
    dir: String,
}

/// 上传结果响应。
#[derive(Debug, Serialize)]
struct UploadResponse {
    saved: Vec<String>,
}

/// 把上传的文件保存到目标目录。
///
/// 文件名只取最后一个路径段，上传无法写出目标目录之外。
async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    authorize(&state, &headers).await?;
    let dir = resolve(&query.dir)?;

    let mut saved = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(format!("invalid multipart payload: {err}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let Some(file_name) = Path::new(&file_name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
        else {
            return Err(ApiError::bad_request("no selected file"));
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::bad_request(format!("failed to read upload: {err}")))?;

        let target = dir.join(&file_name);
        tokio::fs::write(&target, &bytes)
            .await
            .map_err(ExplorerError::Io)?;
        info!(path = %target.display(), size = bytes.len(), "file uploaded");
        saved.push(file_name);
    }

    if saved.is_empty() {
        return Err(ApiError::bad_request("no file part"));
    }
    Ok(Json(UploadResponse { saved }))
}

/// 删除请求体。
#[derive(Debug, Deserialize)]
struct DeleteRequest {
    path: String,
}

/// 删除文件或整个目录树。
async fn delete_path(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<DeleteRequest>,
) -> Result<StatusCode, ApiError> {
    authorize(&state, &headers).await?;
    let path = resolve(&request.path)?;

    if path.as_path().is_file() {
        tokio::fs::remove_file(path.as_path())
            .await
            .map_err(ExplorerError::Io)?;
        info!(path = %path.display(), "file deleted");
    } else {
        tokio::fs::remove_dir_all(path.as_path())
            .await
            .map_err(ExplorerError::Io)?;
        info!(path = %path.display(), "directory deleted");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// API 错误类型。
#[derive(Debug)]
pub struct ApiError {
    message: String,
    code: String,
    status: StatusCode,
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "UNAUTHORIZED".to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "BAD_REQUEST".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        match err {
            ExplorerError::NotFound(path) => ApiError {
                message: format!("Path not found: {path}"),
                code: "PATH_NOT_FOUND".to_string(),
                status: StatusCode::NOT_FOUND,
            },
            ExplorerError::Inaccessible(path) => ApiError {
                message: format!("Directory inaccessible: {path}"),
                code: "INACCESSIBLE".to_string(),
                status: StatusCode::FORBIDDEN,
            },
            ExplorerError::Io(e) => ApiError {
                message: format!("IO error: {e}"),
                code: "IO_ERROR".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            ExplorerError::Other(e) => ApiError {
                message: e.to_string(),
                code: "INTERNAL_ERROR".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            code: self.code,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}
