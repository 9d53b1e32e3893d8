//! Explorer Core - 文件系统遍历与搜索引擎。
//!
//! 该 crate 提供路径解析、目录列举、元数据检查与递归搜索能力，
//! 供 server 集成为 API 路由，为前端文件浏览器提供支持。

pub mod config;
pub mod error;
pub mod listing;
pub mod metadata;
pub mod path;
pub mod search;

pub use config::ExplorerConfig;
pub use error::{ExplorerError, Result};
pub use listing::{DirectoryEntry, EntryKind, Listing, list};
pub use metadata::{FileMetadata, format_size, format_timestamp, inspect};
pub use path::{ResolvedPath, resolve, resolve_or_ancestor};
pub use search::{DEFAULT_MAX_DEPTH, SearchHit, search};
