//! 路径解析模块。
//!
//! 把用户提供的相对/绝对路径字符串规范化为符号链接已解析的绝对路径。

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::{ExplorerError, Result};

/// 已解析的绝对路径。
///
/// 解析时指向一个当时存在的位置（或按宽松策略修复到最近的存在祖先），
/// 构造完成后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// 父目录，根目录没有父目录。
    pub fn parent(&self) -> Option<ResolvedPath> {
        self.0.parent().map(|p| ResolvedPath(p.to_path_buf()))
    }

    /// 最后一个路径段；根目录返回 None。
    pub fn file_name(&self) -> Option<String> {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
    }

    pub fn display(&self) -> std::path::Display<'_> {
        self.0.display()
    }

    /// 拼接一个子路径段（不做重新解析，供写入型操作使用）。
    pub fn join(&self, segment: &str) -> PathBuf {
        self.0.join(segment)
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

impl Serialize for ResolvedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.display().to_string())
    }
}

/// 解析用户提供的路径字符串。
///
/// 解析会跟随符号链接并规范化 `.`/`..` 段。路径不存在、符号链接断裂
/// 或出现无法解析的链接环时返回 `NotFound`，绝不 panic。
/// 对自身输出再次解析是幂等的。
pub fn resolve(raw: &str) -> Result<ResolvedPath> {
    let input = normalize_input(raw);
    match input.canonicalize() {
        Ok(path) => Ok(ResolvedPath(path)),
        Err(_) => Err(ExplorerError::NotFound(input.display().to_string())),
    }
}

/// 宽松解析：目标不存在时回退到最近的存在祖先。
///
/// 供目录列举入口使用；直接的元数据/查看请求应使用严格的 [`resolve`]。
pub fn resolve_or_ancestor(raw: &str) -> Result<ResolvedPath> {
    let input = normalize_input(raw);
    if let Ok(path) = input.canonicalize() {
        return Ok(ResolvedPath(path));
    }

    let mut current = input.as_path();
    while let Some(parent) = current.parent() {
        if let Ok(path) = parent.canonicalize() {
            return Ok(ResolvedPath(path));
        }
        current = parent;
    }

    Err(ExplorerError::NotFound(input.display().to_string()))
}

/// POSIX 平台上补全缺失的前导分隔符；其他平台按原样使用。
fn normalize_input(raw: &str) -> PathBuf {
    #[cfg(unix)]
    if !raw.starts_with('/') {
        return PathBuf::from(format!("/{raw}"));
    }

    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_missing_path_is_not_found() {
        let err = resolve("/definitely/not/a/real/path").unwrap_err();
        assert!(matches!(err, ExplorerError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_prepends_root_separator() {
        let resolved = resolve("tmp").expect("tmp should resolve");
        assert!(resolved.as_path().is_absolute());
    }

    #[test]
    fn test_resolve_or_ancestor_repairs_to_existing_parent() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("no-such-child");
        let repaired =
            resolve_or_ancestor(&missing.display().to_string()).expect("ancestor should exist");
        assert_eq!(
            repaired.as_path(),
            dir.path().canonicalize().expect("canonicalize temp dir")
        );
    }
}
