//! 目录列举模块。
//!
//! 返回去重、排序后的直接子项列表；列举失败时一次性回退到父目录。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ExplorerError, Result};
use crate::path::ResolvedPath;

/// 目录条目类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// 目录条目。名称不以 `.` 开头，且在单次列举内唯一。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// 目录列举结果。
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub entries: Vec<DirectoryEntry>,
    /// 实际被列举的目录；发生回退时是请求目录的父目录。
    pub effective_dir: ResolvedPath,
}

/// 列出目录的直接子项。
///
/// 隐藏条目被过滤，目录在前、文件在后，两组内部均按字节序升序排序。
/// 列举失败时恰好回退一次到父目录；父目录也失败则返回 `Inaccessible`。
pub fn list(dir: &ResolvedPath) -> Result<Listing> {
    info!(path = %dir.display(), "listing directory");

    match read_entries(dir) {
        Ok(entries) => Ok(Listing {
            entries,
            effective_dir: dir.clone(),
        }),
        Err(err) => {
            warn!(
                path = %dir.display(),
                error = %err,
                "directory enumeration failed, falling back to parent"
            );
            let parent = dir
                .parent()
                .ok_or_else(|| ExplorerError::Inaccessible(dir.display().to_string()))?;
            match read_entries(&parent) {
                Ok(entries) => Ok(Listing {
                    entries,
                    effective_dir: parent,
                }),
                Err(_) => Err(ExplorerError::Inaccessible(dir.display().to_string())),
            }
        }
    }
}

fn read_entries(dir: &ResolvedPath) -> std::io::Result<Vec<DirectoryEntry>> {
    let mut directories = Vec::new();
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for entry in std::fs::read_dir(dir.as_path())? {
        let Ok(entry) = entry else { continue };

        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();

        // 符号链接解析后可能指回当前目录本身，排除
        if let Ok(file_type) = entry.file_type()
            && file_type.is_symlink()
            && path.canonicalize().is_ok_and(|p| p == dir.as_path())
        {
            continue;
        }

        let kind = if path.is_dir() {
            EntryKind::Directory
        } else if path.is_file() {
            EntryKind::File
        } else {
            // 套接字、管道、断裂的符号链接等既非目录也非文件
            continue;
        };

        // 首次出现者优先
        if !seen.insert(name.clone()) {
            continue;
        }

        match kind {
            EntryKind::Directory => directories.push(DirectoryEntry { name, kind }),
            EntryKind::File => files.push(DirectoryEntry { name, kind }),
        }
    }

    directories.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    directories.append(&mut files);
    Ok(directories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::resolve;

    #[test]
    fn test_list_orders_directories_before_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("zeta")).unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::write(dir.path().join("beta.txt"), b"x").unwrap();
        std::fs::write(dir.path().join(".hidden"), b"x").unwrap();

        let resolved = resolve(&dir.path().display().to_string()).unwrap();
        let listing = list(&resolved).expect("listing should succeed");

        let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta", "beta.txt"]);
        assert_eq!(listing.effective_dir, resolved);
    }

    #[test]
    fn test_list_vanished_directory_falls_back_to_parent() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let child = dir.path().join("child");
        std::fs::create_dir(&child).unwrap();
        std::fs::write(dir.path().join("sibling.txt"), b"x").unwrap();

        let resolved = resolve(&child.display().to_string()).unwrap();
        std::fs::remove_dir(&child).unwrap();

        let listing = list(&resolved).expect("fallback listing should succeed");
        assert_eq!(
            listing.effective_dir.as_path(),
            dir.path().canonicalize().unwrap()
        );
        assert!(listing.entries.iter().any(|e| e.name == "sibling.txt"));
    }
}
