//! 递归搜索模块。
//!
//! 自搜索根向下做有界深度的遍历，按发现顺序收集名称子串命中。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::metadata::{format_size, format_timestamp};
use crate::path::ResolvedPath;

/// 默认最大搜索深度。
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// 搜索命中条目。
///
/// `size` 与 `last_modified` 仅对文件命中存在，目录命中为 `None`
/// （接口约定，并非遗漏）。
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub path: String,
    pub is_file: bool,
    pub size: Option<String>,
    pub last_modified: Option<String>,
}

/// 在 `root` 下搜索名称包含 `query` 的条目（不区分大小写，空查询命中一切）。
///
/// 深度自根的直接子项记为 0；深度检查发生在下探之前，边界上的命中
/// 仍被记录。无法进入的子树被静默跳过，单个不可读目录绝不中断整体搜索。
pub fn search(root: &ResolvedPath, query: &str, max_depth: usize) -> Vec<SearchHit> {
    info!(root = %root.display(), query, max_depth, "searching files");

    let query = query.to_lowercase();
    let mut hits = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(root.as_path().to_path_buf());
    walk(root.as_path(), &query, 0, max_depth, &mut visited, &mut hits);
    hits
}

fn walk(
    dir: &Path,
    query: &str,
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<PathBuf>,
    hits: &mut Vec<SearchHit>,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            // 无法进入的子树直接跳过，搜索继续
            debug!(path = %dir.display(), error = %err, "skipping unreadable subtree");
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        let path = entry.path();

        if name.to_lowercase().contains(query) {
            hits.push(make_hit(name, &path));
        }

        // 深度检查在下探之前：边界上的命中已经记录，只是不再深入
        if path.is_dir() && depth < max_depth {
            match path.canonicalize() {
                Ok(real) => {
                    if visited.insert(real) {
                        walk(&path, query, depth + 1, max_depth, visited, hits);
                    } else {
                        debug!(path = %path.display(), "skipping already visited directory");
                    }
                }
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "skipping unresolvable directory");
                }
            }
        }
    }
}

fn make_hit(name: String, path: &Path) -> SearchHit {
    // 只 stat 一次，条目在途中消失时 is_file 与大小/时间字段保持一致
    let stat = std::fs::metadata(path).ok().filter(|m| m.is_file());
    let is_file = stat.is_some();

    SearchHit {
        name,
        path: path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string(),
        is_file,
        size: stat.as_ref().map(|m| format_size(m.len())),
        last_modified: stat
            .as_ref()
            .and_then(|m| m.modified().ok())
            .map(format_timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::resolve;

    #[test]
    fn test_search_is_case_insensitive() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("Report.TXT"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.md"), b"x").unwrap();

        let root = resolve(&dir.path().display().to_string()).unwrap();
        let hits = search(&root, "report", DEFAULT_MAX_DEPTH);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Report.TXT");
        assert!(hits[0].is_file);
        assert!(hits[0].size.is_some());
        assert!(hits[0].last_modified.is_some());
    }

    #[test]
    fn test_directory_hits_omit_size_and_mtime() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("reports")).unwrap();

        let root = resolve(&dir.path().display().to_string()).unwrap();
        let hits = search(&root, "reports", DEFAULT_MAX_DEPTH);

        assert_eq!(hits.len(), 1);
        assert!(!hits[0].is_file);
        assert!(hits[0].size.is_none());
        assert!(hits[0].last_modified.is_none());
    }

    #[test]
    fn test_hit_fields_agree_when_entry_cannot_be_stated() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("present.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("present-dir")).unwrap();
        #[cfg(unix)]
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("present-link"))
            .unwrap();

        let root = resolve(&dir.path().display().to_string()).unwrap();
        let hits = search(&root, "present", DEFAULT_MAX_DEPTH);

        // 文件命中带大小/时间，其余命中（目录、stat 失败的条目）一律不带
        for hit in &hits {
            assert_eq!(hit.is_file, hit.size.is_some(), "hit: {}", hit.name);
            assert_eq!(hit.is_file, hit.last_modified.is_some(), "hit: {}", hit.name);
        }
        #[cfg(unix)]
        {
            let dangling = hits
                .iter()
                .find(|h| h.name == "present-link")
                .expect("dangling symlink should still match by name");
            assert!(!dangling.is_file);
            assert!(dangling.size.is_none());
        }
    }

    #[test]
    fn test_symlink_cycle_terminates() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let inner = dir.path().join("inner");
        std::fs::create_dir(&inner).unwrap();
        #[cfg(unix)]
        std::os::unix::fs::symlink(dir.path(), inner.join("loop")).unwrap();

        let root = resolve(&dir.path().display().to_string()).unwrap();
        // 深度上限之下的链接环由已访问集合兜底，遍历必须终止
        let hits = search(&root, "", 100);
        assert!(hits.iter().any(|h| h.name == "inner"));
    }
}
