//! 文件元数据模块。
//!
//! 每次调用都从实时文件系统状态重新构造元数据，不做任何缓存。

use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{ExplorerError, Result};
use crate::path::ResolvedPath;

/// 文件元数据记录。
#[derive(Debug, Clone, Serialize)]
pub struct FileMetadata {
    pub path: ResolvedPath,
    pub size_bytes: u64,
    /// 可读的大小表示，见 [`format_size`]。
    pub size_display: String,
    /// 最后修改时间（绝对时间点）；展示格式由调用方决定。
    pub modified_at: SystemTime,
    pub is_directory: bool,
    pub is_file: bool,
    /// 完整路径字符串中最后一个 `.` 之后的部分。路径中完全没有 `.`
    /// 时退化为文件名本身（历史行为，保持不变）。
    pub extension: String,
    /// 权限位（八进制低三位）；非 Unix 平台固定为 "000"。
    pub permission_bits: String,
    /// 从根标记到文件名的有序路径段。
    pub path_components: Vec<String>,
}

/// 检查文件元数据。
///
/// 路径在解析之后被删除时返回 `NotFound`。
pub fn inspect(path: &ResolvedPath) -> Result<FileMetadata> {
    let metadata = std::fs::metadata(path.as_path()).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ExplorerError::NotFound(path.display().to_string())
        } else {
            ExplorerError::Io(err)
        }
    })?;

    let path_str = path.display().to_string();
    let file_name = path.file_name().unwrap_or_else(|| path_str.clone());
    let extension = match path_str.rfind('.') {
        Some(idx) => path_str[idx + 1..].to_string(),
        None => file_name,
    };

    let path_components = path
        .as_path()
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    Ok(FileMetadata {
        path: path.clone(),
        size_bytes: metadata.len(),
        size_display: format_size(metadata.len()),
        modified_at: metadata.modified()?,
        is_directory: metadata.is_dir(),
        is_file: metadata.is_file(),
        extension,
        permission_bits: permission_bits(&metadata),
        path_components,
    })
}

/// 把字节数格式化为可读字符串。
///
/// 单位依次为 B、KB、MB、GB，到 GB 为止不再进位；保留两位小数，
/// 数值与单位之间有一个空格。
pub fn format_size(size_bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = size_bytes as f64;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }

    format!("{size:.2} {unit}")
}

/// 把时间点格式化为 `YYYY-MM-DD HH:MM:SS`。
pub fn format_timestamp(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(unix)]
fn permission_bits(metadata: &std::fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:03o}", metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permission_bits(_metadata: &std::fs::Metadata) -> String {
    "000".to_string()
}
