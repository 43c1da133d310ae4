//! 文件挑选 - 编排层
//!
//! 递归遍历根目录，按文件名模式挑出候选文件，并排除备份/旧版本目录。

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ConvertError, ConvertResult};

/// 路径中出现这些片段时跳过（不区分大小写）
const EXCLUDED_FRAGMENTS: [&str; 3] = ["old", "backup", ".ipynb_checkpoints"];

/// 收集根目录下所有匹配的文件
///
/// 遍历顺序确定（按文件名排序），不做排除判断。
/// 无法访问的目录项只记录警告。
pub fn collect_candidates(root: &Path, pattern: &str) -> ConvertResult<Vec<PathBuf>> {
    let pattern = Pattern::new(pattern).map_err(|e| {
        ConvertError::configuration(format!("无效的文件匹配模式 {}: {}", pattern, e))
    })?;

    if !root.is_dir() {
        return Err(ConvertError::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "根目录不存在"),
        ));
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("⚠️ 无法访问目录项: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            candidates.push(entry.into_path());
        }
    }

    debug!("在 {} 下找到 {} 个候选文件", root.display(), candidates.len());
    Ok(candidates)
}

/// 是否按路径排除
///
/// 只判断相对根目录的部分：根目录自身的名字（例如 `old_slides/`）不会导致排除。
/// 调用方需先用 [`relative_to`] 去掉根目录前缀。
pub fn should_skip_by_name(path: &Path) -> bool {
    let lowered = path.to_string_lossy().to_lowercase();
    EXCLUDED_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(fragment))
}

/// 相对根目录的路径（不在根目录下时原样返回）
pub fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_should_skip_by_name() {
        assert!(should_skip_by_name(Path::new("old_file.java")));
        assert!(should_skip_by_name(Path::new("backup_file.java")));
        assert!(should_skip_by_name(Path::new("old/file.java")));
        assert!(should_skip_by_name(Path::new(".ipynb_checkpoints/file.java")));
        assert!(should_skip_by_name(Path::new("Backup/File.java")));
        assert!(!should_skip_by_name(Path::new("normal_file.java")));
        assert!(!should_skip_by_name(Path::new("module_1/topic_100.java")));
    }

    #[test]
    fn test_collect_candidates_is_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("module_2")).unwrap();
        fs::create_dir_all(root.join("module_1")).unwrap();
        fs::write(root.join("module_2/b.java"), "").unwrap();
        fs::write(root.join("module_1/z.java"), "").unwrap();
        fs::write(root.join("module_1/a.java"), "").unwrap();
        fs::write(root.join("module_1/notes.md"), "").unwrap();
        fs::write(root.join("module_1/a.llama.cs"), "").unwrap();

        let found: Vec<PathBuf> = collect_candidates(root, "*.java")
            .unwrap()
            .iter()
            .map(|p| relative_to(p, root).to_path_buf())
            .collect();

        assert_eq!(
            found,
            vec![
                PathBuf::from("module_1/a.java"),
                PathBuf::from("module_1/z.java"),
                PathBuf::from("module_2/b.java"),
            ]
        );
    }

    #[test]
    fn test_collect_candidates_with_custom_pattern() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("slides_intro.py"), "").unwrap();
        fs::write(dir.path().join("helper.py"), "").unwrap();

        let found = collect_candidates(dir.path(), "slides_*.py").unwrap();
        assert_eq!(found, vec![dir.path().join("slides_intro.py")]);
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_candidates(&dir.path().join("missing"), "*.java").unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_candidates(dir.path(), "[").unwrap_err();
        assert!(matches!(err, ConvertError::Configuration { .. }));
    }
}
