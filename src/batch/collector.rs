//! # 文件收集器
//!
//! 从命令行给出的输入路径中挑选待转换的 `.heic` 文件。
//!
//! ## 规则
//! - 逐个 stat 输入路径（跟随符号链接），任一失败则整体失败，不返回部分结果
//! - 目录直接跳过，不递归
//! - 文件名转小写后以目标扩展名结尾的普通文件被选中
//! - 输出顺序与输入顺序一致
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `utils/output.rs` 输出详细信息

use crate::error::{HeicToJpegError, Result};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 默认目标扩展名
pub const HEIC_EXTENSION: &str = ".heic";

/// 输入路径分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    RegularFile,
    Directory,
    /// 套接字、设备文件等
    Other,
}

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    inputs: Vec<PathBuf>,
    /// 小写的目标扩展名（含点号）
    extension: &'static str,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            extension: HEIC_EXTENSION,
        }
    }

    /// 对单个路径分类
    pub fn classify(path: &Path) -> Result<Candidate> {
        let metadata = fs::metadata(path).map_err(|e| HeicToJpegError::AccessError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(if metadata.is_dir() {
            Candidate::Directory
        } else if metadata.is_file() {
            Candidate::RegularFile
        } else {
            Candidate::Other
        })
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let mut selected = Vec::new();

        for path in &self.inputs {
            match Self::classify(path)? {
                Candidate::Directory => {
                    output::print_skip(&format!(
                        "This is a directory. Skipping: {}",
                        path.display()
                    ));
                }
                Candidate::RegularFile if self.matches_extension(path) => {
                    output::print_verbose(&format!(
                        "Found {} file: {}",
                        self.extension,
                        path.display()
                    ));
                    selected.push(path.clone());
                }
                Candidate::RegularFile | Candidate::Other => {}
            }
        }

        Ok(selected)
    }

    /// 检查文件名是否以目标扩展名结尾
    fn matches_extension(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                name.to_string_lossy()
                    .to_lowercase()
                    .ends_with(self.extension)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        heic: PathBuf,
        heic_upper: PathBuf,
        jpg: PathBuf,
        subdir: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let heic = dir.path().join("test.heic");
        let heic_upper = dir.path().join("test2.HEIC");
        let jpg = dir.path().join("test.jpg");
        let subdir = dir.path().join("subdir");

        fs::write(&heic, b"").unwrap();
        fs::write(&heic_upper, b"").unwrap();
        fs::write(&jpg, b"").unwrap();
        fs::create_dir(&subdir).unwrap();

        Fixture {
            _dir: dir,
            heic,
            heic_upper,
            jpg,
            subdir,
        }
    }

    #[test]
    fn test_collect_single_files() {
        let f = fixture();
        let files = FileCollector::new(vec![f.heic.clone()]).collect().unwrap();
        assert_eq!(files, vec![f.heic.clone()]);

        let files = FileCollector::new(vec![f.heic_upper.clone()])
            .collect()
            .unwrap();
        assert_eq!(files, vec![f.heic_upper.clone()]);
    }

    #[test]
    fn test_collect_preserves_order_and_skips() {
        let f = fixture();
        let inputs = vec![
            f.heic_upper.clone(),
            f.subdir.clone(),
            f.jpg.clone(),
            f.heic.clone(),
        ];
        let files = FileCollector::new(inputs).collect().unwrap();
        assert_eq!(files, vec![f.heic_upper, f.heic]);
    }

    #[test]
    fn test_collect_directory_only_is_empty() {
        let f = fixture();
        let files = FileCollector::new(vec![f.subdir.clone()]).collect().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_duplicates_kept() {
        let f = fixture();
        let files = FileCollector::new(vec![f.heic.clone(), f.heic.clone()])
            .collect()
            .unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_collect_missing_path_fails_fast() {
        let f = fixture();
        let missing = PathBuf::from("/does/not/exist.heic");
        let err = FileCollector::new(vec![f.heic.clone(), missing.clone()])
            .collect()
            .unwrap_err();

        match err {
            HeicToJpegError::AccessError { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_classify() {
        let f = fixture();
        assert_eq!(
            FileCollector::classify(&f.heic).unwrap(),
            Candidate::RegularFile
        );
        assert_eq!(
            FileCollector::classify(&f.subdir).unwrap(),
            Candidate::Directory
        );
    }
}
