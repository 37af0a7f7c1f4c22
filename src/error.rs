//! # 统一错误处理模块
//!
//! 定义 heic-to-jpeg 的所有错误类型，使用 `thiserror` 派生。
//!
//! - [`HeicToJpegError`]: 程序级错误，出现即终止本次运行
//! - [`ConvertError`]: 单个文件的转换错误，按阶段区分，只计入批量报告
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 程序级错误类型
#[derive(Error, Debug)]
pub enum HeicToJpegError {
    // ─────────────────────────────────────────────────────────────
    // 输入/输出路径错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to access path {}: {source}", path.display())]
    AccessError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 批量执行错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Completed with {failed} errors ({total} files)")]
    BatchFailed { failed: usize, total: usize },
}

/// 转换流水线的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Open,
    Decode,
    Create,
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "open"),
            Stage::Decode => write!(f, "decode"),
            Stage::Create => write!(f, "create"),
            Stage::Encode => write!(f, "encode"),
        }
    }
}

/// 单个文件的转换错误
///
/// `Open`/`Decode` 携带源文件路径，`Create`/`Encode` 携带输出文件路径。
/// 编解码器的错误原样保留在 `source` 中。
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("opening file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding HEIC image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("creating output file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("encoding JPEG image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl ConvertError {
    /// 出错的阶段
    pub fn stage(&self) -> Stage {
        match self {
            ConvertError::Open { .. } => Stage::Open,
            ConvertError::Decode { .. } => Stage::Decode,
            ConvertError::Create { .. } => Stage::Create,
            ConvertError::Encode { .. } => Stage::Encode,
        }
    }

    /// 底层原因（不含路径前缀）
    pub fn cause(&self) -> String {
        match self {
            ConvertError::Open { source, .. } | ConvertError::Create { source, .. } => {
                source.to_string()
            }
            ConvertError::Decode { source, .. } | ConvertError::Encode { source, .. } => {
                format!("{:#}", source)
            }
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, HeicToJpegError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_error_stage() {
        let err = ConvertError::Open {
            path: PathBuf::from("a.heic"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.stage(), Stage::Open);
        assert_eq!(err.to_string(), "opening file a.heic: gone");
        assert_eq!(err.cause(), "gone");

        let err = ConvertError::Encode {
            path: PathBuf::from("out/a.jpg"),
            source: anyhow::anyhow!("disk full"),
        };
        assert_eq!(err.stage(), Stage::Encode);
        assert!(err.to_string().starts_with("encoding JPEG image out/a.jpg"));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Decode.to_string(), "decode");
        assert_eq!(Stage::Create.to_string(), "create");
    }
}
