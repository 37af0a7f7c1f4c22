//! # 单文件转换任务
//!
//! 打开 → 解码 → 创建输出 → 编码，每一步对应一个失败阶段。
//!
//! 编码失败时已创建的输出文件不会被删除；输出文件的 close 错误被忽略。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调度，由 `commands/convert.rs` 组装
//! - 使用 `codec/` 的 `Decoder` / `Encoder`
//! - 使用 `utils/naming.rs` 推导输出文件名

use crate::codec::{Decoder, Encoder};
use crate::error::ConvertError;
use crate::utils::{naming, output};

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// 当前目录，作为默认输出目录
pub const CURRENT_DIR: &str = ".";

/// 单个转换作业
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub quality: i32,
}

impl ConversionJob {
    /// 创建新的转换作业
    pub fn new(source: PathBuf, output_dir: impl Into<PathBuf>, quality: i32) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            quality,
        }
    }

    /// 输出文件路径
    ///
    /// 输出目录为 `.` 时只返回文件名（相对工作目录）。
    pub fn output_path(&self) -> PathBuf {
        let name = naming::normalize_file_name(&self.source);
        if self.output_dir == Path::new(CURRENT_DIR) {
            PathBuf::from(name)
        } else {
            self.output_dir.join(name)
        }
    }
}

/// 单个作业的结果
#[derive(Debug)]
pub enum ConversionOutcome {
    Success { source: PathBuf, output: PathBuf },
    Failure { source: PathBuf, error: ConvertError },
}

/// 转换任务：持有解码器与编码器
pub struct ConversionTask<'a> {
    decoder: &'a dyn Decoder,
    encoder: &'a dyn Encoder,
}

impl<'a> ConversionTask<'a> {
    /// 用给定的解码器与编码器创建转换任务
    pub fn new(decoder: &'a dyn Decoder, encoder: &'a dyn Encoder) -> Self {
        Self { decoder, encoder }
    }

    /// 执行一个作业，错误不会向外抛出
    pub fn execute(&self, job: &ConversionJob) -> ConversionOutcome {
        output::print_verbose(&format!("Converting file: {}", job.source.display()));

        match self.convert(job) {
            Ok(output_path) => ConversionOutcome::Success {
                source: job.source.clone(),
                output: output_path,
            },
            Err(error) => ConversionOutcome::Failure {
                source: job.source.clone(),
                error,
            },
        }
    }

    fn convert(&self, job: &ConversionJob) -> Result<PathBuf, ConvertError> {
        let input = File::open(&job.source).map_err(|e| ConvertError::Open {
            path: job.source.clone(),
            source: e,
        })?;

        let image = self
            .decoder
            .decode(&mut BufReader::new(input))
            .map_err(|e| ConvertError::Decode {
                path: job.source.clone(),
                source: e,
            })?;

        let output_path = job.output_path();
        let file = File::create(&output_path).map_err(|e| ConvertError::Create {
            path: output_path.clone(),
            source: e,
        })?;

        output::print_verbose(&format!(
            "Writing to output file: {} with quality {}",
            output_path.display(),
            job.quality
        ));

        let mut writer = BufWriter::new(file);
        self.encoder
            .encode(&mut writer, &image, job.quality)
            .and_then(|()| writer.flush().map_err(anyhow::Error::from))
            .map_err(|e| ConvertError::Encode {
                path: output_path.clone(),
                source: e,
            })?;

        // writer 在此 drop，close 错误被忽略
        Ok(output_path)
    }
}
