//! # 批量执行器
//!
//! 在固定大小的线程池中并行执行转换作业。
//!
//! ## 功能
//! - 基于 rayon 线程池，同时运行的作业数不超过线程数
//! - 作业结果经 mpsc 通道按完成顺序回传，调用线程是唯一消费者
//! - 单个作业失败不影响其他作业，失败详情汇总到 [`BatchReport`]
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `batch/task.rs` 的作业与结果类型
//! - 使用 `utils/output.rs` 输出成功的转换
//! - 使用 `rayon` 进行并行计算

use crate::batch::task::{ConversionJob, ConversionOutcome};
use crate::error::{ConvertError, Result};
use crate::utils::output;

use std::path::PathBuf;
use std::sync::mpsc;

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 成功数量
    pub success: usize,
    /// 失败详情（按完成顺序）
    pub failures: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    /// 合并处理结果
    pub fn merge(&mut self, outcome: ConversionOutcome) {
        match outcome {
            ConversionOutcome::Success { .. } => self.success += 1,
            ConversionOutcome::Failure { source, error } => {
                self.failures.push((source, error));
            }
        }
    }

    /// 失败数量
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.failed()
    }

    /// 是否存在失败
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// 默认并发数：逻辑 CPU 数的两倍
pub fn default_jobs() -> usize {
    num_cpus::get() * 2
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 = 自动）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { default_jobs() } else { jobs };
        Self { jobs }
    }

    /// 实际并行作业数
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行执行全部作业，阻塞直到每个作业都产生结果
    pub fn run<F>(&self, jobs: &[ConversionJob], processor: F) -> Result<BatchReport>
    where
        F: Fn(&ConversionJob) -> ConversionOutcome + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|i| format!("heic-worker-{}", i))
            .build()?;

        let mut report = BatchReport::default();
        let processor = &processor;

        pool.in_place_scope(|scope| {
            let (tx, rx) = mpsc::channel();

            for job in jobs {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    // 接收端在所有作业结束前不会关闭
                    let _ = tx.send(processor(job));
                });
            }
            drop(tx);

            for outcome in rx {
                if let ConversionOutcome::Success { source, output: target } = &outcome {
                    output::print_conversion(
                        &source.display().to_string(),
                        &target.display().to_string(),
                    );
                }
                report.merge(outcome);
            }
        });

        Ok(report)
    }
}
