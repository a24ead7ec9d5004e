//! 进度事件
//!
//! 核心流程不直接写日志，而是把事件交给注入的观察者；
//! 生产环境用 `TracingObserver` 输出到日志流

use crate::models::{ItemOutcome, ProcessingResult, Video};
use crate::utils::logging::truncate_text;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 流水线进度事件
#[derive(Debug, Clone)]
pub enum ProgressEvent<'a> {
    BatchStarted {
        total: usize,
        concurrency_limit: usize,
    },
    WorkerStarted {
        index: usize,
        video: &'a Video,
    },
    FetchAttempt {
        video: &'a Video,
        attempt: usize,
        max_attempts: usize,
    },
    FetchFailed {
        video: &'a Video,
        attempt: usize,
        max_attempts: usize,
        cause: &'a str,
        log: &'a str,
    },
    RetryScheduled {
        video: &'a Video,
        delay: Duration,
    },
    TranscriptAbsent {
        video: &'a Video,
        reason: &'static str,
    },
    TranscriptReady {
        video: &'a Video,
        text: &'a str,
    },
    SummaryStarted {
        video: &'a Video,
    },
    SummaryReady {
        video: &'a Video,
        summary: &'a str,
    },
    ItemFinished {
        index: usize,
        result: &'a ProcessingResult,
    },
    BatchFinished {
        collected: usize,
        total: usize,
    },
}

/// 进度观察者
///
/// 会被多个 worker 并发调用
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &ProgressEvent<'_>);
}

/// 丢弃所有事件
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_event(&self, _event: &ProgressEvent<'_>) {}
}

/// 把事件写入 tracing 日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver {
    verbose: bool,
}

impl TracingObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &ProgressEvent<'_>) {
        match event {
            ProgressEvent::BatchStarted {
                total,
                concurrency_limit,
            } => {
                info!("\n{}", "=".repeat(60));
                info!("📦 开始并发处理 {} 个视频 (并发上限: {})", total, concurrency_limit);
                info!("{}", "=".repeat(60));
            }
            ProgressEvent::WorkerStarted { index, video } => {
                info!("[视频 {}] ▶ 开始处理: {}", index, video);
            }
            ProgressEvent::FetchAttempt {
                video,
                attempt,
                max_attempts,
            } => {
                info!(
                    "[视频 {}] 🔍 下载字幕 (尝试 {}/{})",
                    video.id, attempt, max_attempts
                );
            }
            ProgressEvent::FetchFailed {
                video,
                attempt,
                max_attempts,
                cause,
                log,
            } => {
                warn!(
                    "[视频 {}] ⚠️ 字幕下载第 {}/{} 次失败: {}",
                    video.id, attempt, max_attempts, cause
                );
                debug!("[视频 {}] 输出: {}", video.id, log);
            }
            ProgressEvent::RetryScheduled { video, delay } => {
                info!("[视频 {}] 等待 {:?} 后重试...", video.id, delay);
            }
            ProgressEvent::TranscriptAbsent { video, reason } => {
                info!("[视频 {}] 没有可用字幕: {}", video.id, reason);
            }
            ProgressEvent::TranscriptReady { video, text } => {
                info!(
                    "[视频 {}] ✓ 字幕获取成功 ({} 字符)",
                    video.id,
                    text.chars().count()
                );
                if self.verbose {
                    info!("[视频 {}]   字幕片段: {}", video.id, truncate_text(text, 100));
                } else {
                    debug!("[视频 {}]   字幕片段: {}", video.id, truncate_text(text, 100));
                }
            }
            ProgressEvent::SummaryStarted { video } => {
                info!("[视频 {}] 🤖 正在生成摘要...", video.id);
            }
            ProgressEvent::SummaryReady { video, summary } => {
                info!("[视频 {}] ✓ 摘要生成成功", video.id);
                debug!("[视频 {}]   摘要: {}", video.id, summary);
            }
            ProgressEvent::ItemFinished { index, result } => match &result.outcome {
                ItemOutcome::Summary(_) => {
                    info!("[视频 {}] ✅ 处理完成", index);
                }
                ItemOutcome::Failed(failure) if failure.is_skipped() => {
                    warn!("[视频 {}] ⏭ {}", index, failure);
                }
                ItemOutcome::Failed(failure) => {
                    error!("[视频 {}] ❌ 处理失败: {}", index, failure);
                }
            },
            ProgressEvent::BatchFinished { collected, total } => {
                info!("\n{}", "─".repeat(60));
                info!("✓ 全部 worker 已结束: 收集到 {}/{} 个结果", collected, total);
                info!("{}", "─".repeat(60));
            }
        }
    }
}
