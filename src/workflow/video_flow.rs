//! 视频处理流程 - 流程层
//!
//! 核心职责：定义"一个视频"的完整处理流程
//!
//! 流程顺序（遇到第一个失败即终止）：
//! 1. 获取字幕，失败 → 获取失败
//! 2. 没有字幕 → "无可用字幕"
//! 3. 没有摘要客户端 → "已跳过摘要"
//! 4. 生成摘要，失败 → 摘要失败
//! 5. 成功

use crate::error::ItemFailure;
use crate::models::{ProcessingResult, SummaryOutcome, TranscriptOutcome};
use crate::services::{SummaryService, TranscriptService};
use crate::utils::{PipelineObserver, ProgressEvent};
use crate::workflow::VideoCtx;
use std::path::Path;
use std::sync::Arc;

/// 视频处理流程
///
/// - 编排字幕获取和摘要两个能力
/// - 任何失败都收进该视频自己的结果，不影响其他视频
/// - 不重试任何步骤（字幕服务内部已有重试）
pub struct VideoFlow {
    transcripts: TranscriptService,
    summarizer: Option<SummaryService>,
    observer: Arc<dyn PipelineObserver>,
}

impl VideoFlow {
    /// 创建新的视频处理流程
    ///
    /// `summarizer` 为 `None` 表示摘要客户端未配置
    pub fn new(
        transcripts: TranscriptService,
        summarizer: Option<SummaryService>,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self {
            transcripts,
            summarizer,
            observer,
        }
    }

    pub async fn run(&self, ctx: &VideoCtx, work_dir: &Path) -> ProcessingResult {
        let video = &ctx.video;
        self.observer.on_event(&ProgressEvent::WorkerStarted {
            index: ctx.index,
            video,
        });

        let transcript = match self.transcripts.acquire(video, work_dir).await {
            TranscriptOutcome::Text(text) => text,
            TranscriptOutcome::Absent => {
                return ProcessingResult::failed(video.clone(), ItemFailure::NoTranscript);
            }
            TranscriptOutcome::Failure(cause) => {
                return ProcessingResult::failed(video.clone(), ItemFailure::Acquisition(cause));
            }
        };

        let Some(summarizer) = &self.summarizer else {
            return ProcessingResult::failed(video.clone(), ItemFailure::SummarizationSkipped);
        };

        self.observer
            .on_event(&ProgressEvent::SummaryStarted { video });

        match summarizer.summarize(&transcript).await {
            SummaryOutcome::Text(summary) => {
                self.observer.on_event(&ProgressEvent::SummaryReady {
                    video,
                    summary: &summary,
                });
                ProcessingResult::summarized(video.clone(), summary)
            }
            SummaryOutcome::Failure(cause) => {
                ProcessingResult::failed(video.clone(), ItemFailure::Summarization(cause))
            }
        }
    }
}
