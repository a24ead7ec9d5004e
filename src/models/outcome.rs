//! 各阶段的处理结果

use crate::error::{AcquireError, ItemFailure, SummarizeError};
use crate::models::Video;

/// 字幕获取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOutcome {
    /// 非空字幕文本
    Text(String),
    /// 确定没有字幕（不是失败）
    Absent,
    Failure(AcquireError),
}

/// 摘要结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Text(String),
    Failure(SummarizeError),
}

/// 单个视频的最终结果：要么有摘要，要么有失败原因，二者只居其一
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Summary(String),
    Failed(ItemFailure),
}

/// 单个视频的处理结果，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    pub video: Video,
    pub outcome: ItemOutcome,
}

impl ProcessingResult {
    pub fn summarized(video: Video, summary: impl Into<String>) -> Self {
        Self {
            video,
            outcome: ItemOutcome::Summary(summary.into()),
        }
    }

    pub fn failed(video: Video, failure: ItemFailure) -> Self {
        Self {
            video,
            outcome: ItemOutcome::Failed(failure),
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match &self.outcome {
            ItemOutcome::Summary(text) => Some(text),
            ItemOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ItemFailure> {
        match &self.outcome {
            ItemOutcome::Summary(_) => None,
            ItemOutcome::Failed(failure) => Some(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Summary(_))
    }
}
