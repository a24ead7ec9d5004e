//! 报告组装
//!
//! 按原始视频顺序（而不是完成顺序）输出，保证报告稳定可复现

use crate::models::{Batch, ItemOutcome, Video};
use tracing::error;

/// 单个视频在报告中的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    Summary(String),
    Failed(String),
    /// 调度正常结束时不会出现
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub video: Video,
    pub status: ReportStatus,
}

/// 最终报告
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    /// 生成了摘要的视频数
    pub summarized: usize,
    /// 失败或无摘要的视频数（含结果缺失）
    pub failed: usize,
    pub total: usize,
}

/// 按原始顺序合并批次结果
pub fn assemble(videos: &[Video], batch: &Batch) -> Report {
    let mut report = Report {
        entries: Vec::with_capacity(videos.len()),
        total: videos.len(),
        ..Default::default()
    };

    for video in videos {
        let status = match batch.get(&video.id) {
            Some(result) => match &result.outcome {
                ItemOutcome::Summary(text) => ReportStatus::Summary(text.clone()),
                ItemOutcome::Failed(failure) => ReportStatus::Failed(failure.to_string()),
            },
            None => {
                error!("没有找到视频 {} 的处理结果", video);
                ReportStatus::Missing
            }
        };

        match status {
            ReportStatus::Summary(_) => report.summarized += 1,
            ReportStatus::Failed(_) | ReportStatus::Missing => report.failed += 1,
        }

        report.entries.push(ReportEntry {
            video: video.clone(),
            status,
        });
    }

    report
}

impl Report {
    /// 渲染为控制台文本
    pub fn render(&self, word_count: usize) -> String {
        let separator = "-".repeat(36);
        let mut lines = vec!["\n\n--- 全部视频摘要 ---".to_string()];

        for entry in &self.entries {
            lines.push(format!("\n视频 ID: {}", entry.video.id));
            lines.push(format!("标题: {}", entry.video.title));
            lines.push(match &entry.status {
                ReportStatus::Summary(text) => format!("摘要 ({} 词): {}", word_count, text),
                ReportStatus::Failed(reason) => format!("状态/错误: {}", reason),
                ReportStatus::Missing => "状态/错误: 结果缺失".to_string(),
            });
            lines.push(separator.clone());
        }
        lines.push("\n--- 摘要结束 ---\n".to_string());

        lines.join("\n")
    }
}
