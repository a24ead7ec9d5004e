//! 字幕获取服务 - 业务能力层
//!
//! 只负责"拿到一个视频的字幕文本"，不关心流程

use crate::clients::{FetchStatus, SubtitleFetcher};
use crate::config::Config;
use crate::error::AcquireError;
use crate::infrastructure::{find_artifact, vtt, ArtifactGuard};
use crate::models::{TranscriptOutcome, Video};
use crate::utils::{PipelineObserver, ProgressEvent};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// 字幕获取服务
///
/// 职责：
/// - 调用下载器，临时失败时按固定间隔重试
/// - 确定无字幕时立即返回，不重试
/// - 找到并解析字幕文件，解析后删除文件
pub struct TranscriptService {
    fetcher: Arc<dyn SubtitleFetcher>,
    max_retries: usize,
    retry_delay: Duration,
    observer: Arc<dyn PipelineObserver>,
}

impl TranscriptService {
    /// 创建新的字幕获取服务
    pub fn new(
        fetcher: Arc<dyn SubtitleFetcher>,
        config: &Config,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self::with_policy(
            fetcher,
            config.max_transcript_retries,
            config.transcript_retry_delay,
            observer,
        )
    }

    /// 使用自定义重试策略创建
    pub fn with_policy(
        fetcher: Arc<dyn SubtitleFetcher>,
        max_retries: usize,
        retry_delay: Duration,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self {
            fetcher,
            max_retries: max_retries.max(1),
            retry_delay,
            observer,
        }
    }

    /// 获取字幕
    ///
    /// # 参数
    /// - `video`: 视频
    /// - `work_dir`: 本次运行的工作目录，字幕文件写在这里
    pub async fn acquire(&self, video: &Video, work_dir: &Path) -> TranscriptOutcome {
        let mut last_cause = String::new();
        let mut last_log = String::new();

        for attempt in 1..=self.max_retries {
            self.observer.on_event(&ProgressEvent::FetchAttempt {
                video,
                attempt,
                max_attempts: self.max_retries,
            });

            let report = self.fetcher.fetch(&video.id, work_dir).await;

            match report.status {
                FetchStatus::DefinitivelyAbsent => {
                    self.observer.on_event(&ProgressEvent::TranscriptAbsent {
                        video,
                        reason: "下载器报告没有字幕",
                    });
                    return TranscriptOutcome::Absent;
                }
                FetchStatus::Success => return self.read_artifact(video, work_dir).await,
                FetchStatus::Transient(cause) => {
                    self.observer.on_event(&ProgressEvent::FetchFailed {
                        video,
                        attempt,
                        max_attempts: self.max_retries,
                        cause: &cause,
                        log: &report.log,
                    });
                    last_cause = cause;
                    last_log = report.log;
                }
            }

            if attempt < self.max_retries {
                self.observer.on_event(&ProgressEvent::RetryScheduled {
                    video,
                    delay: self.retry_delay,
                });
                sleep(self.retry_delay).await;
            }
        }

        TranscriptOutcome::Failure(AcquireError::Exhausted {
            attempts: self.max_retries,
            cause: last_cause,
            output: last_log,
        })
    }

    /// 查找并解析字幕文件
    ///
    /// 找不到文件或解析后为空都视为"没有字幕"而非失败
    async fn read_artifact(&self, video: &Video, work_dir: &Path) -> TranscriptOutcome {
        let path = match find_artifact(work_dir, &video.id).await {
            Ok(Some(path)) => path,
            Ok(None) => {
                self.observer.on_event(&ProgressEvent::TranscriptAbsent {
                    video,
                    reason: "下载成功但未找到字幕文件",
                });
                return TranscriptOutcome::Absent;
            }
            Err(e) => {
                return TranscriptOutcome::Failure(AcquireError::WorkDir {
                    path: work_dir.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        // 无论解析结果如何，离开本函数时删除文件
        let guard = ArtifactGuard::new(path);

        let content = match tokio::fs::read_to_string(guard.path()).await {
            Ok(content) => content,
            Err(e) => {
                return TranscriptOutcome::Failure(AcquireError::Artifact {
                    path: guard.path().display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let text = vtt::extract_text(&content);
        if text.is_empty() {
            self.observer.on_event(&ProgressEvent::TranscriptAbsent {
                video,
                reason: "字幕文件内容为空",
            });
            return TranscriptOutcome::Absent;
        }

        self.observer.on_event(&ProgressEvent::TranscriptReady { video, text: &text });
        TranscriptOutcome::Text(text)
    }
}
