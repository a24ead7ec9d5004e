//! 摘要服务 - 业务能力层
//!
//! 只负责"把字幕压缩成一段摘要"，不关心流程

use crate::clients::CompletionApi;
use crate::config::Config;
use crate::error::SummarizeError;
use crate::models::SummaryOutcome;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// 摘要服务
///
/// 职责：
/// - 构建提示词
/// - 单次调用 LLM，受超时限制，不重试
/// - 去掉结果首尾空白
pub struct SummaryService {
    api: Arc<dyn CompletionApi>,
    timeout: Duration,
    word_count: usize,
}

impl SummaryService {
    /// 创建新的摘要服务
    pub fn new(api: Arc<dyn CompletionApi>, config: &Config) -> Self {
        Self::with_limits(api, config.llm_timeout, config.summary_word_count)
    }

    pub fn with_limits(api: Arc<dyn CompletionApi>, timeout: Duration, word_count: usize) -> Self {
        Self {
            api,
            timeout,
            word_count,
        }
    }

    /// 生成摘要
    ///
    /// 调用方保证 `transcript` 非空
    pub async fn summarize(&self, transcript: &str) -> SummaryOutcome {
        let prompt = self.build_prompt(transcript);
        debug!("摘要提示词长度: {} 字符", prompt.len());

        match timeout(self.timeout, self.api.complete(&prompt)).await {
            Err(_) => SummaryOutcome::Failure(SummarizeError::Timeout {
                timeout: self.timeout,
            }),
            Ok(Err(e)) => SummaryOutcome::Failure(SummarizeError::Api(format!("{:#}", e))),
            Ok(Ok(content)) => {
                let content = content.trim();
                if content.is_empty() {
                    SummaryOutcome::Failure(SummarizeError::EmptyContent)
                } else {
                    SummaryOutcome::Text(content.to_string())
                }
            }
        }
    }

    fn build_prompt(&self, transcript: &str) -> String {
        format!(
            "Summarize this video transcript in exactly {} words:\n\nTranscript:\n\"{}\"",
            self.word_count, transcript
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubApi {
        reply: Result<String, String>,
        delay: Duration,
        prompts: Mutex<Vec<String>>,
    }

    impl StubApi {
        fn new(reply: Result<&str, &str>, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                delay,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionApi for StubApi {
        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            tokio::time::sleep(self.delay).await;
            self.reply.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    #[tokio::test]
    async fn test_summary_is_trimmed() {
        let api = StubApi::new(Ok("  short summary \n"), Duration::ZERO);
        let svc = SummaryService::with_limits(api.clone(), Duration::from_secs(1), 15);

        let outcome = svc.summarize("some transcript").await;

        assert_eq!(outcome, SummaryOutcome::Text("short summary".to_string()));
        let prompts = api.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Summarize this video transcript in exactly 15 words"));
        assert!(prompts[0].contains("\"some transcript\""));
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let api = StubApi::new(Ok("late"), Duration::from_secs(5));
        let svc = SummaryService::with_limits(api, Duration::from_millis(20), 15);

        let outcome = svc.summarize("text").await;
        assert_eq!(
            outcome,
            SummaryOutcome::Failure(SummarizeError::Timeout {
                timeout: Duration::from_millis(20)
            })
        );
    }

    #[tokio::test]
    async fn test_api_error_and_empty_content() {
        let svc = SummaryService::with_limits(
            StubApi::new(Err("quota exceeded"), Duration::ZERO),
            Duration::from_secs(1),
            15,
        );
        match svc.summarize("text").await {
            SummaryOutcome::Failure(SummarizeError::Api(msg)) => {
                assert!(msg.contains("quota exceeded"))
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let svc = SummaryService::with_limits(
            StubApi::new(Ok("   "), Duration::ZERO),
            Duration::from_secs(1),
            15,
        );
        assert_eq!(
            svc.summarize("text").await,
            SummaryOutcome::Failure(SummarizeError::EmptyContent)
        );
    }
}
