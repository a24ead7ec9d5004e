//! 批量视频处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次运行的资源和生命周期。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：构造 YouTube、yt-dlp、LLM 等协作方（失败即终止）
//! 2. **加载视频**：从视频源拉取完整的视频列表
//! 3. **资源管理**：创建本次运行的工作目录，结束时删除
//! 4. **并发处理**：委托 `Coordinator` 按并发上限处理所有视频
//! 5. **输出报告**：按原始顺序打印报告和统计

use crate::clients::{
    CompletionApi, LlmClient, SubtitleFetcher, VideoSource, YouTubeClient, YtDlpFetcher,
};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::WorkDir;
use crate::orchestrator::coordinator::Coordinator;
use crate::orchestrator::report::{self, Report};
use crate::services::{SummaryService, TranscriptService};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::utils::{PipelineObserver, TracingObserver};
use crate::workflow::VideoFlow;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    source: Arc<dyn VideoSource>,
    coordinator: Coordinator,
}

impl App {
    /// 初始化应用（生产环境协作方）
    pub async fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let source: Arc<dyn VideoSource> = Arc::new(YouTubeClient::new(&config)?);
        info!("✓ YouTube 客户端初始化成功");

        let fetcher: Arc<dyn SubtitleFetcher> = Arc::new(YtDlpFetcher::new(&config));

        let completion: Option<Arc<dyn CompletionApi>> = if config.summarization_enabled() {
            let client = LlmClient::new(&config);
            info!("✓ LLM 客户端初始化成功，模型: {}", client.model_name());
            let client: Arc<dyn CompletionApi> = Arc::new(client);
            Some(client)
        } else {
            warn!("⚠️ 未配置 GEMINI_API_KEY，将跳过摘要");
            None
        };

        let observer: Arc<dyn PipelineObserver> =
            Arc::new(TracingObserver::new(config.verbose_logging));

        Ok(Self::with_collaborators(
            config, source, fetcher, completion, observer,
        ))
    }

    /// 使用指定的协作方组装应用
    pub fn with_collaborators(
        config: Config,
        source: Arc<dyn VideoSource>,
        fetcher: Arc<dyn SubtitleFetcher>,
        completion: Option<Arc<dyn CompletionApi>>,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        let transcripts = TranscriptService::new(fetcher, &config, observer.clone());
        let summarizer = completion.map(|api| SummaryService::new(api, &config));
        let flow = Arc::new(VideoFlow::new(transcripts, summarizer, observer.clone()));
        let coordinator = Coordinator::new(flow, config.concurrency_limit, observer);

        Self {
            config,
            source,
            coordinator,
        }
    }

    /// 运行应用主逻辑
    ///
    /// 播放列表为空时返回 `None`
    pub async fn run(&self) -> AppResult<Option<Report>> {
        let started = Instant::now();

        info!("\n📁 正在获取播放列表视频...");
        let videos = self.source.list().await?;

        if videos.is_empty() {
            warn!("⚠️ 播放列表 {} 中没有视频，程序结束", self.config.playlist_id);
            return Ok(None);
        }

        // 工作目录在本函数任何退出路径上都会被删除
        let work_dir = WorkDir::create_in(&self.config.work_dir_base)?;

        let batch = self.coordinator.run(&videos, work_dir.path()).await;
        let report = report::assemble(&videos, &batch);

        println!("{}", report.render(self.config.summary_word_count));
        print_final_stats(
            report.summarized,
            report.failed,
            report.total,
            started.elapsed(),
        );

        work_dir.close();
        Ok(Some(report))
    }
}
