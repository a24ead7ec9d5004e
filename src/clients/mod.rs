//! 外部协作方
//!
//! 每个协作方一个 trait（核心流程只依赖 trait），外加一个生产环境适配器

pub mod llm_client;
pub mod subtitle_fetcher;
pub mod youtube_client;

pub use llm_client::{CompletionApi, LlmClient};
pub use subtitle_fetcher::{FetchReport, FetchStatus, SubtitleFetcher, YtDlpFetcher};
pub use youtube_client::{VideoSource, YouTubeClient};
