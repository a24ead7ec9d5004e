//! # Playlist Summarizer
//!
//! 批量下载播放列表视频的字幕，并用 LLM 为每个视频生成简短摘要
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `infrastructure/` - 工作目录、临时字幕文件、VTT 解析
//! - `clients/` - 外部协作方（YouTube、yt-dlp、LLM），每个都在 trait 之后
//!
//! ### ② 业务能力层（Services）
//! - `TranscriptService` - 获取字幕（含重试）
//! - `SummaryService` - 生成摘要（含超时）
//!
//! ### ③ 流程层（Workflow）
//! - `VideoFlow` - 一个视频的完整流程（字幕 → 摘要），失败只影响自身
//!
//! ### ④ 编排层（Orchestration）
//! - `Coordinator` - 并发调度
//! - `report` - 按原始顺序组装报告
//! - `App` - 一次运行的生命周期

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ItemFailure};
pub use models::{Batch, ItemOutcome, ProcessingResult, Video};
pub use orchestrator::{App, Coordinator, Report, ReportStatus};
pub use utils::{PipelineObserver, ProgressEvent};
pub use workflow::{VideoCtx, VideoFlow};
