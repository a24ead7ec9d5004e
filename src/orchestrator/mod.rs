//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用生命周期
//! - 构造协作方、加载视频、管理工作目录、输出报告
//!
//! ### `coordinator` - 并发调度
//! - Semaphore 限制并发，worker 结果经通道无序返回
//!
//! ### `report` - 报告组装
//! - 按原始顺序合并结果，统计成功/失败
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (一次运行)
//!     ↓
//! coordinator (处理 Vec<Video>)
//!     ↓
//! workflow::VideoFlow (处理单个 Video)
//!     ↓
//! services (能力层：transcript / summary)
//!     ↓
//! clients + infrastructure (yt-dlp / LLM / 文件)
//! ```

pub mod batch_processor;
pub mod coordinator;
pub mod report;

// 重新导出主要类型
pub use batch_processor::App;
pub use coordinator::Coordinator;
pub use report::{assemble, Report, ReportEntry, ReportStatus};
