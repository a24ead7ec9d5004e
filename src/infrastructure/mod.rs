//! 基础设施层
//!
//! 持有文件系统资源（工作目录、临时字幕文件），只暴露能力，不认识流程

pub mod artifact;
pub mod vtt;
pub mod work_dir;

pub use artifact::{find_artifact, ArtifactGuard};
pub use work_dir::WorkDir;
