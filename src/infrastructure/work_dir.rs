//! 单次运行的工作目录
//!
//! 运行开始前创建，结束后删除；任何退出路径（包括 panic 展开）都会删除

use crate::error::{AppError, AppResult};
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// 工作目录
///
/// 在配置的基础目录下创建一个独立的子目录，
/// 不同运行之间、以及与用户已有文件之间互不干扰
#[derive(Debug)]
pub struct WorkDir {
    dir: TempDir,
}

impl WorkDir {
    /// 在 `base` 下创建工作目录，`base` 不存在时一并创建
    pub fn create_in(base: &Path) -> AppResult<Self> {
        std::fs::create_dir_all(base).map_err(|e| AppError::io(base.display().to_string(), e))?;

        let dir = tempfile::Builder::new()
            .prefix("run-")
            .tempdir_in(base)
            .map_err(|e| AppError::io(base.display().to_string(), e))?;

        debug!("已创建工作目录: {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// 显式删除并记录结果；不调用时由 Drop 静默删除
    pub fn close(self) {
        let path = self.dir.path().display().to_string();
        match self.dir.close() {
            Ok(()) => info!("🧹 已删除临时字幕目录: {}", path),
            Err(e) => warn!("⚠️ 删除临时字幕目录 {} 失败: {}", path, e),
        }
    }
}
