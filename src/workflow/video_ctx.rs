//! 视频处理上下文
//!
//! 封装"我正在处理第几个视频"这一信息

use crate::models::Video;
use std::fmt::Display;

/// 视频处理上下文
#[derive(Debug, Clone)]
pub struct VideoCtx {
    /// 视频在播放列表中的序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 视频总数
    pub total: usize,

    pub video: Video,
}

impl VideoCtx {
    pub fn new(index: usize, total: usize, video: Video) -> Self {
        Self {
            index,
            total,
            video,
        }
    }
}

impl Display for VideoCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[视频 {}/{} ID#{}]",
            self.index, self.total, self.video.id
        )
    }
}
