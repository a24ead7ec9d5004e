use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 待处理的视频
///
/// 由视频源产生，之后只读
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Video {
    /// 视频ID（同一次运行内唯一）
    pub id: String,
    /// 视频标题（仅用于显示）
    pub title: String,
}

impl Video {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// 视频观看地址
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

impl Display for Video {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.title)
    }
}
