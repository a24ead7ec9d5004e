use crate::models::ProcessingResult;
use std::collections::HashMap;

/// 一次运行的全部结果，按视频ID索引
///
/// 视频源保证ID唯一，所以插入不做冲突处理；
/// 结果数量只增不减，最终等于视频数量
#[derive(Debug, Default)]
pub struct Batch {
    results: HashMap<String, ProcessingResult>,
}

impl Batch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: HashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, result: ProcessingResult) {
        self.results.insert(result.video.id.clone(), result);
    }

    pub fn get(&self, video_id: &str) -> Option<&ProcessingResult> {
        self.results.get(video_id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
