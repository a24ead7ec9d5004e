//! 并发调度器 - 编排层
//!
//! ## 职责
//!
//! 1. **分发**：每个视频先拿到一个并发许可再启动 worker，许可耗尽时分发循环阻塞
//! 2. **收集**：worker 完成后通过无序通道把结果送回
//! 3. **等待**：所有 worker 结束后才返回批次结果
//!
//! 没有全局取消和全局超时：一个 worker 失败不会影响其他 worker，
//! 每个 worker 的运行时间由自身的重试和超时约束

use crate::models::{Batch, ProcessingResult, Video};
use crate::utils::{PipelineObserver, ProgressEvent};
use crate::workflow::{VideoCtx, VideoFlow};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::error;

/// 并发调度器
pub struct Coordinator {
    flow: Arc<VideoFlow>,
    concurrency_limit: usize,
    observer: Arc<dyn PipelineObserver>,
}

impl Coordinator {
    pub fn new(
        flow: Arc<VideoFlow>,
        concurrency_limit: usize,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self {
            flow,
            concurrency_limit: concurrency_limit.max(1),
            observer,
        }
    }

    /// 并发处理所有视频
    ///
    /// 正常结束时每个视频恰好对应一个结果
    pub async fn run(&self, videos: &[Video], work_dir: &Path) -> Batch {
        let total = videos.len();
        self.observer.on_event(&ProgressEvent::BatchStarted {
            total,
            concurrency_limit: self.concurrency_limit,
        });

        let semaphore = Arc::new(Semaphore::new(self.concurrency_limit));
        let (tx, mut rx) = mpsc::unbounded_channel::<ProcessingResult>();
        let work_dir = Arc::new(work_dir.to_path_buf());
        let mut handles = Vec::with_capacity(total);

        for (idx, video) in videos.iter().enumerate() {
            let index = idx + 1;

            // 许可耗尽时在这里等待
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!("[视频 {}] 无法获取并发许可: {}", index, e);
                    continue;
                }
            };

            let ctx = VideoCtx::new(index, total, video.clone());
            let flow = self.flow.clone();
            let observer = self.observer.clone();
            let work_dir = work_dir.clone();
            let tx = tx.clone();

            let handle = tokio::spawn(async move {
                // 许可随任务结束释放（包括 panic 展开）
                let _permit = permit;
                let result = flow.run(&ctx, &work_dir).await;
                observer.on_event(&ProgressEvent::ItemFinished {
                    index,
                    result: &result,
                });
                if tx.send(result).is_err() {
                    error!("[视频 {}] 结果通道已关闭", index);
                }
            });
            handles.push((index, handle));
        }
        drop(tx);

        let mut batch = Batch::with_capacity(total);
        while let Some(result) = rx.recv().await {
            batch.insert(result);
        }

        // 通道关闭说明所有 worker 都已退出，这里只记录异常退出的任务
        let (indices, handles): (Vec<usize>, Vec<_>) = handles.into_iter().unzip();
        for (index, joined) in indices.into_iter().zip(join_all(handles).await) {
            if let Err(e) = joined {
                error!("[视频 {}] worker 异常退出: {}", index, e);
            }
        }

        self.observer.on_event(&ProgressEvent::BatchFinished {
            collected: batch.len(),
            total,
        });

        batch
    }
}
