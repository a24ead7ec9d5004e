//! 临时字幕文件

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// 字幕文件守卫，离开作用域时删除文件
///
/// 解析成功或失败都会删除
#[derive(Debug)]
pub struct ArtifactGuard {
    path: PathBuf,
}

impl ArtifactGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("已删除字幕文件: {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("删除字幕文件失败 {}: {}", self.path.display(), e),
        }
    }
}

/// 在目录中查找某个视频的字幕文件
///
/// 匹配 `<id>.<lang>.vtt` 或 `<id>.vtt`，多个匹配时取文件名排序后的第一个
pub async fn find_artifact(dir: &Path, video_id: &str) -> io::Result<Option<PathBuf>> {
    let prefix = format!("{}.", video_id);
    let mut matches = Vec::new();

    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(&prefix) && name.ends_with(".vtt") {
            matches.push(entry.path());
        }
    }

    matches.sort();
    Ok(matches.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_artifact_prefers_sorted_match() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vid1.en.vtt"), "a").unwrap();
        std::fs::write(dir.path().join("vid1.en-US.vtt"), "b").unwrap();
        std::fs::write(dir.path().join("vid2.en.vtt"), "c").unwrap();
        std::fs::write(dir.path().join("vid1.en.srt"), "d").unwrap();

        let found = find_artifact(dir.path(), "vid1").await.unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "vid1.en-US.vtt");

        assert!(find_artifact(dir.path(), "vid3").await.unwrap().is_none());
    }

    #[test]
    fn test_guard_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.vtt");
        std::fs::write(&path, "WEBVTT").unwrap();
        {
            let guard = ArtifactGuard::new(&path);
            assert!(guard.path().exists());
        }
        assert!(!path.exists());

        // 文件已不存在时不报错
        drop(ArtifactGuard::new(dir.path().join("missing.vtt")));
    }
}
