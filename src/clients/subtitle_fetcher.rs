//! 字幕下载适配器
//!
//! 把 yt-dlp 的输出分类为结构化状态。判断"确定没有字幕"的字符串匹配只在这里做

use crate::config::Config;
use crate::models::Video;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// yt-dlp 表示"没有字幕"时输出中出现的标记
const ABSENCE_MARKERS: [&str; 2] = ["no subtitles", "no suitable subtitles found"];

/// 单次下载尝试的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// 下载成功，字幕文件应已写入输出目录
    Success,
    /// 临时失败，可重试
    Transient(String),
    /// 确定没有字幕，不应重试
    DefinitivelyAbsent,
}

/// 单次下载尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub status: FetchStatus,
    /// 外部工具的原始输出，用于日志和最终错误信息
    pub log: String,
}

impl FetchReport {
    pub fn new(status: FetchStatus, log: impl Into<String>) -> Self {
        Self {
            status,
            log: log.into(),
        }
    }
}

/// 字幕下载协作方
#[async_trait]
pub trait SubtitleFetcher: Send + Sync {
    /// 下载 `video_id` 的字幕到 `out_dir`，文件名形如 `<id>.<lang>.vtt`
    async fn fetch(&self, video_id: &str, out_dir: &Path) -> FetchReport;
}

/// 基于 yt-dlp 子进程的字幕下载器
pub struct YtDlpFetcher {
    binary: String,
    subtitle_langs: String,
}

impl YtDlpFetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.ytdlp_binary.clone(),
            subtitle_langs: config.subtitle_langs.clone(),
        }
    }

    fn build_args(&self, video_id: &str, out_dir: &Path) -> Vec<String> {
        let output_template = out_dir.join("%(id)s.%(ext)s");
        vec![
            "--write-auto-sub".to_string(),
            "--write-sub".to_string(),
            "--sub-format".to_string(),
            "vtt".to_string(),
            "--sub-langs".to_string(),
            self.subtitle_langs.clone(),
            "--skip-download".to_string(),
            "-o".to_string(),
            output_template.to_string_lossy().into_owned(),
            Video::new(video_id, "").watch_url(),
        ]
    }
}

#[async_trait]
impl SubtitleFetcher for YtDlpFetcher {
    async fn fetch(&self, video_id: &str, out_dir: &Path) -> FetchReport {
        let args = self.build_args(video_id, out_dir);
        debug!("视频 {}: 执行命令: {} {}", video_id, self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) => {
                let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
                log.push_str(&String::from_utf8_lossy(&output.stderr));
                let exit = if output.status.success() {
                    Ok(())
                } else {
                    Err(format!("yt-dlp 退出状态 {}", output.status))
                };
                classify_output(exit, log)
            }
            Err(e) => FetchReport::new(
                FetchStatus::Transient(format!("无法启动 {}: {}", self.binary, e)),
                String::new(),
            ),
        }
    }
}

/// 根据退出状态和输出内容分类
///
/// 输出中出现"没有字幕"标记时，无论退出状态如何都视为确定缺失
pub fn classify_output(exit: Result<(), String>, log: String) -> FetchReport {
    if ABSENCE_MARKERS.iter().any(|marker| log.contains(marker)) {
        return FetchReport::new(FetchStatus::DefinitivelyAbsent, log);
    }
    match exit {
        Ok(()) => FetchReport::new(FetchStatus::Success, log),
        Err(cause) => FetchReport::new(FetchStatus::Transient(cause), log),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_marker_wins_over_exit_status() {
        let log = "[info] abc: There are no subtitles for the requested languages".to_string();
        assert_eq!(
            classify_output(Ok(()), log.clone()).status,
            FetchStatus::DefinitivelyAbsent
        );
        assert_eq!(
            classify_output(Err("exit 1".into()), log).status,
            FetchStatus::DefinitivelyAbsent
        );

        let log = "WARNING: no suitable subtitles found".to_string();
        assert_eq!(
            classify_output(Err("exit 1".into()), log).status,
            FetchStatus::DefinitivelyAbsent
        );
    }

    #[test]
    fn test_exit_status_decides_otherwise() {
        let ok = classify_output(Ok(()), "[info] Writing video subtitles".into());
        assert_eq!(ok.status, FetchStatus::Success);

        let failed = classify_output(Err("exit 1".into()), "HTTP Error 429".into());
        assert_eq!(failed.status, FetchStatus::Transient("exit 1".into()));
        assert_eq!(failed.log, "HTTP Error 429");
    }

    #[test]
    fn test_build_args_targets_out_dir() {
        let config = Config::default();
        let fetcher = YtDlpFetcher::new(&config);
        let args = fetcher.build_args("abc123", Path::new("/tmp/run-x"));

        assert!(args.contains(&"--skip-download".to_string()));
        assert!(args.contains(&"en.*,en".to_string()));
        assert!(args.contains(&"/tmp/run-x/%(id)s.%(ext)s".to_string()));
        assert_eq!(
            args.last().unwrap(),
            "https://www.youtube.com/watch?v=abc123"
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_transient() {
        let config = Config {
            ytdlp_binary: "definitely-not-a-real-binary-xyz".to_string(),
            ..Config::default()
        };
        let fetcher = YtDlpFetcher::new(&config);
        let dir = tempfile::tempdir().unwrap();

        let report = fetcher.fetch("abc", dir.path()).await;
        assert!(matches!(report.status, FetchStatus::Transient(_)));
    }
}
