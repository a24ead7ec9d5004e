/// YouTube Data API 客户端
///
/// 负责分页拉取播放列表中的视频
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Video;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const PAGE_SIZE: u32 = 50;

/// 视频源：按顺序给出所有待处理视频
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// 返回完整的视频列表（分页已全部拉完）
    async fn list(&self) -> AppResult<Vec<Video>>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemListResponse {
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    #[serde(default)]
    id: String,
    snippet: Option<Snippet>,
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentDetails {
    #[serde(default)]
    video_id: String,
}

/// YouTube 客户端
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    playlist_id: String,
}

impl YouTubeClient {
    /// 创建新的 YouTube 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::client("youtube", e))?;

        Ok(Self {
            http,
            api_key: config.youtube_api_key.clone(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            playlist_id: config.playlist_id.clone(),
        })
    }

    /// 使用自定义 API 地址（兼容代理或测试服务）
    pub fn with_api_base(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// 拉取播放列表中的全部视频
    pub async fn list_playlist_videos(&self, playlist_id: &str) -> Result<Vec<Video>> {
        let mut videos = Vec::new();
        let mut seen = HashSet::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            let page = self.fetch_page(playlist_id, page_token.as_deref()).await?;
            page_count += 1;
            debug!(
                "播放列表 {} 第 {} 页: {} 个条目",
                playlist_id,
                page_count,
                page.items.len()
            );

            videos.extend(collect_videos(playlist_id, page.items, &mut seen));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!("✓ 从播放列表 {} 获取到 {} 个视频", playlist_id, videos.len());
        Ok(videos)
    }

    async fn fetch_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemListResponse> {
        let url = format!("{}/playlistItems", self.api_base_url);
        let max_results = PAGE_SIZE.to_string();

        let mut query: Vec<(&str, &str)> = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("PlaylistItems.List 请求失败 (播放列表: {})", playlist_id))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "PlaylistItems.List 返回错误 (HTTP {}): {}",
                status,
                extract_api_error(&body)
            );
        }

        response
            .json::<PlaylistItemListResponse>()
            .await
            .context("PlaylistItems.List 响应解析失败")
    }
}

#[async_trait]
impl VideoSource for YouTubeClient {
    async fn list(&self) -> AppResult<Vec<Video>> {
        self.list_playlist_videos(&self.playlist_id)
            .await
            .map_err(|e| AppError::Source {
                playlist_id: self.playlist_id.clone(),
                message: format!("{:#}", e),
            })
    }
}

/// 把一页条目转换为视频列表
///
/// 缺少必要字段的条目跳过；同一视频重复出现时只保留第一次，
/// `seen` 跨页共享
fn collect_videos(
    playlist_id: &str,
    items: Vec<PlaylistItem>,
    seen: &mut HashSet<String>,
) -> Vec<Video> {
    items
        .into_iter()
        .filter_map(|item| match (item.snippet, item.content_details) {
            (Some(snippet), Some(details)) if !details.video_id.is_empty() => {
                if !seen.insert(details.video_id.clone()) {
                    warn!(
                        "⚠️ 播放列表 {}: 视频 {} 重复出现（条目 {}），已跳过",
                        playlist_id, details.video_id, item.id
                    );
                    return None;
                }
                Some(Video::new(details.video_id, snippet.title))
            }
            _ => {
                warn!(
                    "⚠️ 播放列表 {}: 条目 {} 缺少必要信息，已跳过",
                    playlist_id, item.id
                );
                None
            }
        })
        .collect()
}

/// 从 Google API 错误响应中提取 message
fn extract_api_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
