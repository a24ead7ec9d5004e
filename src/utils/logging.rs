/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 播放列表字幕摘要");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📋 播放列表: {}", config.playlist_id);
    info!("🤖 模型: {}", config.llm_model_name);
    info!("📝 摘要词数: {}", config.summary_word_count);
    info!("📊 最大并发数: {}", config.concurrency_limit);
    info!(
        "🔁 字幕下载重试: {} 次, 间隔 {:?}",
        config.max_transcript_retries, config.transcript_retry_delay
    );
    info!("⏱ LLM 超时: {:?}", config.llm_timeout);
    info!("YouTube API Key: [{}]", key_status(&config.youtube_api_key, "NOT LOADED"));
    info!(
        "Gemini API Key: [{}]",
        key_status(&config.llm_api_key, "NOT LOADED - 将跳过摘要")
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(summarized: usize, failed: usize, total: usize, elapsed: Duration) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功摘要: {}/{}", summarized, total);
    info!("❌ 失败或无摘要: {}", failed);
    info!("⏱ 总耗时: {:.2?}", elapsed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

fn key_status(key: &str, missing: &'static str) -> &'static str {
    if key.trim().is_empty() {
        missing
    } else {
        "LOADED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("abc", 5), "abc");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("字幕摘要测试", 2), "字幕...");
    }

    #[test]
    fn test_key_status_never_reveals_key() {
        assert_eq!(key_status("secret", "NOT LOADED"), "LOADED");
        assert_eq!(key_status("", "NOT LOADED"), "NOT LOADED");
    }
}
