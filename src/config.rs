//! 程序配置
//!
//! 加载顺序：默认值 ← TOML 配置文件（可选）← 环境变量

use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "summarizer.toml";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- YouTube 配置 ---
    pub youtube_api_key: String,
    pub playlist_id: String,
    // --- LLM 配置 ---
    /// 为空时跳过摘要
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 单次摘要请求超时
    pub llm_timeout: Duration,
    /// 摘要目标词数
    pub summary_word_count: usize,
    // --- 字幕下载配置 ---
    pub ytdlp_binary: String,
    pub subtitle_langs: String,
    /// 临时字幕目录（每次运行在其下创建独立子目录）
    pub work_dir_base: PathBuf,
    pub max_transcript_retries: usize,
    pub transcript_retry_delay: Duration,
    // --- 调度配置 ---
    /// 同时处理的视频数量
    pub concurrency_limit: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube_api_key: String::new(),
            playlist_id: "PL8GTokWa3GEeH8kUkx0rzRWwrzlvO8JaT".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-1.5-flash-latest".to_string(),
            llm_timeout: Duration::from_secs(60),
            summary_word_count: 15,
            ytdlp_binary: "yt-dlp".to_string(),
            subtitle_langs: "en.*,en".to_string(),
            work_dir_base: PathBuf::from("./transcripts_temp"),
            max_transcript_retries: 3,
            transcript_retry_delay: Duration::from_secs(5),
            concurrency_limit: 5,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件内容，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub youtube_api_key: Option<String>,
    pub playlist_id: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: Option<String>,
    pub llm_model_name: Option<String>,
    pub llm_timeout_secs: Option<u64>,
    pub summary_word_count: Option<usize>,
    pub ytdlp_binary: Option<String>,
    pub subtitle_langs: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub max_transcript_retries: Option<usize>,
    pub transcript_retry_delay_secs: Option<u64>,
    pub concurrency_limit: Option<usize>,
    pub verbose_logging: Option<bool>,
}

impl FileConfig {
    /// 读取配置文件
    ///
    /// 未显式指定路径且默认文件不存在时返回空配置；
    /// 文件存在但无法解析则视为致命错误。
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        Self::load_with_default(explicit, Path::new(DEFAULT_CONFIG_FILE))
    }

    fn load_with_default(explicit: Option<&Path>, default: &Path) -> AppResult<Self> {
        let path = match explicit {
            Some(p) => p,
            None if default.exists() => default,
            None => return Ok(Self::default()),
        };

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileLoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| {
            AppError::from(ConfigError::FileLoadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl Config {
    /// 从配置文件和进程环境变量加载
    pub fn from_env() -> AppResult<Self> {
        let explicit = std::env::var("SUMMARIZER_CONFIG").ok().map(PathBuf::from);
        let file = FileConfig::load(explicit.as_deref())?;
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// 合并配置来源
    ///
    /// `lookup` 模拟环境变量查询，空字符串视为未设置
    pub fn from_sources<F>(file: FileConfig, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let youtube_api_key = get("YOUTUBE_API_KEY")
            .or(file.youtube_api_key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::EnvVarNotFound {
                var_name: "YOUTUBE_API_KEY".to_string(),
            })?;

        let config = Self {
            youtube_api_key,
            playlist_id: get("PLAYLIST_ID")
                .or(file.playlist_id)
                .unwrap_or(default.playlist_id),
            llm_api_key: get("GEMINI_API_KEY")
                .or(file.llm_api_key)
                .unwrap_or(default.llm_api_key),
            llm_api_base_url: get("LLM_API_BASE_URL")
                .or(file.llm_api_base_url)
                .unwrap_or(default.llm_api_base_url),
            llm_model_name: get("GEMINI_MODEL")
                .or(file.llm_model_name)
                .unwrap_or(default.llm_model_name),
            llm_timeout: parse_var::<u64>(&get, "LLM_TIMEOUT_SECS", "u64")?
                .or(file.llm_timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(default.llm_timeout),
            summary_word_count: parse_var(&get, "SUMMARY_WORD_COUNT", "usize")?
                .or(file.summary_word_count)
                .unwrap_or(default.summary_word_count),
            ytdlp_binary: get("YTDLP_BINARY")
                .or(file.ytdlp_binary)
                .unwrap_or(default.ytdlp_binary),
            subtitle_langs: get("SUBTITLE_LANGS")
                .or(file.subtitle_langs)
                .unwrap_or(default.subtitle_langs),
            work_dir_base: get("WORK_DIR")
                .map(PathBuf::from)
                .or(file.work_dir)
                .unwrap_or(default.work_dir_base),
            max_transcript_retries: parse_var(&get, "MAX_TRANSCRIPT_RETRIES", "usize")?
                .or(file.max_transcript_retries)
                .unwrap_or(default.max_transcript_retries),
            transcript_retry_delay: parse_var::<u64>(&get, "TRANSCRIPT_RETRY_DELAY_SECS", "u64")?
                .or(file.transcript_retry_delay_secs)
                .map(Duration::from_secs)
                .unwrap_or(default.transcript_retry_delay),
            concurrency_limit: parse_var(&get, "CONCURRENCY_LIMIT", "usize")?
                .or(file.concurrency_limit)
                .unwrap_or(default.concurrency_limit),
            verbose_logging: parse_var(&get, "VERBOSE_LOGGING", "bool")?
                .or(file.verbose_logging)
                .unwrap_or(default.verbose_logging),
        };

        config.validate()?;
        Ok(config)
    }

    /// 是否配置了 LLM 密钥
    pub fn summarization_enabled(&self) -> bool {
        !self.llm_api_key.trim().is_empty()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency_limit".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if self.max_transcript_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_transcript_retries".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match get(var_name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value: raw,
                expected_type: expected_type.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_key_is_set() {
        let config =
            Config::from_sources(FileConfig::default(), lookup_from(&[("YOUTUBE_API_KEY", "yt")]))
                .unwrap();

        assert_eq!(config.youtube_api_key, "yt");
        assert_eq!(config.concurrency_limit, 5);
        assert_eq!(config.max_transcript_retries, 3);
        assert_eq!(config.transcript_retry_delay, Duration::from_secs(5));
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert_eq!(config.summary_word_count, 15);
        assert!(!config.summarization_enabled());
    }

    #[test]
    fn test_missing_youtube_key_is_fatal() {
        let err = Config::from_sources(FileConfig::default(), lookup_from(&[])).unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::EnvVarNotFound { .. })
        ));

        // 空字符串等同于未设置
        let err = Config::from_sources(
            FileConfig::default(),
            lookup_from(&[("YOUTUBE_API_KEY", "  ")]),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig::parse(
            r#"
            youtube_api_key = "from-file"
            concurrency_limit = 8
            llm_timeout_secs = 10
            playlist_id = "PL-file"
            "#,
        )
        .unwrap();

        let config = Config::from_sources(
            file,
            lookup_from(&[("CONCURRENCY_LIMIT", "2"), ("GEMINI_API_KEY", "g")]),
        )
        .unwrap();

        assert_eq!(config.youtube_api_key, "from-file");
        assert_eq!(config.concurrency_limit, 2);
        assert_eq!(config.llm_timeout, Duration::from_secs(10));
        assert_eq!(config.playlist_id, "PL-file");
        assert!(config.summarization_enabled());
    }

    #[test]
    fn test_unparseable_number_is_rejected() {
        let err = Config::from_sources(
            FileConfig::default(),
            lookup_from(&[("YOUTUBE_API_KEY", "yt"), ("CONCURRENCY_LIMIT", "many")]),
        )
        .unwrap_err();

        match err {
            AppError::Config(ConfigError::EnvVarParseFailed { var_name, value, .. }) => {
                assert_eq!(var_name, "CONCURRENCY_LIMIT");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_concurrency_is_invalid() {
        let err = Config::from_sources(
            FileConfig::default(),
            lookup_from(&[("YOUTUBE_API_KEY", "yt"), ("CONCURRENCY_LIMIT", "0")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "concurrency_limit = 7\nplaylist_id = \"PL-x\"\n").unwrap();

        let file = FileConfig::load(Some(&path)).unwrap();
        assert_eq!(file.concurrency_limit, Some(7));
        assert_eq!(file.playlist_id.as_deref(), Some("PL-x"));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "concurrency_limit = \"five\"\n[unterminated").unwrap();

        let err = FileConfig::load(Some(&path)).unwrap_err();
        match err {
            AppError::Config(ConfigError::FileLoadFailed { path: reported, .. }) => {
                assert!(reported.ends_with("broken.toml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_explicit_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.toml");

        let err = FileConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::FileLoadFailed { .. })
        ));
    }

    #[test]
    fn test_load_without_default_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join(DEFAULT_CONFIG_FILE);

        let file = FileConfig::load_with_default(None, &default).unwrap();
        assert!(file.youtube_api_key.is_none());
        assert!(file.concurrency_limit.is_none());

        std::fs::write(&default, "summary_word_count = 30\n").unwrap();
        let file = FileConfig::load_with_default(None, &default).unwrap();
        assert_eq!(file.summary_word_count, Some(30));
    }
}
