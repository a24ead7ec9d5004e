//! 错误类型
//!
//! 分两类：
//! - `AppError`：批次级致命错误（配置、采集源、客户端构造），出现即终止运行
//! - `AcquireError` / `SummarizeError` / `ItemFailure`：单个视频的失败原因，
//!   只作为值存进 `ProcessingResult`，永远不向上传播

use std::time::Duration;
use thiserror::Error;

/// 应用程序错误类型（批次级，致命）
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 视频列表获取失败
    #[error("视频列表获取失败 (播放列表: {playlist_id}): {message}")]
    Source { playlist_id: String, message: String },
    /// 外部客户端构造失败
    #[error("客户端初始化失败 ({client}): {message}")]
    Client { client: String, message: String },
    /// 文件系统错误
    #[error("文件错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 必填项缺失
    #[error("环境变量 {var_name} 必须设置")]
    EnvVarNotFound { var_name: String },
    /// 取值非法
    #[error("配置项 {field} 取值非法: {reason}")]
    InvalidValue { field: String, reason: String },
    /// 配置文件读取或解析失败
    #[error("配置文件 {path} 无法加载: {message}")]
    FileLoadFailed { path: String, message: String },
}

/// 字幕获取失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    /// 重试用尽
    #[error("字幕下载在 {attempts} 次尝试后仍失败: {cause}\n最后输出: {output}")]
    Exhausted {
        attempts: usize,
        cause: String,
        output: String,
    },
    /// 字幕文件读取失败
    #[error("字幕文件 {path} 读取失败: {reason}")]
    Artifact { path: String, reason: String },
    /// 工作目录不可用
    #[error("工作目录不可用 ({path}): {reason}")]
    WorkDir { path: String, reason: String },
}

/// 摘要生成失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizeError {
    /// 超时
    #[error("摘要请求超时 ({timeout:?})")]
    Timeout { timeout: Duration },
    /// API 调用失败
    #[error("摘要 API 调用失败: {0}")]
    Api(String),
    /// 返回内容为空
    #[error("摘要 API 返回内容为空")]
    EmptyContent,
}

/// 单个视频的最终失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemFailure {
    #[error("{0}")]
    Acquisition(AcquireError),
    #[error("无可用字幕")]
    NoTranscript,
    /// 摘要客户端未配置，与真正的失败区分开
    #[error("已跳过摘要（LLM 客户端不可用）")]
    SummarizationSkipped,
    #[error("{0}")]
    Summarization(SummarizeError),
}

impl ItemFailure {
    /// 是否属于"跳过"而非真正的失败
    pub fn is_skipped(&self) -> bool {
        matches!(self, ItemFailure::SummarizationSkipped)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建客户端构造错误
    pub fn client(client: impl Into<String>, message: impl std::fmt::Display) -> Self {
        AppError::Client {
            client: client.into(),
            message: message.to_string(),
        }
    }

    /// 创建文件错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
