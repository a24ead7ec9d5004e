/// LLM API 客户端
///
/// 使用 `async-openai` 调用兼容 OpenAI 协议的服务（Gemini、Azure、Doubao 等）
use crate::config::Config;
use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

/// 文本补全协作方
///
/// 单次调用、无内部重试；超时由调用方通过丢弃 future 施加
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// LLM 客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 发送聊天请求
    ///
    /// # 返回
    /// 返回去掉首尾空白后的响应内容
    pub async fn send_to_llm(&self, user_message: &str) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let request = self.build_request(user_message)?;
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败 (模型: {}): {}", self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空 (模型: {})", self.model_name))?;

        Ok(content.trim().to_string())
    }

    /// 构建请求：只有一条用户消息
    fn build_request(&self, user_message: &str) -> Result<CreateChatCompletionRequest> {
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(0.3)
            .max_tokens(1024u32)
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl CompletionApi for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.send_to_llm(prompt).await
    }
}
