//! LLM 传输层
//!
//! 会话只依赖 [`LlmTransport`] 这一个能力：把完整的对话历史发给指定模型，
//! 拿回一段文本。重试也在这一层完成，会话本身不重试。

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::error::{ConvertError, ConvertResult};
use crate::models::{ConversationTurn, Role};
use crate::utils::logging::truncate_text;

/// 发送对话的能力
#[async_trait]
pub trait LlmTransport: Send + Sync {
    /// 发送完整的对话历史，返回模型回复
    ///
    /// 非成功状态或空回复都返回 [`ConvertError::Transport`]。
    async fn send_conversation(
        &self,
        turns: &[ConversationTurn],
        model_id: &str,
    ) -> ConvertResult<String>;
}

/// 基于 `async-openai` 的传输实现
///
/// 适用于所有兼容 OpenAI API 的服务（OpenRouter 等）。
pub struct OpenAiTransport {
    client: Client<OpenAIConfig>,
    max_retries: usize,
    retry_delay: Duration,
}

impl OpenAiTransport {
    /// 根据配置创建传输
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.api_base_url);

        Self {
            client: Client::with_config(openai_config),
            max_retries: config.max_retries.max(1),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        }
    }

    fn build_request(
        &self,
        turns: &[ConversationTurn],
        model_id: &str,
    ) -> ConvertResult<CreateChatCompletionRequest> {
        let messages = turns
            .iter()
            .map(|turn| to_request_message(turn, model_id))
            .collect::<ConvertResult<Vec<_>>>()?;

        CreateChatCompletionRequestArgs::default()
            .model(model_id)
            .messages(messages)
            .build()
            .map_err(|e| ConvertError::transport(model_id, e.to_string()))
    }

    /// 单次调用
    async fn send_once(
        &self,
        request: CreateChatCompletionRequest,
        model_id: &str,
    ) -> ConvertResult<String> {
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ConvertError::transport(model_id, e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(ConvertError::transport(model_id, "模型返回内容为空"));
        }

        Ok(content)
    }
}

#[async_trait]
impl LlmTransport for OpenAiTransport {
    async fn send_conversation(
        &self,
        turns: &[ConversationTurn],
        model_id: &str,
    ) -> ConvertResult<String> {
        debug!("调用 LLM API，模型: {}，消息数: {}", model_id, turns.len());

        let request = self.build_request(turns, model_id)?;
        if tracing::enabled!(tracing::Level::TRACE) {
            if let Ok(body) = serde_json::to_string(&request) {
                trace!("请求体: {}", truncate_text(&body, 400));
            }
        }

        // 重试逻辑
        let mut last_error = None;
        for attempt in 1..=self.max_retries {
            match self.send_once(request.clone(), model_id).await {
                Ok(content) => {
                    debug!("LLM API 调用成功 ({} 字符)", content.len());
                    return Ok(content);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        warn!(
                            "LLM API 调用失败 (尝试 {}/{}), {} 秒后重试: {}",
                            attempt,
                            self.max_retries,
                            self.retry_delay.as_secs(),
                            truncate_text(&e.to_string(), 200)
                        );
                        sleep(self.retry_delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ConvertError::transport(model_id, "没有发送任何请求")))
    }
}

/// 把对话消息转换成请求消息
fn to_request_message(
    turn: &ConversationTurn,
    model_id: &str,
) -> ConvertResult<ChatCompletionRequestMessage> {
    let message = match turn.role {
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(turn.content.as_str())
            .build()
            .map(ChatCompletionRequestMessage::User),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(turn.content.as_str())
            .build()
            .map(ChatCompletionRequestMessage::Assistant),
    };

    message.map_err(|e| ConvertError::transport(model_id, e.to_string()))
}
