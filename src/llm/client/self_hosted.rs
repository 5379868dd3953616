//! 自托管推理服务客户端（OpenAI兼容接口）

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{Completion, CompletionRequest, LlmClient, LlmError, LlmResult, TokenUsage};
use crate::config::SelfHostedConfig;

const PROVIDER_NAME: &str = "self-hosted";

/// 自托管推理服务客户端，不支持网络搜索
pub struct SelfHostedClient {
    http: reqwest::Client,
    probe: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// 解析chat completion响应，取第一个choice的文本
pub(crate) fn parse_chat_response(body: &str) -> LlmResult<Completion> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedResponse(format!("unparseable chat completion: {}", e)))?;

    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::MalformedResponse("response contains no choices".into()))?;

    let usage = response
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(Completion { text, usage })
}

impl SelfHostedClient {
    pub fn new(config: &SelfHostedConfig) -> LlmResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| LlmError::Configuration(e.to_string()))?;
        let probe = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.health_timeout_seconds))
            .build()
            .map_err(|e| LlmError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            probe,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// 单个探测端点，返回 None 表示连接失败
    async fn probe(&self, path: &str) -> Option<reqwest::StatusCode> {
        let url = format!("{}{}", self.base_url, path);
        match self.probe.get(&url).send().await {
            Ok(response) => Some(response.status()),
            Err(e) => {
                debug!("Self-hosted probe {} failed: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl LlmClient for SelfHostedClient {
    async fn complete(&self, request: &CompletionRequest) -> LlmResult<Completion> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        };
        debug!(
            "Self-hosted request: model={}, max_tokens={}",
            self.model, request.max_tokens
        );

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Self-hosted API error: {}", status);
            return Err(LlmError::Http {
                provider: PROVIDER_NAME.to_string(),
                status,
                body,
            });
        }

        let body = response.text().await?;
        parse_chat_response(&body)
    }

    fn supports_web_search(&self) -> bool {
        false
    }

    async fn health_check(&self) -> bool {
        match self.probe("/health").await {
            Some(status) if status.is_success() => true,
            // 旧版本服务没有 /health，改用模型列表探测
            Some(_) => matches!(self.probe("/v1/models").await, Some(status) if status.is_success()),
            None => false,
        }
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}
