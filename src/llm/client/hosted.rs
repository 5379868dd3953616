//! 托管模型客户端（Anthropic Messages API）

use std::time::Duration;

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{Completion, CompletionRequest, LlmClient, LlmError, LlmResult, TokenUsage};
use crate::config::HostedConfig;

const PROVIDER_NAME: &str = "hosted";
const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";

/// 托管模型客户端
///
/// max_tokens 超过流式阈值时改用SSE流式请求，累积所有文本增量后
/// 以与非流式调用相同的形式返回。
pub struct HostedClient {
    http: reqwest::Client,
    config: HostedConfig,
    max_web_searches: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Tool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    name: &'static str,
    max_uses: u32,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamEvent {
    MessageStart {
        message: StreamMessage,
    },
    ContentBlockDelta {
        delta: StreamDelta,
    },
    MessageDelta {
        #[serde(default)]
        usage: Option<Usage>,
    },
    Error {
        error: ApiErrorBody,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct StreamMessage {
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamDelta {
    TextDelta {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// 流式响应累加器
#[derive(Debug, Default)]
pub(crate) struct StreamAccumulator {
    text: String,
    usage: TokenUsage,
}

impl StreamAccumulator {
    /// 处理一条SSE事件的data字段
    pub(crate) fn apply(&mut self, data: &str) -> LlmResult<()> {
        let event: StreamEvent = serde_json::from_str(data)
            .map_err(|e| LlmError::MalformedResponse(format!("unparseable stream event: {}", e)))?;

        match event {
            StreamEvent::MessageStart { message } => {
                self.usage.input_tokens = message.usage.input_tokens;
                self.usage.output_tokens = message.usage.output_tokens;
            }
            StreamEvent::ContentBlockDelta {
                delta: StreamDelta::TextDelta { text },
            } => self.text.push_str(&text),
            StreamEvent::MessageDelta { usage: Some(usage) } => {
                self.usage.output_tokens = usage.output_tokens;
            }
            StreamEvent::Error { error } => {
                return Err(LlmError::Stream(format!("{}: {}", error.kind, error.message)));
            }
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Completion {
        Completion {
            text: self.text,
            usage: self.usage,
        }
    }
}

/// 解析非流式响应体，拼接所有文本块
pub(crate) fn parse_messages_response(body: &str) -> LlmResult<Completion> {
    let response: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedResponse(format!("unparseable message body: {}", e)))?;

    let text = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("");

    Ok(Completion {
        text,
        usage: TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens),
    })
}

/// 将错误响应映射为 [`LlmError::Http`]，优先提取API错误消息
pub(crate) fn http_error(status: u16, body: &str) -> LlmError {
    let body = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => format!("{}: {}", envelope.error.kind, envelope.error.message),
        Err(_) => body.to_string(),
    };
    LlmError::Http {
        provider: PROVIDER_NAME.to_string(),
        status,
        body,
    }
}

impl HostedClient {
    pub fn new(config: &HostedConfig, max_web_searches: u32) -> LlmResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| LlmError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            config: config.clone(),
            max_web_searches,
        })
    }

    fn build_headers(&self) -> LlmResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let api_key = HeaderValue::from_str(&self.config.api_key)
            .map_err(|_| LlmError::Configuration("API key contains invalid characters".into()))?;
        headers.insert("x-api-key", api_key);

        let version = HeaderValue::from_str(&self.config.api_version)
            .map_err(|_| LlmError::Configuration("invalid anthropic-version value".into()))?;
        headers.insert("anthropic-version", version);

        Ok(headers)
    }

    pub(crate) fn should_stream(&self, request: &CompletionRequest) -> bool {
        request.max_tokens > self.config.streaming_threshold_tokens
    }

    pub(crate) fn build_body<'a>(&'a self, request: &'a CompletionRequest, stream: bool) -> MessagesRequest<'a> {
        let tools = if request.web_search {
            vec![Tool {
                tool_type: WEB_SEARCH_TOOL_TYPE,
                name: "web_search",
                max_uses: self.max_web_searches,
            }]
        } else {
            Vec::new()
        };

        MessagesRequest {
            model: &self.config.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
            tools,
            stream,
        }
    }

    async fn send(&self, request: &CompletionRequest, stream: bool) -> LlmResult<reqwest::Response> {
        let url = format!("{}/v1/messages", self.config.api_base_url.trim_end_matches('/'));
        debug!(
            "Hosted request: model={}, max_tokens={}, stream={}, web_search={}",
            self.config.model, request.max_tokens, stream, request.web_search
        );

        let response = self
            .http
            .post(&url)
            .headers(self.build_headers()?)
            .json(&self.build_body(request, stream))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Hosted API error: {}", status);
            return Err(http_error(status, &body));
        }

        Ok(response)
    }

    async fn complete_streaming(&self, request: &CompletionRequest) -> LlmResult<Completion> {
        let response = self.send(request, true).await?;
        let mut events = response.bytes_stream().eventsource();
        let mut accumulator = StreamAccumulator::default();

        while let Some(event) = events.next().await {
            let event = event.map_err(|e| LlmError::Stream(e.to_string()))?;
            if event.event == "ping" || event.data.is_empty() {
                continue;
            }
            accumulator.apply(&event.data)?;
        }

        Ok(accumulator.finish())
    }

    async fn complete_once(&self, request: &CompletionRequest) -> LlmResult<Completion> {
        let response = self.send(request, false).await?;
        let body = response.text().await?;
        parse_messages_response(&body)
    }
}

#[async_trait]
impl LlmClient for HostedClient {
    async fn complete(&self, request: &CompletionRequest) -> LlmResult<Completion> {
        if self.should_stream(request) {
            self.complete_streaming(request).await
        } else {
            self.complete_once(request).await
        }
    }

    fn supports_web_search(&self) -> bool {
        true
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}
