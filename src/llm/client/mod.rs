//! LLM客户端 - 提供统一的LLM服务接口
//!
//! 两种后端实现同一个 [`LlmClient`] trait：托管模型API（支持流式输出与网络搜索）
//! 与自托管的OpenAI兼容推理服务。[`FallbackClient`] 以装饰器的方式组合二者，
//! [`factory`] 根据配置与健康检查选择最终使用的客户端。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod factory;
mod fallback;
mod hosted;
mod self_hosted;

pub use factory::{get_generation_client, get_research_client, select_generation_client};
pub use fallback::FallbackClient;
pub use hosted::HostedClient;
pub use self_hosted::SelfHostedClient;

/// Token用量统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

impl std::ops::AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        self.input_tokens += rhs.input_tokens;
        self.output_tokens += rhs.output_tokens;
    }
}

/// 单轮补全请求
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// 是否为本次请求挂载网络搜索工具，不支持搜索的后端会忽略该标志
    pub web_search: bool,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32, temperature: f64) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            temperature,
            web_search: false,
        }
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }
}

/// 补全结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

/// Provider层错误，本层不做重试
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("{provider} returned HTTP {status}: {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(err.to_string())
        } else if err.is_decode() {
            LlmError::MalformedResponse(err.to_string())
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}

pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// 文本生成后端
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 发送一次补全请求，返回完整文本与用量
    async fn complete(&self, request: &CompletionRequest) -> LlmResult<Completion>;

    /// 单轮文本生成，流式与非流式对调用方透明
    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f64) -> LlmResult<String> {
        let request = CompletionRequest::new(prompt, max_tokens, temperature);
        Ok(self.complete(&request).await?.text)
    }

    /// 静态能力标志
    fn supports_web_search(&self) -> bool;

    /// 存活探测，不返回错误
    async fn health_check(&self) -> bool;

    /// 用于日志的后端名称
    fn name(&self) -> &str;
}

#[cfg(test)]
pub(crate) mod stub;
