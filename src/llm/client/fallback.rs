use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::warn;

use super::{Completion, CompletionRequest, LlmClient, LlmResult};

/// 带回退的客户端
///
/// 主客户端失败且允许回退时，检查一次备用客户端的存活状态（结果在本实例生命周期内缓存），
/// 存活则以相同参数重发请求，否则返回主客户端的错误。
pub struct FallbackClient {
    primary: Arc<dyn LlmClient>,
    secondary: Arc<dyn LlmClient>,
    fallback_enabled: bool,
    secondary_alive: OnceCell<bool>,
}

impl FallbackClient {
    pub fn new(
        primary: Arc<dyn LlmClient>,
        secondary: Arc<dyn LlmClient>,
        fallback_enabled: bool,
    ) -> Self {
        Self {
            primary,
            secondary,
            fallback_enabled,
            secondary_alive: OnceCell::new(),
        }
    }

    async fn secondary_is_alive(&self) -> bool {
        *self
            .secondary_alive
            .get_or_init(|| async { self.secondary.health_check().await })
            .await
    }
}

#[async_trait]
impl LlmClient for FallbackClient {
    async fn complete(&self, request: &CompletionRequest) -> LlmResult<Completion> {
        let primary_error = match self.primary.complete(request).await {
            Ok(completion) => return Ok(completion),
            Err(e) => e,
        };

        if !self.fallback_enabled {
            return Err(primary_error);
        }

        if !self.secondary_is_alive().await {
            warn!(
                "⚠️ {} 调用失败，备用服务 {} 不可用: {}",
                self.primary.name(),
                self.secondary.name(),
                primary_error
            );
            return Err(primary_error);
        }

        warn!(
            "⚠️ {} 调用失败，回退到 {}: {}",
            self.primary.name(),
            self.secondary.name(),
            primary_error
        );
        self.secondary.complete(request).await
    }

    fn supports_web_search(&self) -> bool {
        self.primary.supports_web_search()
    }

    async fn health_check(&self) -> bool {
        self.primary.health_check().await
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}
