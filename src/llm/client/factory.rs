//! 客户端工厂 - 根据配置与健康检查选择后端

use std::sync::Arc;

use tracing::{info, warn};

use super::{FallbackClient, HostedClient, LlmClient, LlmError, LlmResult, SelfHostedClient};
use crate::config::{GenerationProvider, LLMConfig};

/// 在已构建的客户端之间选择文档生成使用的后端
pub async fn select_generation_client(
    settings: &LLMConfig,
    hosted: Arc<dyn LlmClient>,
    self_hosted: Arc<dyn LlmClient>,
) -> LlmResult<Arc<dyn LlmClient>> {
    match settings.generation_provider {
        GenerationProvider::SelfHosted => {
            if self_hosted.health_check().await {
                info!("🖥️ 使用自托管推理服务生成文档");
                return Ok(self_hosted);
            }

            if settings.self_hosted_fallback_to_hosted {
                warn!("⚠️ 自托管推理服务不可用，回退到托管模型");
                return Ok(hosted);
            }

            Err(LlmError::Unavailable(format!(
                "self-hosted inference server at {} is not responding; start the host machine \
                 and its tunnel, or enable llm.self_hosted_fallback_to_hosted",
                settings.self_hosted.base_url
            )))
        }
        GenerationProvider::Hosted => {
            if settings.hosted_fallback_to_self_hosted {
                info!("☁️ 使用托管模型生成文档（自托管服务作为备用）");
                Ok(Arc::new(FallbackClient::new(hosted, self_hosted, true)))
            } else {
                info!("☁️ 使用托管模型生成文档");
                Ok(hosted)
            }
        }
    }
}

/// 构建文档生成使用的客户端
pub async fn get_generation_client(settings: &LLMConfig) -> LlmResult<Arc<dyn LlmClient>> {
    let hosted: Arc<dyn LlmClient> =
        Arc::new(HostedClient::new(&settings.hosted, settings.max_web_searches)?);
    let self_hosted: Arc<dyn LlmClient> = Arc::new(SelfHostedClient::new(&settings.self_hosted)?);
    select_generation_client(settings, hosted, self_hosted).await
}

/// 构建调研使用的客户端，调研依赖网络搜索，始终使用托管模型
pub fn get_research_client(settings: &LLMConfig) -> LlmResult<Arc<dyn LlmClient>> {
    Ok(Arc::new(HostedClient::new(
        &settings.hosted,
        settings.max_web_searches,
    )?))
}
