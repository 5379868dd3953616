use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::llm::client::{CompletionRequest, LlmClient};
use crate::types::agent::{AgentDefinition, AgentResult};

use super::parser::parse_research_response;
use super::prompts::build_research_prompt;

/// 调研执行参数
#[derive(Debug, Clone)]
pub struct ResearchSettings {
    pub max_concurrent_agents: usize,
    pub web_search: bool,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ResearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_concurrent_agents: config.effective_max_concurrent_agents(),
            web_search: config.research.enable_web_search && config.llm.enable_web_search,
            max_tokens: config.llm.max_generation_tokens,
            temperature: config.llm.temperature,
        }
    }
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 调研执行器
///
/// 每个智能体经历 pending -> running -> succeeded/failed，失败只影响自身结果，
/// 不会中断其它智能体。本层不做重试。
pub struct ResearchExecutor {
    client: Arc<dyn LlmClient>,
    settings: ResearchSettings,
}

impl ResearchExecutor {
    pub fn new(client: Arc<dyn LlmClient>, settings: ResearchSettings) -> Self {
        Self { client, settings }
    }

    /// 执行单个智能体，出错时返回失败结果而不是错误
    pub async fn execute_agent(
        &self,
        agent: &AgentDefinition,
        project_context: &str,
    ) -> AgentResult {
        debug!("🤖 执行调研智能体 {} ({})", agent.id, agent.role);

        let prompt = build_research_prompt(agent, project_context);
        let web_search = self.settings.web_search && self.client.supports_web_search();
        let request = CompletionRequest::new(prompt, self.settings.max_tokens, self.settings.temperature)
            .with_web_search(web_search);

        match self.client.complete(&request).await {
            Ok(completion) => {
                let result = parse_research_response(&agent.id, &completion.text, completion.usage);
                info!(
                    "✓ 调研智能体 {} 完成，提取到 {} 条发现",
                    agent.id,
                    result.findings.len()
                );
                result
            }
            Err(e) => {
                warn!("❌ 调研智能体 {} 失败: {}", agent.id, e);
                AgentResult::failed(&agent.id, format!("Error during research: {}", e))
            }
        }
    }

    /// 在并发上限内执行全部智能体
    ///
    /// 按优先级升序获取许可，返回结果与输入一一对应、顺序一致。
    pub async fn execute_all(
        &self,
        agents: &[AgentDefinition],
        project_context: &str,
    ) -> Vec<AgentResult> {
        let permits = self.settings.max_concurrent_agents.max(1);
        info!(
            "🔬 开始执行 {} 个调研智能体 (最大并发: {})",
            agents.len(),
            permits
        );

        let semaphore = Arc::new(Semaphore::new(permits));

        let mut admission: Vec<usize> = (0..agents.len()).collect();
        admission.sort_by_key(|&i| agents[i].priority);

        let tasks = admission.iter().map(|&index| {
            let semaphore = semaphore.clone();
            let agent = &agents[index];
            async move {
                let execution = async {
                    // 信号量从不关闭，获取失败时直接执行
                    let _permit = semaphore.acquire().await.ok();
                    self.execute_agent(agent, project_context).await
                };

                let result = match AssertUnwindSafe(execution).catch_unwind().await {
                    Ok(result) => result,
                    Err(panic) => {
                        let message = panic_message(panic.as_ref());
                        warn!("❌ 调研智能体 {} 异常终止: {}", agent.id, message);
                        AgentResult::failed(
                            &agent.id,
                            format!("Agent execution failed: {}", message),
                        )
                    }
                };
                (index, result)
            }
        });

        let mut completed = join_all(tasks).await;
        completed.sort_by_key(|(index, _)| *index);
        let results: Vec<AgentResult> = completed.into_iter().map(|(_, result)| result).collect();

        let failed = results.iter().filter(|r| r.failed).count();
        info!(
            "✓ 调研阶段完成: {} 成功, {} 失败",
            results.len() - failed,
            failed
        );
        results
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
