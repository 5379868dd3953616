use serde::{Deserialize, Serialize};

use crate::llm::client::TokenUsage;

/// 项目描述中匹配到的领域
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMatch {
    /// 领域名称（如 healthcare、education）
    pub domain: String,
    /// 命中的关键词
    pub keywords: Vec<String>,
    /// 匹配置信度（0.0 - 1.0）
    pub confidence: f64,
    /// 该领域的典型干系人
    pub stakeholders: Vec<String>,
}

/// 调研智能体定义
///
/// 由发现阶段一次性创建，之后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub id: String,
    pub name: String,
    /// 智能体的角色描述
    pub role: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub research_questions: Vec<String>,
    #[serde(default)]
    pub search_queries: Vec<String>,
    /// 优先级，1为最高，数值越小越先执行
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_priority() -> u32 {
    1
}

/// 调研智能体的执行结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub agent_id: String,
    pub findings: Vec<String>,
    pub sources: Vec<String>,
    pub recommendations: Vec<String>,
    /// 完整的原始响应文本，结构化字段解析不全时文档生成仍可使用它
    pub raw_response: Option<String>,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    /// 是否为失败结果
    #[serde(default)]
    pub failed: bool,
}

impl AgentResult {
    /// 构造失败结果：findings中包含错误说明，sources与recommendations为空
    pub fn failed(agent_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            findings: vec![message.into()],
            sources: Vec::new(),
            recommendations: Vec::new(),
            raw_response: None,
            input_tokens: 0,
            output_tokens: 0,
            failed: true,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.input_tokens = usage.input_tokens;
        self.output_tokens = usage.output_tokens;
        self
    }
}
