//! 调研阶段：发现智能体，并在并发上限内通过支持网络搜索的后端执行它们

pub mod discovery;
pub mod executor;
pub mod parser;
pub mod prompts;

pub use discovery::{AgentDiscovery, FRAMEWORKS_AGENT_ID};
pub use executor::{ResearchExecutor, ResearchSettings};
