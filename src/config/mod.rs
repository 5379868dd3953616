use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// 文档生成使用的Provider
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationProvider {
    /// 远程托管模型API，支持流式输出与网络搜索
    #[serde(rename = "hosted")]
    #[default]
    Hosted,
    /// 自托管推理服务，只有宿主机在线时可用
    #[serde(rename = "self-hosted")]
    SelfHosted,
}

impl std::fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationProvider::Hosted => write!(f, "hosted"),
            GenerationProvider::SelfHosted => write!(f, "self-hosted"),
        }
    }
}

impl std::str::FromStr for GenerationProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hosted" | "claude" | "anthropic" => Ok(GenerationProvider::Hosted),
            "self-hosted" | "self_hosted" | "selfhosted" | "llamacpp" => {
                Ok(GenerationProvider::SelfHosted)
            }
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 输出目录
    pub output_dir: PathBuf,

    /// 严格隐私模式：扫描到敏感信息时使用脱敏文本构建所有prompt
    pub strict_privacy_mode: bool,

    /// 跳过调研阶段
    pub skip_research: bool,

    /// 是否启用详细日志
    pub verbose: bool,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 调研阶段配置
    pub research: ResearchConfig,

    /// 文档生成阶段配置
    pub generation: GenerationConfig,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// 文档生成的首选Provider
    pub generation_provider: GenerationProvider,

    /// 托管模型配置
    pub hosted: HostedConfig,

    /// 自托管推理服务配置
    pub self_hosted: SelfHostedConfig,

    /// 托管模型出错时是否回退到自托管服务
    pub hosted_fallback_to_self_hosted: bool,

    /// 自托管服务离线时是否回退到托管模型
    pub self_hosted_fallback_to_hosted: bool,

    /// 最大生成tokens（文档生成阶段另有内部上限）
    pub max_generation_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 是否允许调研阶段使用网络搜索
    pub enable_web_search: bool,

    /// 单次调研请求的最大搜索次数
    pub max_web_searches: u32,
}

/// 托管模型（Anthropic Messages API）配置
#[derive(Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct HostedConfig {
    /// API KEY，不会出现在任何日志中
    pub api_key: String,

    /// API基地址
    pub api_base_url: String,

    /// 模型名称
    pub model: String,

    /// anthropic-version 请求头
    pub api_version: String,

    /// 请求超时（秒）
    pub timeout_seconds: u64,

    /// max_tokens超过该值时切换为流式请求
    pub streaming_threshold_tokens: u32,
}

impl std::fmt::Debug for HostedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("HostedConfig")
            .field("api_key", &api_key)
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("api_version", &self.api_version)
            .field("timeout_seconds", &self.timeout_seconds)
            .field(
                "streaming_threshold_tokens",
                &self.streaming_threshold_tokens,
            )
            .finish()
    }
}

/// 自托管推理服务（OpenAI兼容接口）配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SelfHostedConfig {
    /// 服务基地址
    pub base_url: String,

    /// 模型名称
    pub model: String,

    /// 请求超时（秒），本地推理较慢，默认5分钟
    pub timeout_seconds: u64,

    /// 健康检查超时（秒）
    pub health_timeout_seconds: u64,
}

/// 调研阶段配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ResearchConfig {
    /// 最大并发智能体数量，默认保守以避免触发上游限流
    pub max_concurrent_agents: usize,

    /// 是否启用网络搜索（与全局开关同时开启才生效）
    pub enable_web_search: bool,
}

/// 文档生成阶段配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    /// 截断或出错时的最大重试次数
    pub max_retries: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 校验配置中会导致运行期失败的组合
    pub fn validate(&self) -> Result<()> {
        let llm = &self.llm;
        let hosted_selectable = llm.generation_provider == GenerationProvider::Hosted
            || llm.self_hosted_fallback_to_hosted
            || !self.skip_research;
        if hosted_selectable && llm.hosted.api_key.trim().is_empty() {
            bail!("托管模型的API KEY未配置，请设置 ANTHROPIC_API_KEY 或在配置文件中填写 llm.hosted.api_key");
        }

        let self_hosted_selectable = llm.generation_provider == GenerationProvider::SelfHosted
            || llm.hosted_fallback_to_self_hosted;
        if self_hosted_selectable && llm.self_hosted.base_url.trim().is_empty() {
            bail!("自托管推理服务的地址未配置 (llm.self_hosted.base_url)");
        }

        if self.research.max_concurrent_agents == 0 {
            bail!("research.max_concurrent_agents 必须大于0");
        }

        Ok(())
    }

    /// 调研阶段实际使用的并发上限
    pub fn effective_max_concurrent_agents(&self) -> usize {
        self.research.max_concurrent_agents.clamp(1, 10)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            strict_privacy_mode: true,
            skip_research: false,
            verbose: false,
            llm: LLMConfig::default(),
            research: ResearchConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            generation_provider: GenerationProvider::default(),
            hosted: HostedConfig::default(),
            self_hosted: SelfHostedConfig::default(),
            hosted_fallback_to_self_hosted: true,
            self_hosted_fallback_to_hosted: true,
            max_generation_tokens: 32000,
            temperature: 0.7,
            enable_web_search: true,
            max_web_searches: 5,
        }
    }
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.anthropic.com"),
            model: String::from("claude-sonnet-4-20250514"),
            api_version: String::from("2023-06-01"),
            timeout_seconds: 600,
            streaming_threshold_tokens: 8000,
        }
    }
}

impl Default for SelfHostedConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080"),
            model: String::from("Llama-3.3-70B-Instruct-Q4_K_M"),
            timeout_seconds: 300,
            health_timeout_seconds: 5,
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_agents: 1,
            enable_web_search: true,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay_ms: 1000,
        }
    }
}
