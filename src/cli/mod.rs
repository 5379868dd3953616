use crate::config::{Config, GenerationProvider};
use crate::types::project::ProjectInput;
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;

/// 默认配置文件名，位于当前工作目录
pub const DEFAULT_CONFIG_FILE: &str = "wowasi.toml";

/// Wowasi-RS - 基于多模型调研与生成的项目规划文档引擎
#[derive(Parser, Debug)]
#[command(name = "wowasi-rs")]
#[command(
    about = "Generates a complete set of 15 project-planning documents from a short project description, using web-enabled research agents and a hosted or self-hosted LLM."
)]
#[command(version)]
pub struct Args {
    /// 项目名称
    pub name: String,

    /// 项目描述
    pub description: String,

    /// 附加上下文
    #[arg(long)]
    pub context: Option<String>,

    /// 项目分类（如 04_Iyeska）
    #[arg(short, long)]
    pub area: Option<String>,

    /// 输出格式
    #[arg(short, long)]
    pub format: Option<String>,

    /// 输出目录
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 文档生成后端 (hosted, self-hosted)
    #[arg(long)]
    pub provider: Option<String>,

    /// 调研智能体最大并发数
    #[arg(long)]
    pub max_concurrent_agents: Option<usize>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 调研阶段不使用网络搜索
    #[arg(long)]
    pub no_web_search: bool,

    /// 是否跳过调研
    #[arg(long)]
    pub skip_research: bool,

    /// 发现敏感信息时仍使用原文
    #[arg(long)]
    pub relaxed_privacy: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 由位置参数与可选参数组成项目输入
    pub fn project_input(&self) -> ProjectInput {
        let mut project = ProjectInput::new(self.name.clone(), self.description.clone());
        if let Some(context) = &self.context {
            project = project.with_context(context.clone());
        }
        if let Some(area) = &self.area {
            project.area = area.clone();
        }
        if let Some(format) = &self.format {
            project.output_format = format.clone();
        }
        project
    }

    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let default_config_path = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_CONFIG_FILE);
        self.into_config_with_default(default_config_path)
    }

    fn into_config_with_default(self, default_config_path: PathBuf) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定的配置文件必须可读
            Config::from_file(config_path)
                .with_context(|| format!("无法读取配置文件 {:?}", config_path))?
        } else if default_config_path.exists() {
            Config::from_file(&default_config_path)
                .with_context(|| format!("无法读取默认配置文件 {:?}", default_config_path))?
        } else {
            Config::default()
        };

        // 覆盖配置文件中的设置
        if let Some(output) = self.output {
            config.output_dir = output;
        }

        if let Some(provider_str) = self.provider {
            config.llm.generation_provider = provider_str
                .parse::<GenerationProvider>()
                .map_err(|e| anyhow!(e))?;
        }
        if let Some(max_concurrent_agents) = self.max_concurrent_agents {
            config.research.max_concurrent_agents = max_concurrent_agents;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_generation_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if self.no_web_search {
            config.llm.enable_web_search = false;
            config.research.enable_web_search = false;
        }
        if self.relaxed_privacy {
            config.strict_privacy_mode = false;
        }

        // 开关只能打开，不会覆盖配置文件中的 true
        config.skip_research |= self.skip_research;
        config.verbose |= self.verbose;

        Ok(config)
    }
}

// Include tests
#[cfg(test)]
mod tests;
