use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::generator::compose::{DocumentGenerator, GenerationSettings};
use crate::generator::outlet::{FilesystemWriter, OutputWriter};
use crate::generator::privacy::{PatternScanner, PrivacyFlag, PrivacyScanner};
use crate::generator::quality::{
    QualityChecker, QualityIssue, StructuralQualityChecker, quality_grade,
};
use crate::generator::research::{AgentDiscovery, ResearchExecutor, ResearchSettings};
use crate::llm::client::{LlmClient, get_generation_client, get_research_client};
use crate::types::agent::{AgentDefinition, AgentResult, DomainMatch};
use crate::types::document::GeneratedProject;
use crate::types::project::ProjectInput;

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: Vec<(String, Instant)>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: Vec::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times.retain(|(name, _)| name != phase_name);
        self.phase_start_times
            .push((phase_name.to_string(), Instant::now()));
    }

    /// 结束一个阶段的计时，阶段未开始时返回 None
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        let position = self
            .phase_start_times
            .iter()
            .position(|(name, _)| name == phase_name)?;
        let (name, start_time) = self.phase_start_times.remove(position);
        let duration = start_time.elapsed();
        self.phase_durations.push((name, duration));
        Some(duration)
    }

    /// 获取总执行时间
    pub fn get_total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 按结束顺序排列的各阶段执行时间
    pub fn get_phase_durations(&self) -> &[(String, Duration)] {
        &self.phase_durations
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.get_total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 时间跟踪常量
pub struct TimingKeys;

impl TimingKeys {
    pub const PRIVACY: &'static str = "privacy";
    pub const DISCOVERY: &'static str = "discovery";
    pub const RESEARCH: &'static str = "research";
    pub const GENERATION: &'static str = "generation";
    pub const QUALITY: &'static str = "quality";
    pub const OUTPUT: &'static str = "output";

    /// 获取所有阶段的键列表
    pub fn get_all_phase_keys() -> Vec<&'static str> {
        vec![
            Self::PRIVACY,
            Self::DISCOVERY,
            Self::RESEARCH,
            Self::GENERATION,
            Self::QUALITY,
            Self::OUTPUT,
        ]
    }
}

/// 一次完整运行的结果
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub project: GeneratedProject,
    pub domain_matches: Vec<DomainMatch>,
    pub agents: Vec<AgentDefinition>,
    pub research: Vec<AgentResult>,
    pub privacy_flags: Vec<PrivacyFlag>,
    /// 是否用脱敏文本替代了原始输入
    pub sanitized: bool,
    pub quality_issues: Vec<QualityIssue>,
    pub quality_score: f64,
    pub timing_report: String,
}

impl PipelineReport {
    pub fn failed_agents(&self) -> usize {
        self.research.iter().filter(|result| result.failed).count()
    }

    /// 面向终端的摘要
    pub fn summary(&self) -> String {
        let project = &self.project;
        let mut lines = vec![
            format!("✅ 项目文档生成完成: {}", project.project_name),
            format!(
                "📄 文档: {} 篇，共 {} 词",
                project.documents.len(),
                project.total_word_count
            ),
            format!(
                "🔬 调研: {} 个智能体 ({} 失败)，识别领域: {}",
                self.research.len(),
                self.failed_agents(),
                if self.domain_matches.is_empty() {
                    "无".to_string()
                } else {
                    self.domain_matches
                        .iter()
                        .map(|m| m.domain.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            ),
            format!(
                "🪙 Token: 输入 {} / 输出 {}",
                project.total_input_tokens, project.total_output_tokens
            ),
            format!(
                "🧪 质量评分: {:.0}% ({})，问题 {} 个",
                self.quality_score * 100.0,
                quality_grade(self.quality_score),
                self.quality_issues.len()
            ),
        ];

        if !self.privacy_flags.is_empty() {
            lines.push(format!(
                "🔒 隐私扫描命中 {} 处{}",
                self.privacy_flags.len(),
                if self.sanitized { "，已使用脱敏文本" } else { "" }
            ));
        }

        if let Some(first) = project.output_paths.first() {
            lines.push(format!(
                "💾 已写出 {} 个文件，例如: {}",
                project.output_paths.len(),
                first
            ));
        }

        lines.push(String::new());
        lines.push(self.timing_report.trim_end().to_string());
        lines.join("\n")
    }
}

/// 执行完整流水线，所有外部依赖由调用方注入
pub async fn run_pipeline<W: OutputWriter>(
    config: &Config,
    project: ProjectInput,
    research_client: Option<Arc<dyn LlmClient>>,
    generation_client: Arc<dyn LlmClient>,
    scanner: &dyn PrivacyScanner,
    checker: &dyn QualityChecker,
    writer: &W,
) -> Result<PipelineReport> {
    let mut timing = TimingScope::new();
    project.validate().context("项目输入校验失败")?;

    // 隐私扫描
    timing.start_phase(TimingKeys::PRIVACY);
    let scan = scanner.scan(&project.context_text());
    let sanitized = config.strict_privacy_mode && scan.has_flags();
    let project = if sanitized {
        warn!(
            "🔒 项目输入中发现 {} 处敏感信息，已替换为脱敏文本",
            scan.flags.len()
        );
        project.with_sanitized_fields(|text| scanner.scan(text).sanitized_text)
    } else {
        if scan.has_flags() {
            warn!(
                "⚠️ 项目输入中发现 {} 处敏感信息，严格隐私模式已关闭，按原文继续",
                scan.flags.len()
            );
        }
        project
    };
    timing.end_phase(TimingKeys::PRIVACY);

    // 领域发现
    timing.start_phase(TimingKeys::DISCOVERY);
    let discovery = AgentDiscovery::new()?;
    let (domain_matches, agents) = discovery.discover(&project);
    info!(
        "🧭 识别到 {} 个领域，生成 {} 个调研智能体",
        domain_matches.len(),
        agents.len()
    );
    timing.end_phase(TimingKeys::DISCOVERY);

    // 调研
    let research = match research_client {
        Some(client) if !config.skip_research => {
            timing.start_phase(TimingKeys::RESEARCH);
            let executor = ResearchExecutor::new(client, ResearchSettings::from_config(config));
            let results = executor
                .execute_all(&agents, &project.context_text())
                .await;
            timing.end_phase(TimingKeys::RESEARCH);
            results
        }
        _ => {
            info!("⏭️ 跳过调研阶段");
            Vec::new()
        }
    };

    // 文档生成
    timing.start_phase(TimingKeys::GENERATION);
    info!("📝 使用 {} 生成文档", generation_client.name());
    let generator =
        DocumentGenerator::new(generation_client, GenerationSettings::from_config(config));
    let mut generated = generator.generate_all(&project, &research).await;
    timing.end_phase(TimingKeys::GENERATION);

    // 质量检查
    timing.start_phase(TimingKeys::QUALITY);
    for document in generated.documents.iter_mut() {
        let issues = checker.check_document(document);
        document.quality_score = Some(checker.score(&issues));
    }
    let quality_issues = checker.check_project(&generated);
    let quality_score = checker.score(&quality_issues);
    info!(
        "🧪 质量检查完成: 评分 {:.0}%，问题 {} 个",
        quality_score * 100.0,
        quality_issues.len()
    );
    timing.end_phase(TimingKeys::QUALITY);

    // 输出
    timing.start_phase(TimingKeys::OUTPUT);
    generated.output_paths = writer.write(&generated).await.context("文档写出失败")?;
    timing.end_phase(TimingKeys::OUTPUT);

    Ok(PipelineReport {
        project: generated,
        domain_matches,
        agents,
        research,
        privacy_flags: scan.flags,
        sanitized,
        quality_issues,
        quality_score,
        timing_report: timing.generate_timing_report(),
    })
}

/// 启动文档生成工作流
pub async fn launch(config: &Config, project: ProjectInput) -> Result<PipelineReport> {
    config.validate()?;

    if project.output_format != "filesystem" {
        warn!(
            "⚠️ 不支持的输出格式 {}，改为写入本地文件系统",
            project.output_format
        );
    }

    let research_client = if config.skip_research {
        None
    } else {
        Some(get_research_client(&config.llm).context("无法创建调研客户端")?)
    };

    let generation_client = get_generation_client(&config.llm)
        .await
        .context("无法创建文档生成客户端")?;

    let scanner = PatternScanner::new()?;
    let writer = FilesystemWriter::new(&config.output_dir);

    run_pipeline(
        config,
        project,
        research_client,
        generation_client,
        &scanner,
        &StructuralQualityChecker,
        &writer,
    )
    .await
}

// Include tests
#[cfg(test)]
mod tests;
