//! 调研响应的轻量解析
//!
//! 按章节关键词与项目符号扫描文本，不匹配的行直接忽略，完整文本保存在 `raw_response` 中。

use crate::llm::client::TokenUsage;
use crate::types::agent::AgentResult;

pub const NO_FINDINGS: &str = "No specific findings extracted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Findings,
    Sources,
    Recommendations,
}

const HEADING_KEYWORDS: &[(&str, Section)] = &[
    ("KEY FINDINGS", Section::Findings),
    ("FINDINGS", Section::Findings),
    ("SOURCES", Section::Sources),
    ("REFERENCES", Section::Sources),
    ("RECOMMENDATIONS", Section::Recommendations),
];

fn section_header(line: &str) -> Option<Section> {
    let upper = line.to_uppercase();

    // Markdown 标题或加粗行：关键词在开头即可，不要求冒号
    if upper.starts_with('#') || upper.starts_with("**") || upper.starts_with("__") {
        let title = upper
            .trim_start_matches(|c: char| matches!(c, '#' | '*' | '_') || c.is_whitespace());
        if let Some((_, section)) = HEADING_KEYWORDS
            .iter()
            .find(|(keyword, _)| title.starts_with(keyword))
        {
            return Some(*section);
        }
    }

    if upper.contains("KEY FINDINGS") || upper.contains("FINDINGS:") {
        Some(Section::Findings)
    } else if upper.contains("SOURCES:") || upper.contains("REFERENCES:") {
        Some(Section::Sources)
    } else if upper.contains("RECOMMENDATIONS:") {
        Some(Section::Recommendations)
    } else {
        None
    }
}

fn bullet_content(line: &str) -> Option<&str> {
    if line.starts_with(['-', '•', '*']) {
        Some(
            line.trim_start_matches(|c| matches!(c, '-' | '•' | '*' | ' '))
                .trim(),
        )
    } else {
        None
    }
}

/// 将原始响应解析为调研结果
pub fn parse_research_response(agent_id: &str, raw: &str, usage: TokenUsage) -> AgentResult {
    let mut findings = Vec::new();
    let mut sources = Vec::new();
    let mut recommendations = Vec::new();
    let mut current: Option<Section> = None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(section) = section_header(line) {
            current = Some(section);
            continue;
        }

        if let Some(section) = current
            && let Some(content) = bullet_content(line)
            && !content.is_empty()
        {
            let target = match section {
                Section::Findings => &mut findings,
                Section::Sources => &mut sources,
                Section::Recommendations => &mut recommendations,
            };
            target.push(content.to_string());
        }
    }

    if findings.is_empty() {
        findings.push(NO_FINDINGS.to_string());
    }

    AgentResult {
        agent_id: agent_id.to_string(),
        findings,
        sources,
        recommendations,
        raw_response: Some(raw.to_string()),
        input_tokens: 0,
        output_tokens: 0,
        failed: false,
    }
    .with_usage(usage)
}
