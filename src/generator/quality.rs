//! 生成结果的本地质量检查，只给出建议，不阻断流程

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;
use std::sync::LazyLock;

use crate::generator::compose::truncation::detect_truncation;
use crate::types::document::{Document, DocumentType, GeneratedProject};

const MIN_WORD_COUNT: usize = 100;
const MAX_WORD_COUNT: usize = 10_000;
const MAX_TERM_SUGGESTIONS: usize = 5;
const ERROR_MARKER: &str = "*Error generating document:";
const PLACEHOLDERS: [&str; 6] = [
    "[TODO]",
    "[PLACEHOLDER]",
    "[INSERT]",
    "[TBD]",
    "Lorem ipsum",
    "FIXME",
];
const COMMON_ACRONYMS: [&str; 10] = [
    "API", "UI", "URL", "HTTP", "HTTPS", "SQL", "PDF", "CSV", "JSON", "XML",
];

static ACRONYM: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").ok());
static BOLD_TERM: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

impl Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
            IssueSeverity::Info => "info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityIssue {
    /// 文档文件名，项目级问题为`(project)`
    pub document: String,
    pub severity: IssueSeverity,
    pub message: String,
}

impl QualityIssue {
    fn new(document: &str, severity: IssueSeverity, message: impl Into<String>) -> Self {
        Self {
            document: document.to_string(),
            severity,
            message: message.into(),
        }
    }
}

pub trait QualityChecker: Send + Sync {
    fn check_document(&self, doc: &Document) -> Vec<QualityIssue>;

    /// 项目级检查，结果包含每份文档自身的问题
    fn check_project(&self, project: &GeneratedProject) -> Vec<QualityIssue>;

    fn score(&self, issues: &[QualityIssue]) -> f64 {
        quality_score(issues)
    }
}

/// 0.0 ~ 1.0 的质量分，警告的扣分逐级递减，最低0.15
pub fn quality_score(issues: &[QualityIssue]) -> f64 {
    if issues.is_empty() {
        return 1.0;
    }

    let mut deduction: f64 = 0.0;
    let mut warnings = 0usize;
    for issue in issues {
        deduction += match issue.severity {
            IssueSeverity::Error => 0.08,
            IssueSeverity::Info => 0.002,
            IssueSeverity::Warning => {
                warnings += 1;
                match warnings {
                    1..=5 => 0.02,
                    6..=15 => 0.01,
                    _ => 0.005,
                }
            }
        };
    }

    (1.0_f64 - deduction).max(0.15)
}

/// 分数对应的等级描述
pub fn quality_grade(score: f64) -> &'static str {
    if score >= 0.9 {
        "A - Excellent quality, ready for use"
    } else if score >= 0.75 {
        "B - Good quality, minor improvements recommended"
    } else if score >= 0.6 {
        "C - Acceptable, but needs attention"
    } else if score >= 0.4 {
        "D - Poor quality, significant issues"
    } else {
        "F - Failed quality check, regeneration recommended"
    }
}

/// 结构性检查：截断、错误占位、空章节、未替换的占位文本、篇幅、文档完整性
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralQualityChecker;

impl StructuralQualityChecker {
    fn check_empty_sections(doc: &Document) -> Vec<QualityIssue> {
        let mut issues = Vec::new();
        let mut current_heading: Option<&str> = None;
        let mut has_content = false;
        let mut in_fence = false;

        for line in doc.content.lines() {
            let stripped = line.trim();
            if stripped.starts_with("```") {
                in_fence = !in_fence;
                has_content = true;
                continue;
            }
            if !in_fence && stripped.starts_with('#') {
                if let Some(heading) = current_heading
                    && !has_content
                {
                    issues.push(QualityIssue::new(
                        &doc.filename,
                        IssueSeverity::Warning,
                        format!("Empty section: {}", heading),
                    ));
                }
                current_heading = Some(stripped);
                has_content = false;
            } else if !stripped.is_empty() {
                has_content = true;
            }
        }

        issues
    }

    fn check_placeholders(doc: &Document) -> Vec<QualityIssue> {
        let mut issues = Vec::new();
        for (index, line) in doc.content.lines().enumerate() {
            let lowered = line.to_lowercase();
            for placeholder in PLACEHOLDERS {
                if lowered.contains(&placeholder.to_lowercase()) {
                    issues.push(QualityIssue::new(
                        &doc.filename,
                        IssueSeverity::Error,
                        format!("Placeholder text found on line {}: {}", index + 1, placeholder),
                    ));
                }
            }
        }
        issues
    }

    fn glossary_terms(project: &GeneratedProject) -> HashSet<String> {
        let Some(glossary) = project.document(DocumentType::Glossary) else {
            return HashSet::new();
        };

        let mut terms: HashSet<String> = glossary
            .content
            .lines()
            .filter_map(|line| line.strip_prefix("## "))
            .map(|term| term.trim().to_uppercase())
            .collect();
        if let Some(bold) = BOLD_TERM.as_ref() {
            terms.extend(
                bold.captures_iter(&glossary.content)
                    .map(|caps| caps[1].trim().to_uppercase()),
            );
        }
        terms
    }

    fn undefined_terms(doc: &Document, glossary: &HashSet<String>) -> Vec<String> {
        let Some(acronym) = ACRONYM.as_ref() else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        acronym
            .find_iter(&doc.content)
            .map(|m| m.as_str())
            .filter(|term| !COMMON_ACRONYMS.contains(term) && !glossary.contains(*term))
            .filter(|term| seen.insert(*term))
            .take(MAX_TERM_SUGGESTIONS)
            .map(str::to_string)
            .collect()
    }
}

impl QualityChecker for StructuralQualityChecker {
    fn check_document(&self, doc: &Document) -> Vec<QualityIssue> {
        let mut issues = Vec::new();

        if doc.content.trim().is_empty() {
            issues.push(QualityIssue::new(
                &doc.filename,
                IssueSeverity::Error,
                "Document is empty",
            ));
            return issues;
        }

        if doc.content.contains(ERROR_MARKER) {
            issues.push(QualityIssue::new(
                &doc.filename,
                IssueSeverity::Error,
                "Document generation failed, content is an error placeholder",
            ));
            return issues;
        }

        if let Some(reason) = detect_truncation(&doc.content) {
            issues.push(QualityIssue::new(
                &doc.filename,
                IssueSeverity::Error,
                format!("Document appears truncated: {}", reason),
            ));
        }

        if doc.word_count < MIN_WORD_COUNT {
            issues.push(QualityIssue::new(
                &doc.filename,
                IssueSeverity::Warning,
                format!(
                    "Document has only {} words (minimum: {})",
                    doc.word_count, MIN_WORD_COUNT
                ),
            ));
        } else if doc.word_count > MAX_WORD_COUNT {
            issues.push(QualityIssue::new(
                &doc.filename,
                IssueSeverity::Warning,
                format!(
                    "Document has {} words (maximum: {})",
                    doc.word_count, MAX_WORD_COUNT
                ),
            ));
        }

        if !doc.content.trim_start().starts_with('#') {
            issues.push(QualityIssue::new(
                &doc.filename,
                IssueSeverity::Error,
                "Document does not start with a title heading",
            ));
        }

        issues.extend(Self::check_empty_sections(doc));
        issues.extend(Self::check_placeholders(doc));
        issues
    }

    fn check_project(&self, project: &GeneratedProject) -> Vec<QualityIssue> {
        let mut issues: Vec<QualityIssue> = project
            .documents
            .iter()
            .flat_map(|doc| self.check_document(doc))
            .collect();

        let glossary = Self::glossary_terms(project);
        for doc in &project.documents {
            if doc.doc_type == DocumentType::Glossary {
                continue;
            }
            for term in Self::undefined_terms(doc, &glossary) {
                issues.push(QualityIssue::new(
                    &doc.filename,
                    IssueSeverity::Info,
                    format!("Term '{}' might need a glossary entry", term),
                ));
            }
        }

        if let Some(stakeholders) = project.document(DocumentType::StakeholderNotes)
            && !stakeholders.content.lines().any(|line| line.starts_with("## "))
        {
            issues.push(QualityIssue::new(
                &stakeholders.filename,
                IssueSeverity::Warning,
                "No stakeholders identified in Stakeholder Notes",
            ));
        }

        let expected = DocumentType::ALL.len();
        if project.documents.len() < expected {
            issues.push(QualityIssue::new(
                "(project)",
                IssueSeverity::Error,
                format!(
                    "Only {}/{} documents generated",
                    project.documents.len(),
                    expected
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc(doc_type: DocumentType, content: &str) -> Document {
        let spec = doc_type.spec();
        Document {
            doc_type,
            title: spec.title.to_string(),
            content: content.to_string(),
            folder: spec.folder.to_string(),
            filename: spec.filename.to_string(),
            generated_at: Utc::now(),
            word_count: crate::utils::word_count(content),
            quality_score: None,
            input_tokens: 0,
            output_tokens: 0,
        }
    }

    fn healthy_content(title: &str) -> String {
        let body = "The program serves forty students across two schools each week. ".repeat(20);
        format!(
            "# {}\n\nPlanning notes for the mentorship program.\n\n## Summary\n\n{}\n\n## Partners\n\n{}",
            title,
            body.trim(),
            body.trim()
        )
    }

    fn project(documents: Vec<Document>) -> GeneratedProject {
        GeneratedProject {
            project_name: "Youth Mentorship".to_string(),
            project_area: "04_Iyeska".to_string(),
            total_word_count: documents.iter().map(|d| d.word_count).sum(),
            documents,
            generation_time_seconds: 1.0,
            output_paths: Vec::new(),
            created_at: Utc::now(),
            completed_at: Utc::now(),
            total_input_tokens: 0,
            total_output_tokens: 0,
        }
    }

    fn issue(severity: IssueSeverity) -> QualityIssue {
        QualityIssue::new("README.md", severity, "x")
    }

    #[test]
    fn test_score_without_issues_is_perfect() {
        assert_eq!(quality_score(&[]), 1.0);
    }

    #[test]
    fn test_score_warning_tiers() {
        let five: Vec<_> = (0..5).map(|_| issue(IssueSeverity::Warning)).collect();
        assert!((quality_score(&five) - 0.90).abs() < 1e-9);

        let fifteen: Vec<_> = (0..15).map(|_| issue(IssueSeverity::Warning)).collect();
        assert!((quality_score(&fifteen) - 0.80).abs() < 1e-9);

        let twenty: Vec<_> = (0..20).map(|_| issue(IssueSeverity::Warning)).collect();
        assert!((quality_score(&twenty) - 0.775).abs() < 1e-9);
    }

    #[test]
    fn test_score_errors_and_info() {
        let issues = vec![
            issue(IssueSeverity::Error),
            issue(IssueSeverity::Error),
            issue(IssueSeverity::Info),
        ];
        assert!((quality_score(&issues) - 0.838).abs() < 1e-9);
    }

    #[test]
    fn test_score_has_floor() {
        let issues: Vec<_> = (0..50).map(|_| issue(IssueSeverity::Error)).collect();
        assert_eq!(quality_score(&issues), 0.15);
        assert!(quality_grade(0.15).starts_with('F'));
        assert!(quality_grade(0.95).starts_with('A'));
    }

    #[test]
    fn test_healthy_document_has_no_issues() {
        let checker = StructuralQualityChecker;
        let issues = checker.check_document(&doc(DocumentType::Readme, &healthy_content("Overview")));
        assert!(issues.is_empty(), "{:?}", issues);
    }

    #[test]
    fn test_error_placeholder_is_reported_once() {
        let checker = StructuralQualityChecker;
        let content = "# Initial Budget\n\n*Error generating document: timeout*";
        let issues = checker.check_document(&doc(DocumentType::InitialBudget, content));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Error);
        assert!(issues[0].message.contains("error placeholder"));
    }

    #[test]
    fn test_truncated_document_is_an_error() {
        let checker = StructuralQualityChecker;
        let content = format!("{}\n\nThe budget covers staff and", healthy_content("Budget"));
        let issues = checker.check_document(&doc(DocumentType::InitialBudget, &content));
        assert!(
            issues
                .iter()
                .any(|i| i.severity == IssueSeverity::Error && i.message.contains("truncated"))
        );
    }

    #[test]
    fn test_empty_section_and_placeholder() {
        let checker = StructuralQualityChecker;
        let content = format!(
            "{}\n\n## Risks\n\n## Owners\n\nOwner is [TBD] for now.",
            healthy_content("Risks")
        );
        let issues = checker.check_document(&doc(DocumentType::RisksAssumptions, &content));
        assert!(issues.iter().any(|i| i.message == "Empty section: ## Risks"));
        assert!(issues.iter().any(|i| i.message.contains("[TBD]")));
    }

    #[test]
    fn test_headings_inside_code_fences_are_not_sections() {
        let checker = StructuralQualityChecker;
        let content = format!(
            "{}\n\n## Setup\n\n```bash\n# install\nmake\n```\n\nDone.",
            healthy_content("Setup")
        );
        let issues = checker.check_document(&doc(DocumentType::Sops, &content));
        assert!(!issues.iter().any(|i| i.message.starts_with("Empty section")));
    }

    #[test]
    fn test_short_document_warns() {
        let checker = StructuralQualityChecker;
        let issues = checker.check_document(&doc(DocumentType::Glossary, "# Glossary\n\nShort."));
        assert!(issues.iter().any(|i| i.severity == IssueSeverity::Warning));
    }

    #[test]
    fn test_project_reports_missing_documents() {
        let checker = StructuralQualityChecker;
        let issues = checker.check_project(&project(vec![doc(
            DocumentType::Readme,
            &healthy_content("Overview"),
        )]));
        assert!(issues.iter().any(|i| i.document == "(project)"
            && i.severity == IssueSeverity::Error
            && i.message == "Only 1/15 documents generated"));
    }

    #[test]
    fn test_project_suggests_undefined_acronyms() {
        let checker = StructuralQualityChecker;
        let readme = format!("{}\n\nWe report to the BIA and use the API.", healthy_content("Overview"));
        let glossary = format!("{}\n\n**MOU**: memorandum of understanding.", healthy_content("Glossary"));
        let brief = format!("{}\n\nAn MOU with the IHS clinic.", healthy_content("Brief"));
        let issues = checker.check_project(&project(vec![
            doc(DocumentType::Readme, &readme),
            doc(DocumentType::Glossary, &glossary),
            doc(DocumentType::ProjectBrief, &brief),
        ]));

        let infos: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Info)
            .map(|i| (i.document.as_str(), i.message.as_str()))
            .collect();
        assert!(infos.contains(&("README.md", "Term 'BIA' might need a glossary entry")));
        assert!(infos.contains(&("Project-Brief.md", "Term 'IHS' might need a glossary entry")));
        assert!(!infos.iter().any(|(_, m)| m.contains("'API'") || m.contains("'MOU'")));
    }
}
