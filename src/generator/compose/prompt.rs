//! 文档生成prompt的组装

use crate::generator::research::FRAMEWORKS_AGENT_ID;
use crate::types::agent::AgentResult;
use crate::types::document::{Document, DocumentType};
use crate::types::project::ProjectInput;
use crate::utils::excerpt;

use super::blueprints::blueprint;

const FINDINGS_PER_AGENT: usize = 5;
const PREVIOUS_EXCERPT_DOCS: usize = 3;
const PREVIOUS_EXCERPT_CHARS: usize = 500;

const DEFAULT_FRAMEWORKS: &str = "No frameworks research available. Apply standard professional practice for:
- SMART goal criteria
- RACI matrix structure
- Risk assessment matrices (likelihood x impact)
- Standard nonprofit budget categories
- SOP formatting with numbered procedures";

const GROUNDING_RULES: &[&str] = &[
    "DO NOT invent people's names, vendors, products or software platforms that are not in the context or research",
    "DO NOT fabricate statistics, dollar amounts, grant names or funding sources",
    "DO NOT add stakeholders, partners or team members that earlier documents do not mention",
    "DO NOT contradict earlier documents; reuse their assumptions, scope and figures",
    "DO acknowledge unknowns explicitly (\"To be confirmed during Month 1\")",
];

const STYLE_RULES: &str = "### WRITING STYLE
- Avoid em dashes. Use commas, parentheses or separate sentences instead.
- Never use these words: delve, tapestry, realm, vibrant, bustling, harness, leverage, utilize, seamlessly, meticulous, intricate, pivotal, underscore, embark, navigate, landscape, foster, cutting-edge, holistic, synergy, paradigm.
- Avoid formulaic transitions: Furthermore, Moreover, In addition, Additionally, Firstly, Secondly, In conclusion, To summarize.
- Never open a document or section with \"In today's...\", \"In an era of...\" or \"In the ever-evolving landscape...\". Start with a specific fact or a direct statement.";

/// 组装单篇文档的prompt
pub struct PromptBuilder<'a> {
    project: &'a ProjectInput,
    research: &'a [AgentResult],
}

impl<'a> PromptBuilder<'a> {
    pub fn new(project: &'a ProjectInput, research: &'a [AgentResult]) -> Self {
        Self { project, research }
    }

    pub fn build(&self, doc_type: DocumentType, previous: &[Document]) -> String {
        let spec = doc_type.spec();
        let blueprint = blueprint(doc_type);

        let mut prompt = String::new();
        prompt.push_str(&format!(
            "You are a **{} with 15+ years of experience** {}.\n\n",
            blueprint.persona, blueprint.background
        ));
        prompt.push_str("You are known for documents that:\n");
        prompt.push_str(&bullets(blueprint.strengths));
        prompt.push_str("\n\n");

        prompt.push_str(&format!("## DOCUMENT TO WRITE\n{}\n\n", spec.title));
        prompt.push_str(&format!("## PROJECT CONTEXT\n{}\n\n", self.project_context()));
        prompt.push_str(&format!(
            "## PREVIOUS DOCUMENTS (for consistency)\n{}\n\n",
            previous_context(previous)
        ));
        prompt.push_str(&format!(
            "## RESEARCH FINDINGS\n{}\n\n",
            research_summary(self.research)
        ));
        prompt.push_str(&format!(
            "## PROFESSIONAL FRAMEWORKS & TEMPLATES\n{}\n\n",
            frameworks_research(self.research)
        ));

        prompt.push_str("## REQUIRED STRUCTURE\nUse these sections as H2 headings, in this order:\n");
        for (index, section) in blueprint.sections.iter().enumerate() {
            prompt.push_str(&format!("{}. **{}**\n", index + 1, section));
        }
        prompt.push('\n');

        prompt.push_str("## CONSTRAINTS\n");
        let constraints: Vec<&str> = GROUNDING_RULES
            .iter()
            .chain(blueprint.constraints)
            .copied()
            .collect();
        for (index, rule) in constraints.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", index + 1, rule));
        }
        prompt.push('\n');

        prompt.push_str(STYLE_RULES);
        prompt.push_str("\n\n");

        prompt.push_str("## OUTPUT FORMAT\n");
        prompt.push_str(&format!(
            "Return only the Markdown document, starting with: # {}\n",
            spec.title
        ));
        prompt.push_str(&format!(
            "- At least {} major sections (H2 headings)\n",
            blueprint.sections.len()
        ));
        for deliverable in blueprint.deliverables {
            prompt.push_str(&format!("- {}\n", deliverable));
        }
        prompt.push_str(&format!("- Minimum {} words\n", blueprint.min_words));
        prompt.push_str("- Finish every section; never stop in the middle of a sentence or table\n\n");
        prompt.push_str(&format!("Write the complete {} document now.\n", spec.title));

        prompt
    }

    fn project_context(&self) -> String {
        let mut context = format!(
            "**Project Name:** {}\n**Project Description:** {}",
            self.project.name, self.project.description
        );
        if let Some(additional) = &self.project.additional_context
            && !additional.trim().is_empty()
        {
            context.push_str(&format!("\n**Additional Context:** {}", additional));
        }
        context
    }
}

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 每个成功的智能体取前5条发现
pub fn research_summary(results: &[AgentResult]) -> String {
    if results.is_empty() {
        return "No research results available.".to_string();
    }

    let sections: Vec<String> = results
        .iter()
        .filter(|result| !result.failed && !result.findings.is_empty())
        .map(|result| {
            let findings = result
                .findings
                .iter()
                .take(FINDINGS_PER_AGENT)
                .map(|finding| format!("  - {}", finding))
                .collect::<Vec<_>>()
                .join("\n");
            format!("### Agent: {}\n{}", result.agent_id, findings)
        })
        .collect();

    if sections.is_empty() {
        "No findings available.".to_string()
    } else {
        sections.join("\n\n")
    }
}

/// 框架调研智能体的完整原始输出，缺失时给出默认框架列表
pub fn frameworks_research(results: &[AgentResult]) -> String {
    results
        .iter()
        .find(|result| result.agent_id == FRAMEWORKS_AGENT_ID)
        .and_then(|result| result.raw_response.as_deref())
        .filter(|raw| !raw.trim().is_empty())
        .unwrap_or(DEFAULT_FRAMEWORKS)
        .to_string()
}

/// 已生成文档的摘要：全部文档的索引，加上最近3篇的节选
pub fn previous_context(documents: &[Document]) -> String {
    if documents.is_empty() {
        return "No previous documents.".to_string();
    }

    let index = documents
        .iter()
        .map(|doc| format!("- {} ({})", doc.title, doc.relative_path()))
        .collect::<Vec<_>>()
        .join("\n");

    let recent_start = documents.len().saturating_sub(PREVIOUS_EXCERPT_DOCS);
    let excerpts = documents[recent_start..]
        .iter()
        .map(|doc| {
            format!(
                "**{}:**\n{}",
                doc.title,
                excerpt(&doc.content, PREVIOUS_EXCERPT_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Documents already written in this run:\n{}\n\nMost recent excerpts:\n\n{}",
        index, excerpts
    )
}
