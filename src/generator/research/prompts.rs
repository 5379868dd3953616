//! 调研阶段的prompt模板

use crate::types::agent::AgentDefinition;

use super::discovery::FRAMEWORKS_AGENT_ID;

/// 按智能体类型选择prompt
pub fn build_research_prompt(agent: &AgentDefinition, project_context: &str) -> String {
    if agent.id == FRAMEWORKS_AGENT_ID {
        build_frameworks_prompt(agent, project_context)
    } else {
        build_domain_prompt(agent, project_context)
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_domain_prompt(agent: &AgentDefinition, project_context: &str) -> String {
    format!(
        r#"You are a {role} researching background material for a project.

## Project Context
{context}

## Research Focus
{role} - Domains: {domains}

## Questions to Answer
{questions}

## Suggested Search Queries
{queries}

## Instructions
1. Search the web for current, relevant information
2. Prefer authoritative sources (government, academic, industry standards bodies)
3. Give specific, actionable findings rather than general statements
4. Cite a source URL for every finding
5. Close with recommendations grounded in what you found

## Output Format
Structure your answer with these labelled sections:
KEY FINDINGS:
- one finding per bullet
SOURCES:
- one URL or reference per bullet
RECOMMENDATIONS:
- one recommendation per bullet
"#,
        role = agent.role,
        context = project_context,
        domains = agent.domains.join(", "),
        questions = bullet_list(&agent.research_questions),
        queries = bullet_list(&agent.search_queries),
    )
}

fn build_frameworks_prompt(agent: &AgentDefinition, project_context: &str) -> String {
    format!(
        r#"You are a {role} gathering professional documentation frameworks.

## Mission
Your research becomes the shared reference for a document writer that has NO web access.
Collect enough concrete scaffolding (frameworks, templates, worked examples) for it to
produce senior-level planning documents on its own.

## Project Context
{context}

## Questions to Answer
{questions}

## Suggested Search Queries
{queries}

## What to Collect

### 1. Professional Frameworks
- SMART goal criteria with examples
- RACI matrix structure and usage rules
- Risk matrices (likelihood x impact scales)
- Timeline and milestone conventions
- Stakeholder analysis models such as the power/interest grid
- Nonprofit budget categories and narrative structure

### 2. Document Structures
For each planning document (budget, risk register, SOPs, timeline and so on) list the
section headings professionals use and what belongs in each section.

### 3. Concrete Examples
Quote specific language from strong budget narratives, risk statements with mitigations,
SOP steps, milestone descriptions and executive status updates.

### 4. Senior-Level Markers
Describe what separates senior documentation from junior work: strategic framing,
depth of justification, cross-referencing, anticipating reviewer questions, use of evidence.

## Output Format

### KEY FINDINGS
- concrete frameworks, templates and criteria

### PROFESSIONAL EXAMPLES
- at least five examples across different document types

### FRAMEWORKS & STANDARDS
- at least five frameworks with their structure

### SENIOR VS JUNIOR MARKERS
- specific differences in language, depth and structure

### SOURCES
- URLs with titles

### RECOMMENDATIONS
- how a writer without web access should apply these frameworks

Prioritize authoritative sources (PMI, government style guides, academic work) and focus on
nonprofit, tribal and public sector settings.
"#,
        role = agent.role,
        context = project_context,
        questions = bullet_list(&agent.research_questions),
        queries = bullet_list(&agent.search_queries),
    )
}
