//! 智能体发现 - 纯本地的关键词匹配，不调用任何API

use anyhow::{Context, Result};
use regex::Regex;

use crate::types::agent::{AgentDefinition, DomainMatch};
use crate::types::project::ProjectInput;

/// 框架调研智能体的ID，它的原始输出会作为所有文档的专业框架参考
pub const FRAMEWORKS_AGENT_ID: &str = "agent_000_frameworks";

struct AgentTemplate {
    role: &'static str,
    focus: &'static str,
}

struct DomainProfile {
    domain: &'static str,
    keywords: &'static [&'static str],
    stakeholders: &'static [&'static str],
    agents: &'static [AgentTemplate],
}

const DOMAIN_PROFILES: &[DomainProfile] = &[
    DomainProfile {
        domain: "healthcare",
        keywords: &[
            "health",
            "medical",
            "clinic",
            "hospital",
            "patient",
            "hipaa",
            "phi",
            "treatment",
            "diagnosis",
            "wellness",
            "telehealth",
            "ihs",
            "indian health service",
        ],
        stakeholders: &["patients", "healthcare providers", "administrators", "regulators"],
        agents: &[
            AgentTemplate {
                role: "Healthcare Compliance Researcher",
                focus: "HIPAA, IHS regulations, tribal health sovereignty",
            },
            AgentTemplate {
                role: "Healthcare Best Practices Analyst",
                focus: "Clinical workflows, patient safety, quality metrics",
            },
        ],
    },
    DomainProfile {
        domain: "education",
        keywords: &[
            "school",
            "education",
            "student",
            "teacher",
            "curriculum",
            "learning",
            "training",
            "workshop",
            "tribal college",
            "bie",
            "ferpa",
        ],
        stakeholders: &[
            "students",
            "educators",
            "administrators",
            "parents",
            "tribal education dept",
        ],
        agents: &[
            AgentTemplate {
                role: "Education Policy Researcher",
                focus: "FERPA, BIE requirements, tribal education sovereignty",
            },
            AgentTemplate {
                role: "Curriculum Development Analyst",
                focus: "Best practices, cultural integration, assessment methods",
            },
        ],
    },
    DomainProfile {
        domain: "tribal_governance",
        keywords: &[
            "tribe",
            "tribal",
            "sovereignty",
            "nation",
            "council",
            "reservation",
            "treaty",
            "self-governance",
            "self-determination",
            "bia",
        ],
        stakeholders: &[
            "tribal council",
            "tribal members",
            "federal agencies",
            "state agencies",
        ],
        agents: &[
            AgentTemplate {
                role: "Tribal Policy Researcher",
                focus: "Federal Indian law, sovereignty principles, treaty rights",
            },
            AgentTemplate {
                role: "Governance Best Practices Analyst",
                focus: "Self-governance models, administrative procedures",
            },
        ],
    },
    DomainProfile {
        domain: "grants_funding",
        keywords: &[
            "grant",
            "funding",
            "budget",
            "proposal",
            "funder",
            "foundation",
            "federal grant",
            "state grant",
            "nonprofit",
        ],
        stakeholders: &["funders", "grant administrators", "program staff", "finance team"],
        agents: &[
            AgentTemplate {
                role: "Grants Researcher",
                focus: "Funding opportunities, eligibility requirements, deadlines",
            },
            AgentTemplate {
                role: "Proposal Best Practices Analyst",
                focus: "Successful proposal strategies, compliance requirements",
            },
        ],
    },
    DomainProfile {
        domain: "technology",
        keywords: &[
            "software",
            "app",
            "application",
            "system",
            "database",
            "api",
            "cloud",
            "infrastructure",
            "cybersecurity",
            "data",
        ],
        stakeholders: &["developers", "IT staff", "end users", "security team"],
        agents: &[
            AgentTemplate {
                role: "Technology Standards Researcher",
                focus: "Industry standards, security requirements, compliance",
            },
            AgentTemplate {
                role: "Technical Architecture Analyst",
                focus: "Best practices, scalability, maintainability",
            },
        ],
    },
    DomainProfile {
        domain: "rural_community",
        keywords: &[
            "rural",
            "remote",
            "community",
            "village",
            "broadband",
            "connectivity",
            "infrastructure",
            "transportation",
        ],
        stakeholders: &["community members", "local government", "service providers"],
        agents: &[
            AgentTemplate {
                role: "Rural Development Researcher",
                focus: "USDA programs, connectivity initiatives, infrastructure grants",
            },
            AgentTemplate {
                role: "Community Needs Analyst",
                focus: "Best practices for rural service delivery",
            },
        ],
    },
];

/// 智能体发现服务
pub struct AgentDiscovery {
    /// 每个领域的关键词及其单词边界正则
    matchers: Vec<Vec<(&'static str, Regex)>>,
}

impl AgentDiscovery {
    pub fn new() -> Result<Self> {
        let matchers = DOMAIN_PROFILES
            .iter()
            .map(|profile| {
                profile
                    .keywords
                    .iter()
                    .map(|keyword| {
                        let pattern = format!(r"\b{}\b", regex::escape(keyword));
                        Regex::new(&pattern)
                            .map(|re| (*keyword, re))
                            .context(format!("Invalid keyword pattern: {}", keyword))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { matchers })
    }

    /// 识别项目涉及的领域，按置信度降序排列
    pub fn analyze_project(&self, project: &ProjectInput) -> Vec<DomainMatch> {
        let text = project.context_text().to_lowercase();

        let mut matches: Vec<DomainMatch> = DOMAIN_PROFILES
            .iter()
            .zip(&self.matchers)
            .filter_map(|(profile, keywords)| {
                let matched: Vec<String> = keywords
                    .iter()
                    .filter(|(_, re)| re.is_match(&text))
                    .map(|(keyword, _)| keyword.to_string())
                    .collect();

                if matched.is_empty() {
                    return None;
                }

                Some(DomainMatch {
                    domain: profile.domain.to_string(),
                    confidence: (matched.len() as f64 / 3.0).min(1.0),
                    keywords: matched,
                    stakeholders: profile.stakeholders.iter().map(|s| s.to_string()).collect(),
                })
            })
            .collect();

        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        matches
    }

    /// 为每个匹配领域的每个模板生成一个调研智能体，编号从002开始
    pub fn generate_agents(
        &self,
        project: &ProjectInput,
        domain_matches: &[DomainMatch],
    ) -> Vec<AgentDefinition> {
        let mut agents = Vec::new();
        let mut counter: u32 = 2;

        for domain_match in domain_matches {
            let Some(profile) = DOMAIN_PROFILES
                .iter()
                .find(|p| p.domain == domain_match.domain)
            else {
                continue;
            };

            let readable = readable_domain(profile.domain);
            for template in profile.agents {
                agents.push(AgentDefinition {
                    id: format!("agent_{:03}", counter),
                    name: format!("{} - {}", title_case(&readable), template.role),
                    role: template.role.to_string(),
                    domains: vec![profile.domain.to_string()],
                    research_questions: vec![
                        format!(
                            "What are the key regulations and compliance requirements for {} projects?",
                            readable
                        ),
                        format!("What are best practices for {}?", template.focus),
                        format!(
                            "What stakeholder considerations apply to {}?",
                            domain_match
                                .stakeholders
                                .iter()
                                .take(2)
                                .cloned()
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                        format!(
                            "What common challenges and solutions exist for {} initiatives?",
                            readable
                        ),
                    ],
                    search_queries: vec![
                        format!("{} {} best practices", readable, template.focus),
                        format!("{} compliance requirements", readable),
                        format!("{} {} regulations", project.name, readable),
                    ],
                    priority: counter,
                });
                counter += 1;
            }
        }

        agents
    }

    /// 完整的发现流程，框架调研智能体总是排在第一位
    pub fn discover(&self, project: &ProjectInput) -> (Vec<DomainMatch>, Vec<AgentDefinition>) {
        let matches = self.analyze_project(project);
        let mut agents = self.generate_agents(project, &matches);
        agents.insert(0, frameworks_agent());
        (matches, agents)
    }
}

/// 收集专业文档框架的智能体，每个项目都会运行
pub fn frameworks_agent() -> AgentDefinition {
    AgentDefinition {
        id: FRAMEWORKS_AGENT_ID.to_string(),
        name: "Documentation Frameworks & Professional Standards".to_string(),
        role: "Senior Documentation Architect with 15+ years in nonprofit, tribal, and public sector"
            .to_string(),
        domains: vec![
            "documentation".to_string(),
            "professional_standards".to_string(),
            "project_management".to_string(),
        ],
        research_questions: [
            "Which industry-standard frameworks do professional project documents rely on (SMART goals, RACI charts, risk matrices, Gantt conventions)?",
            "What formatting conventions do executive-level project documents follow in nonprofit and public sector organizations?",
            "What do strong budget narratives, risk assessments and SOPs look like for comparable organizations?",
            "How does senior-level project documentation differ from junior-level work in depth, specificity and strategic framing?",
            "Which templates are commonly used for project briefs, stakeholder notes and status updates?",
        ]
        .iter()
        .map(|q| q.to_string())
        .collect(),
        search_queries: [
            "nonprofit project documentation best practices",
            "project management frameworks SMART goals RACI",
            "budget narrative examples public sector",
            "risk assessment matrix template nonprofit",
            "standard operating procedure template government agency",
            "project timeline milestone best practices",
            "stakeholder analysis framework power interest grid",
        ]
        .iter()
        .map(|q| q.to_string())
        .collect(),
        priority: 1,
    }
}

fn readable_domain(domain: &str) -> String {
    domain.replace('_', " ")
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
