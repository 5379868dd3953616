//! 各类文档的写作蓝图：角色设定、必备章节、约束与输出要求

use crate::types::document::DocumentType;

/// 单类文档的写作蓝图
#[derive(Debug)]
pub struct DocumentBlueprint {
    /// 资深角色名称
    pub persona: &'static str,
    /// 角色的从业背景
    pub background: &'static str,
    /// 该角色写出的文档具备的特点
    pub strengths: &'static [&'static str],
    /// 必备章节，按顺序输出为二级标题
    pub sections: &'static [&'static str],
    /// 文档特有的约束
    pub constraints: &'static [&'static str],
    /// 输出要求
    pub deliverables: &'static [&'static str],
    pub min_words: u32,
}

pub fn blueprint(doc_type: DocumentType) -> &'static DocumentBlueprint {
    match doc_type {
        DocumentType::Readme => &README,
        DocumentType::ProjectBrief => &PROJECT_BRIEF,
        DocumentType::Glossary => &GLOSSARY,
        DocumentType::ContextBackground => &CONTEXT_BACKGROUND,
        DocumentType::StakeholderNotes => &STAKEHOLDER_NOTES,
        DocumentType::GoalsSuccess => &GOALS_SUCCESS,
        DocumentType::ScopeBoundaries => &SCOPE_BOUNDARIES,
        DocumentType::InitialBudget => &INITIAL_BUDGET,
        DocumentType::TimelineMilestones => &TIMELINE_MILESTONES,
        DocumentType::RisksAssumptions => &RISKS_ASSUMPTIONS,
        DocumentType::ProcessWorkflow => &PROCESS_WORKFLOW,
        DocumentType::Sops => &SOPS,
        DocumentType::TaskBacklog => &TASK_BACKLOG,
        DocumentType::MeetingNotes => &MEETING_NOTES,
        DocumentType::StatusUpdates => &STATUS_UPDATES,
    }
}

static README: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Technical Writer",
    background: "creating project documentation for diverse audiences",
    strengths: &[
        "Orient new readers within the first screen",
        "Act as the front door to every other project document",
        "Work for team members, stakeholders and outside readers alike",
    ],
    sections: &[
        "Project Title & Tagline",
        "Quick Overview",
        "At a Glance",
        "The Problem We're Solving",
        "Our Approach",
        "Key Deliverables",
        "Document Navigation",
        "Project Team",
        "How to Get Involved",
        "Quick Links",
        "Version History",
    ],
    constraints: &[
        "Describe team members by role, never by invented names",
        "Link every planning document in the navigation table by folder and filename",
    ],
    deliverables: &[
        "An at-a-glance summary table",
        "A document navigation table covering all fifteen documents",
        "A version history section",
    ],
    min_words: 1200,
};

static PROJECT_BRIEF: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Program Officer",
    background: "writing executive briefs for nonprofit, tribal, and public sector leadership",
    strengths: &[
        "Capture attention in the first paragraph",
        "Explain complex projects in plain language",
        "Anticipate executive questions and answer them up front",
        "End with a clear decision point",
    ],
    sections: &[
        "Executive Summary",
        "Problem Statement",
        "Proposed Solution",
        "Target Population & Beneficiaries",
        "Expected Outcomes & Impact",
        "Project Team & Partnerships",
        "Budget Overview",
        "Timeline Overview",
        "Risk Summary",
        "The Ask / Decision Required",
    ],
    constraints: &[
        "Explain every acronym on first use",
        "Keep the brief readable without the other documents",
    ],
    deliverables: &[
        "An executive summary as the first section",
        "A summary table or at-a-glance box",
        "A clear ask or decision section",
    ],
    min_words: 1500,
};

static GLOSSARY: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Documentation Specialist",
    background: "creating reference materials for diverse audiences",
    strengths: &[
        "Define terms without jargon",
        "Capture meanings specific to this project and community",
        "Respect cultural and community terminology",
    ],
    sections: &[
        "How to Use This Glossary",
        "Project-Specific Terms",
        "Domain/Industry Terms",
        "Cultural & Community Terms",
        "Acronyms & Abbreviations",
        "Technical Terms",
        "Organizational Terms",
        "Main Glossary (A-Z)",
        "Terms by Category",
        "Version & Updates",
    ],
    constraints: &[
        "Only define cultural terms that appear in the project context",
        "Mark definitions that need community review",
    ],
    deliverables: &[
        "At least 40 glossary entries",
        "An acronym table",
        "Both alphabetical and by-category organization",
    ],
    min_words: 1500,
};

static CONTEXT_BACKGROUND: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Research Analyst",
    background: "writing environmental scans and context analyses for nonprofit, tribal, and public sector organizations",
    strengths: &[
        "Turn complex environments into clear narratives",
        "Apply PESTLE or similar frameworks systematically",
        "State what is known and what is still unknown",
    ],
    sections: &[
        "Executive Context Summary",
        "Organizational Context",
        "Community/Geographic Context",
        "Problem/Opportunity Analysis",
        "Environmental Scan (PESTLE)",
        "Landscape Analysis",
        "Stakeholder Landscape",
        "Funding & Resource Landscape",
        "Trends & Future Outlook",
        "Implications for Project Design",
    ],
    constraints: &[
        "Ground every claim in the research findings or project context",
        "Label gaps in evidence instead of filling them",
    ],
    deliverables: &[
        "An environmental scan table",
        "Cross-references to Stakeholder Notes and Goals",
    ],
    min_words: 1800,
};

static STAKEHOLDER_NOTES: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Community Engagement Specialist",
    background: "stakeholder analysis for nonprofit, tribal, and public sector projects",
    strengths: &[
        "Use power/interest grids to prioritize engagement",
        "Map formal authority and informal influence",
        "Respect cultural protocols and community dynamics",
    ],
    sections: &[
        "Stakeholder Analysis Overview",
        "Stakeholder Categories",
        "Power/Interest Grid",
        "Detailed Stakeholder Profiles",
        "Formal Authority Map",
        "Informal Influence Network",
        "Potential Supporters & Champions",
        "Potential Resisters & Concerns",
        "Cultural & Protocol Considerations",
        "Engagement Strategy Matrix",
        "Communication Plan Summary",
        "Stakeholder Risks",
    ],
    constraints: &[
        "Name roles and groups, never individuals",
        "Do not assume relationships the context does not support",
        "Respect tribal sovereignty and community self-determination",
    ],
    deliverables: &[
        "A power/interest grid",
        "Six to eight detailed stakeholder profiles",
        "An engagement strategy matrix",
    ],
    min_words: 2000,
};

static GOALS_SUCCESS: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Strategic Planner",
    background: "defining goals and success metrics for nonprofit, tribal, and public sector organizations",
    strengths: &[
        "Apply SMART criteria rigorously",
        "Separate outputs, outcomes and impact",
        "Pair leading indicators with lagging ones",
    ],
    sections: &[
        "Executive Summary",
        "Goal Framework Overview",
        "Strategic Goals",
        "Operational Objectives",
        "Success Metrics & KPIs",
        "Leading vs Lagging Indicators",
        "Outputs, Outcomes, and Impact",
        "Success Criteria by Phase",
        "Measurement & Evaluation Plan",
        "Risks to Goal Achievement",
    ],
    constraints: &[
        "Use ranges or \"Baseline TBD\" instead of invented targets",
        "Never fabricate baseline data or historical performance",
    ],
    deliverables: &["At least one metrics/KPI table"],
    min_words: 1800,
};

static SCOPE_BOUNDARIES: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Project Manager",
    background: "defining project scope for nonprofit, tribal, and public sector organizations",
    strengths: &[
        "Separate what is included from what is not",
        "Prevent scope creep with explicit boundaries",
        "Attach acceptance criteria to every deliverable",
    ],
    sections: &[
        "Scope Overview",
        "In-Scope (Included)",
        "Out-of-Scope (Excluded)",
        "Deliverables",
        "Constraints",
        "Assumptions",
        "Scope Change Management",
        "Success Criteria",
    ],
    constraints: &["Keep scope consistent with the goals already documented"],
    deliverables: &[
        "An in-scope/out-of-scope table",
        "Deliverables with acceptance criteria",
    ],
    min_words: 1500,
};

static INITIAL_BUDGET: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Program Director",
    background: "managing multi-million dollar budgets in nonprofit, tribal, and public sector organizations",
    strengths: &[
        "Tie every line item to a strategic objective",
        "Answer funder questions before they are asked",
        "Use standard budget categories and clearly labelled assumptions",
    ],
    sections: &[
        "Budget Overview",
        "Personnel Costs",
        "Operating Expenses",
        "Indirect Costs",
        "Budget Narrative",
        "Cost-Effectiveness Analysis",
        "Budget Risks & Contingencies",
    ],
    constraints: &[
        "Give dollar figures only as labelled estimate ranges",
        "Do not name vendors, products or consultants",
        "Do not invent grant amounts, funding commitments or revenue",
    ],
    deliverables: &[
        "At least one budget summary table",
        "Cross-references to at least two other documents",
    ],
    min_words: 1500,
};

static TIMELINE_MILESTONES: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Project Manager (PMP)",
    background: "developing project schedules for nonprofit, tribal, and public sector organizations",
    strengths: &[
        "Follow standard scheduling conventions for milestones and dependencies",
        "Identify the critical path and schedule risks",
        "Account for cultural and seasonal considerations",
    ],
    sections: &[
        "Timeline Overview",
        "Project Phases",
        "Milestone Schedule",
        "Critical Path Analysis",
        "Gantt Chart Representation",
        "Activity Schedule by Phase",
        "Resource Loading",
        "Schedule Risks & Buffers",
        "External Dependencies",
        "Schedule Management Approach",
    ],
    constraints: &[
        "Use relative timing (Month 1, Week 3) unless dates are given",
        "Keep dependencies between phases explicit",
    ],
    deliverables: &[
        "A milestone table with eight to twelve milestones",
        "A text-based timeline representation",
    ],
    min_words: 1800,
};

static RISKS_ASSUMPTIONS: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Risk Management Analyst",
    background: "nonprofit, tribal, and public sector project management",
    strengths: &[
        "Use likelihood x impact risk matrices",
        "Pair every risk with a concrete mitigation",
        "Keep risks and assumptions distinct",
    ],
    sections: &[
        "Risk Assessment Overview",
        "Risk Matrix & Definitions",
        "Strategic Risks",
        "Operational Risks",
        "Financial Risks",
        "Compliance & Regulatory Risks",
        "Key Assumptions",
        "Risk Mitigation Strategy",
        "Risk Register Summary Table",
    ],
    constraints: &[
        "Keep likelihood and impact ratings evidence-based",
        "Use mitigate, transfer, accept and avoid correctly",
        "Cover eight to twelve distinct risks",
    ],
    deliverables: &["A risk register summary table"],
    min_words: 2000,
};

static PROCESS_WORKFLOW: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Operations Consultant",
    background: "designing workflows for nonprofit, tribal, and public sector organizations",
    strengths: &[
        "Show inputs, activities, outputs and decision points",
        "Make handoffs between roles visible",
        "Use swim lanes for multi-party processes",
    ],
    sections: &[
        "Process Overview",
        "Process Map Legend",
        "Core Project Processes",
        "Process Flow Diagrams",
        "Swim Lane Diagrams",
        "Process Dependencies",
        "Quality Checkpoints",
        "Exception Handling",
        "Process Metrics",
        "Continuous Improvement",
    ],
    constraints: &["Describe tools generically unless the research names them"],
    deliverables: &[
        "Three to five text-based process diagrams",
        "Decision points with explicit criteria",
    ],
    min_words: 1800,
};

static SOPS: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Operations Manager",
    background: "writing SOPs for nonprofit, tribal, and public sector organizations",
    strengths: &[
        "Write numbered procedures anyone can follow",
        "Include escalation paths and decision rules",
        "Assign responsibilities in RACI form",
    ],
    sections: &[
        "SOP Overview",
        "Roles & Responsibilities (RACI Matrix)",
        "Core Operating Procedures",
        "Communication Protocols",
        "Document Management",
        "Quality Assurance",
        "Issue & Change Management",
        "Compliance & Record-Keeping",
    ],
    constraints: &[
        "Refer to roles, never to named individuals",
        "Use generic tool names such as \"shared drive\" unless the research names a product",
        "Include six to eight complete SOPs",
    ],
    deliverables: &[
        "At least one RACI matrix table",
        "Checklists in Markdown checkbox format where useful",
    ],
    min_words: 2000,
};

static TASK_BACKLOG: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Agile Coach",
    background: "organizing work for nonprofit, tribal, and public sector projects",
    strengths: &[
        "Prioritize with MoSCoW or value/effort",
        "Break work into estimable tasks",
        "Adapt agile practice to non-software teams",
    ],
    sections: &[
        "Backlog Overview",
        "Backlog Structure",
        "Prioritization Framework",
        "Backlog by Phase",
        "Initial Backlog Table",
        "Epic Descriptions",
        "Sprint/Iteration Planning",
        "Backlog Maintenance",
        "Dependencies & Blockers",
        "Completion Tracking",
    ],
    constraints: &["Trace every task back to a goal or deliverable"],
    deliverables: &["An initial backlog table with at least 20 tasks"],
    min_words: 1500,
};

static MEETING_NOTES: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Administrative Professional",
    background: "documenting meetings for nonprofit, tribal, and public sector organizations",
    strengths: &[
        "Record decisions and action items clearly",
        "Use consistent templates",
        "Respect cultural protocols in formal settings",
    ],
    sections: &[
        "Meeting Documentation Overview",
        "Meeting Template",
        "Meeting Types",
        "Pre-Meeting Checklist",
        "Meeting Facilitation Guidelines",
        "Action Item Tracking",
        "Decision Documentation",
        "Sample Meeting Entries",
        "Cultural Considerations",
        "Meeting Archive",
    ],
    constraints: &["Mark sample entries clearly as examples"],
    deliverables: &["A reusable meeting template", "An action item tracking format"],
    min_words: 1500,
};

static STATUS_UPDATES: DocumentBlueprint = DocumentBlueprint {
    persona: "Senior Program Manager",
    background: "writing status reports for nonprofit, tribal, and public sector funders and stakeholders",
    strengths: &[
        "Use Red/Amber/Green status consistently",
        "Keep updates short without dropping substance",
        "Maintain accountability without blame",
    ],
    sections: &[
        "Status Reporting Overview",
        "Status Report Template",
        "RAG Status Definitions",
        "Reporting Schedule",
        "Metrics Dashboard",
        "Escalation Criteria",
        "Sample Status Update",
        "Stakeholder-Specific Formats",
        "Status Meeting Agenda",
        "Historical Tracking",
    ],
    constraints: &["Mark the sample update clearly as an example"],
    deliverables: &[
        "A reusable status report template",
        "A completed sample status update",
    ],
    min_words: 1500,
};
