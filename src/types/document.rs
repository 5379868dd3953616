use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 15份项目规划文档的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "README")]
    Readme,
    #[serde(rename = "Project-Brief")]
    ProjectBrief,
    #[serde(rename = "Glossary")]
    Glossary,
    #[serde(rename = "Context-and-Background")]
    ContextBackground,
    #[serde(rename = "Stakeholder-Notes")]
    StakeholderNotes,
    #[serde(rename = "Goals-and-Success-Criteria")]
    GoalsSuccess,
    #[serde(rename = "Scope-and-Boundaries")]
    ScopeBoundaries,
    #[serde(rename = "Initial-Budget")]
    InitialBudget,
    #[serde(rename = "Timeline-and-Milestones")]
    TimelineMilestones,
    #[serde(rename = "Risks-and-Assumptions")]
    RisksAssumptions,
    #[serde(rename = "Process-Workflow")]
    ProcessWorkflow,
    #[serde(rename = "SOPs")]
    Sops,
    #[serde(rename = "Task-Backlog")]
    TaskBacklog,
    #[serde(rename = "Meeting-Notes")]
    MeetingNotes,
    #[serde(rename = "Status-Updates")]
    StatusUpdates,
}

/// 文档类型对应的输出位置与标题
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSpec {
    pub folder: &'static str,
    pub filename: &'static str,
    pub title: &'static str,
}

impl DocumentType {
    pub const ALL: [DocumentType; 15] = [
        DocumentType::Readme,
        DocumentType::ProjectBrief,
        DocumentType::Glossary,
        DocumentType::ContextBackground,
        DocumentType::StakeholderNotes,
        DocumentType::GoalsSuccess,
        DocumentType::ScopeBoundaries,
        DocumentType::InitialBudget,
        DocumentType::TimelineMilestones,
        DocumentType::RisksAssumptions,
        DocumentType::ProcessWorkflow,
        DocumentType::Sops,
        DocumentType::TaskBacklog,
        DocumentType::MeetingNotes,
        DocumentType::StatusUpdates,
    ];

    /// 与序列化名称一致的标识
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Readme => "README",
            DocumentType::ProjectBrief => "Project-Brief",
            DocumentType::Glossary => "Glossary",
            DocumentType::ContextBackground => "Context-and-Background",
            DocumentType::StakeholderNotes => "Stakeholder-Notes",
            DocumentType::GoalsSuccess => "Goals-and-Success-Criteria",
            DocumentType::ScopeBoundaries => "Scope-and-Boundaries",
            DocumentType::InitialBudget => "Initial-Budget",
            DocumentType::TimelineMilestones => "Timeline-and-Milestones",
            DocumentType::RisksAssumptions => "Risks-and-Assumptions",
            DocumentType::ProcessWorkflow => "Process-Workflow",
            DocumentType::Sops => "SOPs",
            DocumentType::TaskBacklog => "Task-Backlog",
            DocumentType::MeetingNotes => "Meeting-Notes",
            DocumentType::StatusUpdates => "Status-Updates",
        }
    }

    /// 静态配置表：目录、文件名、标题
    pub fn spec(&self) -> DocumentSpec {
        let (folder, filename, title) = match self {
            DocumentType::Readme => ("00-Overview", "README.md", "Project Overview"),
            DocumentType::ProjectBrief => ("00-Overview", "Project-Brief.md", "Project Brief"),
            DocumentType::Glossary => ("00-Overview", "Glossary.md", "Glossary"),
            DocumentType::ContextBackground => (
                "10-Discovery",
                "Context-and-Background.md",
                "Context and Background",
            ),
            DocumentType::StakeholderNotes => {
                ("10-Discovery", "Stakeholder-Notes.md", "Stakeholder Notes")
            }
            DocumentType::GoalsSuccess => (
                "20-Planning",
                "Goals-and-Success-Criteria.md",
                "Goals and Success Criteria",
            ),
            DocumentType::ScopeBoundaries => (
                "20-Planning",
                "Scope-and-Boundaries.md",
                "Scope and Boundaries",
            ),
            DocumentType::InitialBudget => ("20-Planning", "Initial-Budget.md", "Initial Budget"),
            DocumentType::TimelineMilestones => (
                "20-Planning",
                "Timeline-and-Milestones.md",
                "Timeline and Milestones",
            ),
            DocumentType::RisksAssumptions => (
                "20-Planning",
                "Risks-and-Assumptions.md",
                "Risks and Assumptions",
            ),
            DocumentType::ProcessWorkflow => {
                ("30-Execution", "Process-Workflow.md", "Process Workflow")
            }
            DocumentType::Sops => (
                "30-Execution",
                "SOPs.md",
                "Standard Operating Procedures",
            ),
            DocumentType::TaskBacklog => ("30-Execution", "Task-Backlog.md", "Task Backlog"),
            DocumentType::MeetingNotes => ("40-Comms", "Meeting-Notes.md", "Meeting Notes"),
            DocumentType::StatusUpdates => ("40-Comms", "Status-Updates.md", "Status Updates"),
        };
        DocumentSpec {
            folder,
            filename,
            title,
        }
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .iter()
            .find(|doc_type| doc_type.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown document type: {}", s))
    }
}

/// 生成的文档，返回后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub title: String,
    /// Markdown正文
    pub content: String,
    pub folder: String,
    pub filename: String,
    pub generated_at: DateTime<Utc>,
    pub word_count: usize,
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

impl Document {
    /// 相对于项目目录的输出路径
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.folder, self.filename)
    }
}

/// 文档批次：同批文档一起生成，并声明依赖的前序批次
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentBatch {
    pub batch_number: u8,
    pub document_types: &'static [DocumentType],
    pub depends_on: &'static [u8],
}

/// 固定的批次顺序。第5批（会议纪要、状态更新模板）不依赖其他批次，放在最后只是为了清晰
pub const DOCUMENT_BATCHES: [DocumentBatch; 5] = [
    DocumentBatch {
        batch_number: 1,
        document_types: &[
            DocumentType::Readme,
            DocumentType::ProjectBrief,
            DocumentType::Glossary,
        ],
        depends_on: &[],
    },
    DocumentBatch {
        batch_number: 2,
        document_types: &[
            DocumentType::ContextBackground,
            DocumentType::StakeholderNotes,
        ],
        depends_on: &[1],
    },
    DocumentBatch {
        batch_number: 3,
        document_types: &[
            DocumentType::GoalsSuccess,
            DocumentType::ScopeBoundaries,
            DocumentType::InitialBudget,
            DocumentType::TimelineMilestones,
            DocumentType::RisksAssumptions,
        ],
        depends_on: &[1, 2],
    },
    DocumentBatch {
        batch_number: 4,
        document_types: &[
            DocumentType::ProcessWorkflow,
            DocumentType::Sops,
            DocumentType::TaskBacklog,
        ],
        depends_on: &[3],
    },
    DocumentBatch {
        batch_number: 5,
        document_types: &[DocumentType::MeetingNotes, DocumentType::StatusUpdates],
        depends_on: &[],
    },
];

/// 完整的生成结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedProject {
    pub project_name: String,
    pub project_area: String,
    pub documents: Vec<Document>,
    pub total_word_count: usize,
    pub generation_time_seconds: f64,
    #[serde(default)]
    pub output_paths: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub total_input_tokens: u64,
    #[serde(default)]
    pub total_output_tokens: u64,
}

impl GeneratedProject {
    pub fn document(&self, doc_type: DocumentType) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.doc_type == doc_type)
    }
}
