//! 文档生成阶段
//!
//! 按 [`DOCUMENT_BATCHES`] 的顺序逐篇生成，每篇文档的prompt都包含本次运行中已经生成的全部文档，
//! 因此批内与批间都严格串行。

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::llm::client::{Completion, CompletionRequest, LlmClient, TokenUsage};
use crate::types::agent::AgentResult;
use crate::types::document::{
    DOCUMENT_BATCHES, Document, DocumentBatch, DocumentType, GeneratedProject,
};
use crate::types::project::ProjectInput;
use crate::utils::word_count;

pub mod blueprints;
pub mod prompt;
pub mod truncation;

use prompt::PromptBuilder;
use truncation::detect_truncation;

/// 单次生成的token上限，超过该值托管后端要求流式调用
pub const GENERATION_TOKEN_CEILING: u32 = 8192;

/// 文档生成参数
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f64,
    pub max_retries: u32,
    /// 调用出错后的等待时间
    pub retry_delay: Duration,
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_tokens: config.llm.max_generation_tokens.min(GENERATION_TOKEN_CEILING),
            temperature: config.llm.temperature,
            max_retries: config.generation.max_retries,
            retry_delay: Duration::from_millis(config.generation.retry_delay_ms),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 文档生成器
pub struct DocumentGenerator {
    client: Arc<dyn LlmClient>,
    settings: GenerationSettings,
}

impl DocumentGenerator {
    pub fn new(client: Arc<dyn LlmClient>, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    /// 生成单篇文档
    ///
    /// 截断或出错时重试，重试不提高token上限。最终仍截断时使用最后一次的内容；
    /// 全部调用都失败时返回带错误标记的占位文档，从不返回错误。
    pub async fn generate_document(
        &self,
        doc_type: DocumentType,
        project: &ProjectInput,
        research: &[AgentResult],
        previous: &[Document],
    ) -> Document {
        let spec = doc_type.spec();
        let prompt = PromptBuilder::new(project, research).build(doc_type, previous);
        let request = CompletionRequest::new(prompt, self.settings.max_tokens, self.settings.temperature);
        let attempts = self.settings.max_retries + 1;

        let mut usage = TokenUsage::default();
        let mut last_content: Option<String> = None;
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.client.complete(&request).await {
                Ok(Completion { text, usage: call_usage }) => {
                    usage += call_usage;

                    let Some(reason) = detect_truncation(&text) else {
                        return self.build_document(doc_type, text, usage);
                    };

                    if attempt < attempts {
                        warn!(
                            "⚠️ {} 疑似被截断 ({})，重试中 (第 {} / {} 次尝试)",
                            spec.title,
                            reason,
                            attempt + 1,
                            attempts
                        );
                        last_content = Some(text);
                        continue;
                    }

                    warn!(
                        "⚠️ {} 在 {} 次尝试后仍被截断 ({})，使用最后一次结果 ({} 词)",
                        spec.title,
                        attempts,
                        reason,
                        word_count(&text)
                    );
                    return self.build_document(doc_type, text, usage);
                }
                Err(e) => {
                    error!(
                        "❌ 生成 {} 出错 (第 {} / {} 次尝试): {}",
                        spec.title, attempt, attempts, e
                    );
                    last_error = Some(e);
                    if attempt < attempts && !self.settings.retry_delay.is_zero() {
                        tokio::time::sleep(self.settings.retry_delay).await;
                    }
                }
            }
        }

        if let Some(content) = last_content.filter(|c| !c.trim().is_empty()) {
            warn!("⚠️ {} 调用出错，返回部分内容", spec.title);
            return self.build_document(doc_type, content, usage);
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no content returned".to_string());
        self.build_document(doc_type, error_placeholder(spec.title, &reason), usage)
    }

    fn build_document(&self, doc_type: DocumentType, content: String, usage: TokenUsage) -> Document {
        let spec = doc_type.spec();
        Document {
            doc_type,
            title: spec.title.to_string(),
            word_count: word_count(&content),
            content,
            folder: spec.folder.to_string(),
            filename: spec.filename.to_string(),
            generated_at: Utc::now(),
            quality_score: None,
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
        }
    }

    /// 串行生成一个批次，批内后生成的文档能看到先生成的文档
    pub async fn generate_batch(
        &self,
        batch: &DocumentBatch,
        project: &ProjectInput,
        research: &[AgentResult],
        previous: &[Document],
    ) -> Vec<Document> {
        info!(
            "📝 生成第 {} 批文档 ({} 篇)",
            batch.batch_number,
            batch.document_types.len()
        );

        let mut context: Vec<Document> = previous.to_vec();
        let mut documents = Vec::with_capacity(batch.document_types.len());

        for &doc_type in batch.document_types {
            let document = self
                .generate_document(doc_type, project, research, &context)
                .await;
            info!("✓ {} 完成 ({} 词)", document.title, document.word_count);
            context.push(document.clone());
            documents.push(document);
        }

        documents
    }

    /// 按批次顺序生成全部15篇文档
    pub async fn generate_all(
        &self,
        project: &ProjectInput,
        research: &[AgentResult],
    ) -> GeneratedProject {
        let created_at = Utc::now();
        let started = Instant::now();
        let mut documents: Vec<Document> = Vec::new();

        for batch in DOCUMENT_BATCHES.iter() {
            let generated = self
                .generate_batch(batch, project, research, &documents)
                .await;
            documents.extend(generated);
        }

        let total_word_count = documents.iter().map(|doc| doc.word_count).sum();
        let total_input_tokens = documents.iter().map(|doc| doc.input_tokens).sum();
        let total_output_tokens = documents.iter().map(|doc| doc.output_tokens).sum();

        GeneratedProject {
            project_name: project.name.clone(),
            project_area: project.area.clone(),
            documents,
            total_word_count,
            generation_time_seconds: started.elapsed().as_secs_f64(),
            output_paths: Vec::new(),
            created_at,
            completed_at: Utc::now(),
            total_input_tokens,
            total_output_tokens,
        }
    }
}

/// 生成彻底失败时的占位正文
pub fn error_placeholder(title: &str, error: &str) -> String {
    format!("# {}\n\n*Error generating document: {}*", title, error)
}
