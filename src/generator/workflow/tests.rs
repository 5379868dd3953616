#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use anyhow::{Result, bail};
    use tempfile::TempDir;

    use crate::config::Config;
    use crate::generator::outlet::{FilesystemWriter, OutputWriter};
    use crate::generator::privacy::{PassthroughScanner, PatternScanner};
    use crate::generator::quality::StructuralQualityChecker;
    use crate::generator::research::FRAMEWORKS_AGENT_ID;
    use crate::generator::workflow::{TimingKeys, TimingScope, run_pipeline};
    use crate::llm::client::LlmClient;
    use crate::llm::client::stub::StubClient;
    use crate::types::document::{DocumentType, GeneratedProject};
    use crate::types::project::ProjectInput;

    const DOC_TEXT: &str = "# Title\n\n## Overview\n\nThe plan is finalized.";
    const RESEARCH_TEXT: &str = "KEY FINDINGS:\n- Mentors need background checks\n\nSOURCES:\n- https://example.org/mentoring\n\nRECOMMENDATIONS:\n- Start with one cohort";

    /// 只记录写出请求的输出器
    #[derive(Default)]
    struct RecordingWriter {
        written: Mutex<Vec<String>>,
    }

    impl OutputWriter for RecordingWriter {
        async fn write(&self, project: &GeneratedProject) -> Result<Vec<String>> {
            self.written
                .lock()
                .unwrap()
                .push(project.project_name.clone());
            Ok(project
                .documents
                .iter()
                .map(|doc| format!("memory://{}", doc.relative_path()))
                .collect())
        }
    }

    struct BrokenWriter;

    impl OutputWriter for BrokenWriter {
        async fn write(&self, _project: &GeneratedProject) -> Result<Vec<String>> {
            bail!("disk full")
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.generation.retry_delay_ms = 0;
        config
    }

    fn project() -> ProjectInput {
        ProjectInput::new(
            "Youth Mentorship",
            "Pair high school youth with adult mentors for weekly sessions.",
        )
    }

    #[tokio::test]
    async fn test_pipeline_generates_scores_and_writes() {
        let research = Arc::new(StubClient::replying("research", RESEARCH_TEXT).with_web_search());
        let generation = Arc::new(StubClient::replying("generation", DOC_TEXT));
        let writer = RecordingWriter::default();

        let report = run_pipeline(
            &config(),
            project(),
            Some(research.clone() as Arc<dyn LlmClient>),
            generation.clone(),
            &PassthroughScanner,
            &StructuralQualityChecker,
            &writer,
        )
        .await
        .unwrap();

        assert_eq!(report.project.documents.len(), 15);
        assert_eq!(generation.calls(), 15);
        assert_eq!(report.agents[0].id, FRAMEWORKS_AGENT_ID);
        assert!(report.domain_matches.iter().any(|m| m.domain == "education"));
        assert_eq!(report.research.len(), report.agents.len());
        assert_eq!(research.calls(), report.agents.len());
        assert_eq!(report.failed_agents(), 0);
        assert!(research.requests().iter().all(|r| r.web_search));

        assert!(report.project.documents.iter().all(|d| d.quality_score.is_some()));
        assert!(report.quality_score > 0.0 && report.quality_score < 1.0);
        assert_eq!(report.project.output_paths.len(), 15);
        assert_eq!(
            report.project.output_paths[0],
            "memory://00-Overview/README.md"
        );
        assert_eq!(*writer.written.lock().unwrap(), vec!["Youth Mentorship"]);

        let summary = report.summary();
        assert!(summary.contains("Youth Mentorship"));
        assert!(summary.contains("15"));
    }

    #[tokio::test]
    async fn test_skip_research_never_calls_research_client() {
        let research = Arc::new(StubClient::replying("research", RESEARCH_TEXT));
        let generation = Arc::new(StubClient::replying("generation", DOC_TEXT));
        let mut config = config();
        config.skip_research = true;

        let report = run_pipeline(
            &config,
            project(),
            Some(research.clone() as Arc<dyn LlmClient>),
            generation.clone(),
            &PassthroughScanner,
            &StructuralQualityChecker,
            &RecordingWriter::default(),
        )
        .await
        .unwrap();

        assert_eq!(research.calls(), 0);
        assert!(report.research.is_empty());
        assert_eq!(report.project.documents.len(), 15);
    }

    #[tokio::test]
    async fn test_research_failures_do_not_stop_generation() {
        let research = Arc::new(StubClient::failing("research", "rate limited"));
        let generation = Arc::new(StubClient::replying("generation", DOC_TEXT));

        let report = run_pipeline(
            &config(),
            project(),
            Some(research as Arc<dyn LlmClient>),
            generation.clone(),
            &PassthroughScanner,
            &StructuralQualityChecker,
            &RecordingWriter::default(),
        )
        .await
        .unwrap();

        assert_eq!(report.failed_agents(), report.research.len());
        assert!(report.research[0].findings[0].starts_with("Error during research:"));
        assert_eq!(report.project.documents.len(), 15);
        assert_eq!(generation.calls(), 15);
    }

    #[tokio::test]
    async fn test_strict_privacy_mode_sends_sanitized_text() {
        let generation = Arc::new(StubClient::replying("generation", DOC_TEXT));
        let input = ProjectInput::new(
            "Clinic Intake",
            "Contact jane@example.org to schedule intake at the clinic.",
        );
        let mut config = config();
        config.skip_research = true;

        let report = run_pipeline(
            &config,
            input,
            None,
            generation.clone(),
            &PatternScanner::new().unwrap(),
            &StructuralQualityChecker,
            &RecordingWriter::default(),
        )
        .await
        .unwrap();

        assert!(report.sanitized);
        assert_eq!(report.privacy_flags.len(), 1);
        for request in generation.requests() {
            assert!(!request.prompt.contains("jane@example.org"));
            assert!(request.prompt.contains("[EMAIL_ADDRESS]"));
        }
        assert_eq!(report.project.project_name, "Clinic Intake");
    }

    #[tokio::test]
    async fn test_strict_privacy_mode_sanitizes_project_name() {
        let research = Arc::new(StubClient::replying("research", RESEARCH_TEXT));
        let generation = Arc::new(StubClient::replying("generation", DOC_TEXT));
        let input = ProjectInput::new(
            "Clinic jane@example.org",
            "Schedule patient intake at the rural clinic every Tuesday.",
        )
        .with_context("Escalations go to 605-555-0100.");

        let report = run_pipeline(
            &config(),
            input,
            Some(research.clone() as Arc<dyn LlmClient>),
            generation.clone(),
            &PatternScanner::new().unwrap(),
            &StructuralQualityChecker,
            &RecordingWriter::default(),
        )
        .await
        .unwrap();

        assert!(report.sanitized);
        assert_eq!(report.privacy_flags.len(), 2);
        assert!(research.calls() > 0);
        for request in generation.requests().iter().chain(research.requests().iter()) {
            assert!(!request.prompt.contains("jane@example.org"));
            assert!(!request.prompt.contains("605-555-0100"));
        }
        assert!(generation.requests()[0].prompt.contains("Clinic [EMAIL_ADDRESS]"));
        assert_eq!(report.project.project_name, "Clinic [EMAIL_ADDRESS]");
    }

    #[tokio::test]
    async fn test_relaxed_privacy_mode_keeps_original_text() {
        let generation = Arc::new(StubClient::replying("generation", DOC_TEXT));
        let input = ProjectInput::new(
            "Clinic Intake",
            "Contact jane@example.org to schedule intake at the clinic.",
        );
        let mut config = config();
        config.skip_research = true;
        config.strict_privacy_mode = false;

        let report = run_pipeline(
            &config,
            input,
            None,
            generation.clone(),
            &PatternScanner::new().unwrap(),
            &StructuralQualityChecker,
            &RecordingWriter::default(),
        )
        .await
        .unwrap();

        assert!(!report.sanitized);
        assert_eq!(report.privacy_flags.len(), 1);
        assert!(generation.requests()[0].prompt.contains("jane@example.org"));
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_any_call() {
        let generation = Arc::new(StubClient::replying("generation", DOC_TEXT));

        let result = run_pipeline(
            &config(),
            ProjectInput::new("Tiny", "short"),
            None,
            generation.clone(),
            &PassthroughScanner,
            &StructuralQualityChecker,
            &RecordingWriter::default(),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(generation.calls(), 0);
    }

    #[tokio::test]
    async fn test_output_failure_is_an_error() {
        let generation = Arc::new(StubClient::replying("generation", DOC_TEXT));
        let mut config = config();
        config.skip_research = true;

        let result = run_pipeline(
            &config,
            project(),
            None,
            generation,
            &PassthroughScanner,
            &StructuralQualityChecker,
            &BrokenWriter,
        )
        .await;

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("disk full"));
    }

    #[tokio::test]
    async fn test_filesystem_output_matches_document_table() {
        let temp_dir = TempDir::new().unwrap();
        let generation = Arc::new(StubClient::replying("generation", DOC_TEXT));
        let mut config = config();
        config.skip_research = true;
        config.output_dir = temp_dir.path().to_path_buf();

        let report = run_pipeline(
            &config,
            project(),
            None,
            generation,
            &PassthroughScanner,
            &StructuralQualityChecker,
            &FilesystemWriter::new(temp_dir.path()),
        )
        .await
        .unwrap();

        for doc_type in DocumentType::ALL {
            let spec = doc_type.spec();
            let path = temp_dir
                .path()
                .join("Youth Mentorship")
                .join(spec.folder)
                .join(spec.filename);
            assert!(path.is_file(), "missing {}", path.display());
        }
        assert_eq!(report.project.output_paths.len(), 15);
    }

    #[test]
    fn test_timing_scope_records_phases_in_order() {
        let mut timing = TimingScope::new();
        timing.start_phase(TimingKeys::PRIVACY);
        timing.start_phase(TimingKeys::GENERATION);
        std::thread::sleep(Duration::from_millis(2));
        assert!(timing.end_phase(TimingKeys::PRIVACY).is_some());
        assert!(timing.end_phase(TimingKeys::GENERATION).is_some());
        assert!(timing.end_phase(TimingKeys::OUTPUT).is_none());

        let phases: Vec<&str> = timing
            .get_phase_durations()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(phases, vec!["privacy", "generation"]);

        let report = timing.generate_timing_report();
        assert!(report.starts_with("总执行时间"));
        assert!(report.contains("- generation:"));
        assert_eq!(TimingKeys::get_all_phase_keys().len(), 6);
    }
}
