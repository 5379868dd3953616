#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use crate::generator::outlet::{FilesystemWriter, OutputWriter, PROJECT_FOLDERS};
    use crate::types::document::{Document, DocumentType, GeneratedProject};

    fn document(doc_type: DocumentType, content: &str) -> Document {
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

    fn generated(name: &str, documents: Vec<Document>) -> GeneratedProject {
        GeneratedProject {
            project_name: name.to_string(),
            project_area: "04_Iyeska".to_string(),
            total_word_count: documents.iter().map(|d| d.word_count).sum(),
            documents,
            generation_time_seconds: 0.5,
            output_paths: Vec::new(),
            created_at: Utc::now(),
            completed_at: Utc::now(),
            total_input_tokens: 0,
            total_output_tokens: 0,
        }
    }

    #[tokio::test]
    async fn test_writes_documents_into_folder_structure() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FilesystemWriter::new(temp_dir.path());
        let project = generated(
            "Youth Mentorship",
            vec![
                document(DocumentType::Readme, "# Project Overview\n\nHello."),
                document(DocumentType::Sops, "# SOPs\n\nSteps."),
            ],
        );

        let paths = writer.write(&project).await.unwrap();

        assert_eq!(paths.len(), 2);
        let project_dir = temp_dir.path().join("Youth Mentorship");
        let readme = project_dir.join("00-Overview").join("README.md");
        let sops = project_dir.join("30-Execution").join("SOPs.md");
        assert_eq!(paths[0], readme.display().to_string());
        assert_eq!(paths[1], sops.display().to_string());
        assert_eq!(
            std::fs::read_to_string(&readme).unwrap(),
            "# Project Overview\n\nHello."
        );
        assert_eq!(std::fs::read_to_string(&sops).unwrap(), "# SOPs\n\nSteps.");
    }

    #[tokio::test]
    async fn test_creates_every_project_folder() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FilesystemWriter::new(temp_dir.path());

        let paths = writer.write(&generated("Empty Run", vec![])).await.unwrap();

        assert!(paths.is_empty());
        for folder in PROJECT_FOLDERS {
            assert!(temp_dir.path().join("Empty Run").join(folder).is_dir());
        }
    }

    #[tokio::test]
    async fn test_project_name_is_sanitized() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FilesystemWriter::new(temp_dir.path());
        let project = generated(
            "Clinic: Phase 1/2",
            vec![document(DocumentType::Glossary, "# Glossary\n\nTerms.")],
        );

        writer.write(&project).await.unwrap();

        let expected = temp_dir
            .path()
            .join("Clinic_ Phase 1_2")
            .join("00-Overview")
            .join("Glossary.md");
        assert!(expected.is_file());
        assert_eq!(
            writer.project_dir("Clinic: Phase 1/2"),
            temp_dir.path().join("Clinic_ Phase 1_2")
        );
    }

    #[tokio::test]
    async fn test_dot_project_names_stay_inside_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("out");
        let writer = FilesystemWriter::new(&output_dir);

        for name in ["..", "."] {
            let project = generated(name, vec![document(DocumentType::Readme, "# Overview")]);
            let paths = writer.write(&project).await.unwrap();
            assert!(paths[0].starts_with(&output_dir.join("untitled").display().to_string()));
        }

        assert_eq!(writer.project_dir(".."), output_dir.join("untitled"));
        assert!(!temp_dir.path().join("00-Overview").exists());
        assert!(output_dir.join("untitled").join("00-Overview").join("README.md").is_file());
    }

    #[tokio::test]
    async fn test_overwrites_existing_output() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FilesystemWriter::new(temp_dir.path());

        let first = generated("Repeat", vec![document(DocumentType::Readme, "# Old")]);
        writer.write(&first).await.unwrap();
        let second = generated("Repeat", vec![document(DocumentType::Readme, "# New")]);
        let paths = writer.write(&second).await.unwrap();

        assert_eq!(std::fs::read_to_string(&paths[0]).unwrap(), "# New");
    }
}
