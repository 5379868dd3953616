#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::GenerationProvider;
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, TempDir};

    fn missing_default() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wowasi.toml");
        (temp_dir, path)
    }

    #[test]
    fn test_args_positional_values() {
        let args = Args::try_parse_from([
            "wowasi-rs",
            "Youth Mentorship",
            "Pair youth with adult mentors.",
        ])
        .unwrap();

        assert_eq!(args.name, "Youth Mentorship");
        assert_eq!(args.description, "Pair youth with adult mentors.");
        assert!(args.context.is_none());
        assert!(!args.skip_research);
        assert!(!args.no_web_search);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_require_name_and_description() {
        assert!(Args::try_parse_from(["wowasi-rs"]).is_err());
        assert!(Args::try_parse_from(["wowasi-rs", "Only Name"]).is_err());
    }

    #[test]
    fn test_project_input_from_args() {
        let args = Args::try_parse_from([
            "wowasi-rs",
            "Food Bank",
            "Weekly distribution for seniors.",
            "--context",
            "Volunteer-run",
            "-a",
            "01_Personal",
            "--format",
            "filesystem",
        ])
        .unwrap();

        let project = args.project_input();
        assert_eq!(project.name, "Food Bank");
        assert_eq!(project.additional_context.as_deref(), Some("Volunteer-run"));
        assert_eq!(project.area, "01_Personal");
        assert_eq!(project.output_format, "filesystem");
    }

    #[test]
    fn test_into_config_defaults_without_file() {
        let (_temp_dir, default_path) = missing_default();
        let args = Args::try_parse_from(["wowasi-rs", "Name", "A long description."]).unwrap();

        let config = args.into_config_with_default(default_path).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("./output"));
        assert_eq!(config.llm.generation_provider, GenerationProvider::Hosted);
        assert!(config.strict_privacy_mode);
        assert!(!config.skip_research);
    }

    #[test]
    fn test_into_config_applies_overrides() {
        let (_temp_dir, default_path) = missing_default();
        let args = Args::try_parse_from([
            "wowasi-rs",
            "Name",
            "A long description.",
            "--output",
            "/tmp/plans",
            "--provider",
            "self-hosted",
            "--max-concurrent-agents",
            "4",
            "--max-tokens",
            "4096",
            "--temperature",
            "0.3",
            "--no-web-search",
            "--skip-research",
            "--relaxed-privacy",
            "-v",
        ])
        .unwrap();

        let config = args.into_config_with_default(default_path).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/plans"));
        assert_eq!(config.llm.generation_provider, GenerationProvider::SelfHosted);
        assert_eq!(config.research.max_concurrent_agents, 4);
        assert_eq!(config.llm.max_generation_tokens, 4096);
        assert_eq!(config.llm.temperature, 0.3);
        assert!(!config.llm.enable_web_search);
        assert!(!config.research.enable_web_search);
        assert!(config.skip_research);
        assert!(!config.strict_privacy_mode);
        assert!(config.verbose);
    }

    #[test]
    fn test_into_config_rejects_unknown_provider() {
        let (_temp_dir, default_path) = missing_default();
        let args = Args::try_parse_from([
            "wowasi-rs",
            "Name",
            "A long description.",
            "--provider",
            "gpt",
        ])
        .unwrap();

        assert!(args.into_config_with_default(default_path).is_err());
    }

    #[test]
    fn test_into_config_reads_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "output_dir = \"/srv/plans\"\n\n[llm]\ngeneration_provider = \"self-hosted\"\n\n[research]\nmax_concurrent_agents = 3"
        )
        .unwrap();
        let (_temp_dir, default_path) = missing_default();
        let args = Args::try_parse_from([
            "wowasi-rs",
            "Name",
            "A long description.",
            "--config",
            file.path().to_str().unwrap(),
            "--max-concurrent-agents",
            "5",
        ])
        .unwrap();

        let config = args.into_config_with_default(default_path).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/srv/plans"));
        assert_eq!(config.llm.generation_provider, GenerationProvider::SelfHosted);
        assert_eq!(config.research.max_concurrent_agents, 5);
    }

    #[test]
    fn test_into_config_loads_default_file_when_present() {
        let temp_dir = TempDir::new().unwrap();
        let default_path = temp_dir.path().join("wowasi.toml");
        std::fs::write(&default_path, "skip_research = true\n").unwrap();
        let args = Args::try_parse_from(["wowasi-rs", "Name", "A long description."]).unwrap();

        let config = args.into_config_with_default(default_path).unwrap();

        assert!(config.skip_research);
    }

    #[test]
    fn test_into_config_fails_on_missing_explicit_file() {
        let (_temp_dir, default_path) = missing_default();
        let args = Args::try_parse_from([
            "wowasi-rs",
            "Name",
            "A long description.",
            "--config",
            "/nonexistent/wowasi.toml",
        ])
        .unwrap();

        assert!(args.into_config_with_default(default_path).is_err());
    }
}
