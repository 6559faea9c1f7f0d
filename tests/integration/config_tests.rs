use figment::providers::Serialized;
use figment::Jail;
use simdupe::config::{Config, ConfigError, HelperCommand};

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = figment::Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert!(!config.follow_symlinks);
    assert!(!config.skip_hidden);
    assert_eq!(config.progress_interval, 10);
    assert!(config.comparers.spreadsheet.is_none());
}

#[test]
fn test_config_load_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("SIMDUPE_PROGRESS_INTERVAL", "25");
        // Use double underscore for nesting
        jail.set_env("SIMDUPE_COMPARERS__TIMEOUT_SECS", "30");
        jail.create_file("config.toml", "progress_interval = 7\nskip_hidden = true\n")?;
        let config_path = jail.directory().join("config.toml");

        let config = Config::load_from(None, Some(&config_path)).unwrap();

        // Environment wins over the file.
        assert_eq!(config.progress_interval, 25);
        assert_eq!(config.comparers.timeout_secs, Some(30));
        assert!(config.skip_hidden);
        Ok(())
    });
}

#[test]
fn test_config_load_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
follow_symlinks = true
skip_hidden = true

[comparers]
builtin_word = true
timeout_secs = 5

[comparers.spreadsheet]
program = "python3"
args = ["compare_excel.py"]

[comparers.presentation]
program = "compare-pptx"
"#,
        )?;
        let config_path = jail.directory().join("config.toml");

        let config = Config::load_from(None, Some(&config_path)).unwrap();

        assert!(config.follow_symlinks);
        assert!(config.skip_hidden);
        assert_eq!(config.progress_interval, 10);
        assert!(config.comparers.builtin_word);
        assert_eq!(config.comparers.timeout_secs, Some(5));
        assert_eq!(
            config.comparers.spreadsheet,
            Some(HelperCommand {
                program: "python3".to_string(),
                args: vec!["compare_excel.py".to_string()],
            })
        );
        let presentation = config.comparers.presentation.unwrap();
        assert_eq!(presentation.program, "compare-pptx");
        assert!(presentation.args.is_empty());
        assert!(config.comparers.word.is_none());
        Ok(())
    });
}

#[test]
fn test_platform_file_is_optional() {
    Jail::expect_with(|jail| {
        let absent = jail.directory().join("nowhere").join("config.toml");

        let config = Config::load_from(Some(&absent), None).unwrap();

        assert!(!config.skip_hidden);
        assert_eq!(config.progress_interval, 10);
        Ok(())
    });
}

#[test]
fn test_explicit_file_overrides_platform_file() {
    Jail::expect_with(|jail| {
        jail.create_file("platform.toml", "skip_hidden = true\nfollow_symlinks = true\n")?;
        jail.create_file("explicit.toml", "follow_symlinks = false\n")?;
        let platform = jail.directory().join("platform.toml");
        let explicit = jail.directory().join("explicit.toml");

        let config = Config::load_from(Some(&platform), Some(&explicit)).unwrap();

        assert!(config.skip_hidden);
        assert!(!config.follow_symlinks);
        Ok(())
    });
}

#[test]
fn test_config_save_toml() {
    let mut config = Config::default();
    config.skip_hidden = true;
    config.comparers.word = Some(HelperCommand {
        program: "compare-docx".to_string(),
        args: Vec::new(),
    });

    let content = config.to_toml().unwrap();
    let reparsed: Config = toml::from_str(&content).unwrap();

    assert!(content.contains("skip_hidden = true"));
    assert!(content.contains("program = \"compare-docx\""));
    assert_eq!(reparsed, config);
}

#[test]
fn test_config_invalid_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "skip_hidden = [not toml")?;
        let config_path = jail.directory().join("config.toml");

        let result = Config::load_from(None, Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        Ok(())
    });
}

#[test]
fn test_config_wrong_type() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "progress_interval = \"often\"\n")?;
        let config_path = jail.directory().join("config.toml");

        let result = Config::load_from(None, Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        Ok(())
    });
}

