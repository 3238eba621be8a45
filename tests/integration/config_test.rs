use crate::fixtures::{init_tracing, TestFixture};
use jsonmerge::config::MergeConfig;
use jsonmerge::{ArrayHandling, Document, MergeError, MergeSettings, PropertyNameComparison};
use serde_json::json;
use serial_test::serial;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    #[serial]
    fn test_settings_from_xdg_config_drive_merge() {
        init_tracing();
        let fixture = TestFixture::new().expect("Failed to create fixture");
        fixture
            .with_config(
                r#"
[merge]
array-handling = "union"
property-name-comparison = "case-insensitive"
"#,
            )
            .expect("Failed to write config");
        std::env::set_var("XDG_CONFIG_HOME", fixture.config_home());

        let settings = MergeConfig::settings_or_default().expect("Failed to load settings");
        std::env::remove_var("XDG_CONFIG_HOME");

        assert_eq!(settings.array_handling, ArrayHandling::Union);
        assert_eq!(settings.property_name_comparison, PropertyNameComparison::CaseInsensitive);

        let mut doc = Document::from_value(&json!({"Tags": ["a"]}));
        doc.merge_with(doc.root(), json!({"tags": ["a", "b"]}), &settings).expect("merge");
        assert_eq!(doc.root_value(), json!({"Tags": ["a", "b"]}));
    }

    #[test]
    #[serial]
    fn test_missing_config_falls_back_to_defaults() {
        let fixture = TestFixture::new().expect("Failed to create fixture");
        std::env::set_var("XDG_CONFIG_HOME", fixture.config_home());

        let loaded = MergeConfig::load().expect("Failed to load config");
        std::env::remove_var("XDG_CONFIG_HOME");

        assert!(loaded.is_none());
    }

    #[test]
    #[serial]
    fn test_invalid_policy_reports_path_and_cause() {
        let fixture = TestFixture::new().expect("Failed to create fixture");
        fixture
            .with_config("[merge]\nnull-value-handling = \"drop\"\n")
            .expect("Failed to write config");
        std::env::set_var("XDG_CONFIG_HOME", fixture.config_home());

        let err = MergeConfig::load().expect_err("drop is not a policy");
        std::env::remove_var("XDG_CONFIG_HOME");

        assert!(format!("{err:#}").contains("config.toml"));
        assert!(matches!(
            err.downcast_ref::<MergeError>(),
            Some(MergeError::InvalidConfiguration(message)) if message.contains("drop")
        ));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let fixture = TestFixture::new().expect("Failed to create fixture");
        let path = fixture.data.join("merge.toml");
        std::fs::write(&path, "[merge]\narray-handling = \"replace\"\n").expect("Failed to write");

        let config = MergeConfig::load_from(&path).expect("Failed to load config");

        assert_eq!(config.merge, MergeSettings::default().with_array_handling(ArrayHandling::Replace));
    }
}
