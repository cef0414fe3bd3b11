//! Loading engine configuration from disk.

use std::io::Write;

use warrant_core::{Actor, AuthorizationChecker, EngineConfig, Error, MissingLabelPolicy, Strategy};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_decide() {
    let file = write_config(
        r#"
strategy = "unanimous"

[label_voter]
prefix = "GROUP_"
on_missing = "abstain"

[hierarchy]
GROUP_OPS = ["GROUP_DEV"]
"#,
    );
    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.strategy, Strategy::Unanimous);
    assert_eq!(config.label_voter.on_missing, MissingLabelPolicy::Abstain);

    let (builder, _hierarchy) = config.manager_builder().unwrap();
    let checker = AuthorizationChecker::new(builder.build());
    let ops = Actor::new("olga", ["GROUP_OPS"]);
    assert!(checker.is_granted(&ops, "GROUP_DEV", None));
    // Absent label abstains, so all-abstain default applies.
    assert!(!checker.is_granted(&ops, "GROUP_FINANCE", None));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.is_configuration());
}

#[test]
fn test_load_malformed_file_names_path() {
    let file = write_config("strategy = [");
    let err = EngineConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains(&file.path().display().to_string()));
    match &err {
        Error::Parse { path, .. } => assert_eq!(path.as_deref(), Some(file.path())),
        other => unreachable!("expected parse error, got {other:?}"),
    }
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_load_hierarchy_entry_must_be_array() {
    let file = write_config(
        r#"
[hierarchy]
ROLE_A = "ROLE_B"
"#,
    );
    let err = EngineConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.is_configuration());
}

#[test]
fn test_load_hierarchy_entry_with_empty_label() {
    let file = write_config(
        r#"
[hierarchy]
ROLE_A = [""]
"#,
    );
    let config = EngineConfig::load(file.path()).unwrap();
    assert!(matches!(
        config.validate(),
        Err(Error::MalformedHierarchy { ref label, .. }) if label == "ROLE_A"
    ));
}

#[test]
fn test_load_cyclic_hierarchy_fails_fast() {
    let file = write_config(
        r#"
[hierarchy]
ROLE_A = ["ROLE_B"]
ROLE_B = ["ROLE_C"]
ROLE_C = ["ROLE_A"]
"#,
    );
    let config = EngineConfig::load(file.path()).unwrap();
    match config.manager_builder() {
        Err(Error::HierarchyCycle { labels }) => {
            assert_eq!(labels, vec!["ROLE_A", "ROLE_B", "ROLE_C"]);
        }
        other => unreachable!("expected cycle error, got {other:?}"),
    }
}
