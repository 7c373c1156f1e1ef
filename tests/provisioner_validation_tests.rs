use rustle_provision::provisioner::{validate, ValidationError, ValidationWarning};
use rustle_provision::types::{ConfigMap, ConfigValue};
use serde_json::json;
use tempfile::NamedTempFile;

struct Fixtures {
    playbook: NamedTempFile,
    vault_password: NamedTempFile,
}

impl Fixtures {
    fn new() -> Self {
        Self {
            playbook: NamedTempFile::new().unwrap(),
            vault_password: NamedTempFile::new().unwrap(),
        }
    }

    fn playbook(&self) -> String {
        self.playbook.path().display().to_string()
    }

    fn vault_password(&self) -> String {
        self.vault_password.path().display().to_string()
    }
}

fn config(value: serde_json::Value) -> ConfigMap {
    match ConfigValue::from_json(value) {
        Some(ConfigValue::Map(entries)) => entries,
        other => panic!("expected map, got {other:?}"),
    }
}

#[test]
fn test_good_config() {
    let fixtures = Fixtures::new();
    let result = validate(&config(json!({
        "plays": [
            {
                "playbook": fixtures.playbook(),
                "force_handlers": "no",
                "skip_tags": ["tag2"],
                "start_at_task": "test task",
                "tags": ["tag1", "tag2"]
            },
            {
                "module": "some_module",
                "args": {"ARG1": "value 1", "ARG2": "value 2"},
                "background": 10,
                "host_pattern": "all-tests",
                "one_line": "no",
                "poll": 15
            }
        ],
        "use_sudo": "no",
        "skip_install": "yes",
        "skip_cleanup": "yes",
        "install_version": "2.3.0.0",

        "hosts": ["localhost1", "localhost2"],
        "groups": ["group1", "group2"],

        "become": "no",
        "become_method": "sudo",
        "become_user": "test",
        "extra_vars": {"VAR1": "value 1", "VAR2": "value 2"},
        "forks": 10,
        "limit": "a=b",
        "vault_password_file": fixtures.vault_password(),
        "verbose": "no"
    })));

    assert!(result.warnings.is_empty(), "Warnings: {:?}", result.warnings);
    assert!(result.errors.is_empty(), "Errors: {:?}", result.errors);
}

#[test]
fn test_config_without_plays() {
    let result = validate(&config(json!({"use_sudo": "no"})));

    assert_eq!(result.warnings, vec![ValidationWarning::NothingToPlay]);
    assert!(result.errors.is_empty(), "Errors: {:?}", result.errors);
}

#[test]
fn test_invalid_datatype() {
    let fixtures = Fixtures::new();
    let result = validate(&config(json!({
        "plays": [{"playbook": fixtures.playbook()}],
        "use_sudo": true
    })));

    assert!(result.warnings.is_empty(), "Warnings: {:?}", result.warnings);
    assert_eq!(
        result.errors,
        vec![ValidationError::TypeMismatch {
            field: "use_sudo".to_string(),
            expected: "\"yes\" or \"no\"",
            found: "boolean".to_string(),
        }]
    );
}

#[test]
fn test_bad_config() {
    let fixtures = Fixtures::new();
    let result = validate(&config(json!({
        "plays": [
            {"playbook": fixtures.playbook(), "module": "some_module"},
            {"module": "some_module", "one_line": "unknown"}
        ],
        "become": "yes",
        "become_method": "test"
    })));

    assert_eq!(result.warnings.len(), 1, "Warnings: {:?}", result.warnings);
    assert_eq!(result.errors.len(), 3, "Errors: {:?}", result.errors);
    assert!(result
        .errors
        .iter()
        .any(|e| matches!(e, ValidationError::AmbiguousTarget { .. })));
    assert!(result
        .errors
        .iter()
        .any(|e| matches!(e, ValidationError::UnsupportedBecomeMethod { .. })));
}

#[test]
fn test_bad_playbook_config() {
    let fixtures = Fixtures::new();
    let result = validate(&config(json!({
        "plays": [{
            "enabled": "invalid value",
            "playbook": fixtures.playbook(),
            "args": {"arg1": "string value"},
            "background": 10,
            "host_pattern": "all",
            "one_line": "yes",
            "poll": 15
        }]
    })));

    assert_eq!(result.warnings.len(), 1, "Warnings: {:?}", result.warnings);
    assert_eq!(result.errors.len(), 6, "Errors: {:?}", result.errors);
    let not_allowed = result
        .errors
        .iter()
        .filter(|e| matches!(e, ValidationError::FieldNotAllowed { .. }))
        .count();
    assert_eq!(not_allowed, 5);
}

#[test]
fn test_bad_module_config() {
    let result = validate(&config(json!({
        "plays": [{
            "module": "some-module",
            "force_handlers": "yes",
            "skip_tags": ["tag1", "tag2"],
            "start_at_task": "some task",
            "tags": ["tag0"]
        }]
    })));

    assert_eq!(result.warnings.len(), 1, "Warnings: {:?}", result.warnings);
    assert_eq!(
        result.error_messages(),
        vec![
            "plays[0].force_handlers: can't be used with module",
            "plays[0].skip_tags: can't be used with module",
            "plays[0].start_at_task: can't be used with module",
            "plays[0].tags: can't be used with module",
        ]
    );
}

#[test]
fn test_file_existence_checks() {
    let result = validate(&config(json!({
        "plays": [{"playbook": "/tmp/non-existing-playbook.yaml"}],
        "inventory_file": "/tmp/non-existing-inventory-file",
        "vault_password_file": "/tmp/non-existing-vault-password-file"
    })));

    assert_eq!(result.warnings.len(), 1, "Warnings: {:?}", result.warnings);
    assert_eq!(result.errors.len(), 3, "Errors: {:?}", result.errors);
    assert!(result
        .errors
        .iter()
        .all(|e| matches!(e, ValidationError::FileNotFound { .. })));
}

#[test]
fn test_play_vault_password_file_override_is_checked() {
    let fixtures = Fixtures::new();
    let result = validate(&config(json!({
        "plays": [{
            "playbook": fixtures.playbook(),
            "vault_password_file": "/tmp/non-existing-play-vault-file"
        }],
        "vault_password_file": fixtures.vault_password()
    })));

    assert_eq!(
        result.errors,
        vec![ValidationError::FileNotFound {
            field: "plays[0].vault_password_file".to_string(),
            path: "/tmp/non-existing-play-vault-file".to_string(),
        }]
    );
}

#[test]
fn test_local_conflicting_settings() {
    let fixtures = Fixtures::new();
    let result = validate(&config(json!({
        "plays": [{"playbook": fixtures.playbook()}],
        "use_sudo": "no",
        "skip_install": "yes",
        "skip_cleanup": "yes",
        "install_version": "2.3.0.0",
        "local": "yes"
    })));

    assert!(result.warnings.is_empty(), "Warnings: {:?}", result.warnings);
    assert_eq!(
        result.error_messages(),
        vec![
            "use_sudo: not applicable when running locally",
            "skip_install: not applicable when running locally",
            "skip_cleanup: not applicable when running locally",
            "install_version: not applicable when running locally",
        ]
    );
}

#[test]
fn test_disabled_plays_only() {
    let fixtures = Fixtures::new();
    let result = validate(&config(json!({
        "plays": [
            {"enabled": "no", "playbook": fixtures.playbook()},
            {"enabled": "no", "module": "ping"}
        ]
    })));

    assert_eq!(result.warnings, vec![ValidationWarning::NothingToPlay]);
    assert!(result.errors.is_empty());
}

#[test]
fn test_one_clean_play_is_enough() {
    let result = validate(&config(json!({
        "plays": [
            {"module": "ping"},
            {"module": "ping", "tags": ["x"]}
        ]
    })));

    assert!(result.warnings.is_empty());
    assert_eq!(result.errors.len(), 1);
}
