use std::path::Path;
use tracing::debug;

use super::error::{ProvisionError, ValidationError, ValidationWarning};
use super::schema::{
    self, FieldShape, FieldSpec, GLOBAL_FIELDS, MODULE_ONLY, NOT_LOCAL, PLAYBOOK_ONLY, PLAY_FIELDS,
};
use crate::types::{is_supported_become_method, ConfigMap, Document, Lookup, TargetKind, YesNo};

/// Warnings and errors from one complete validation pass, in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub warnings: Vec<ValidationWarning>,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Any error blocks; warnings are handed back for display.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ProvisionError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(ProvisionError::Invalid {
                errors: self.errors,
            })
        }
    }
}

/// Checks a raw provisioner document without decoding it.
///
/// Every check runs on every call; nothing short-circuits on the first
/// error. The document is only read.
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, root: &ConfigMap) -> ValidationResult {
        let doc = Document::new(root);
        let mut result = ValidationResult::default();
        let mut playable = 0usize;

        for spec in GLOBAL_FIELDS {
            if spec.name == schema::PLAYS {
                if let Lookup::Present(plays) = doc.map_list(schema::PLAYS) {
                    for (index, play) in plays.into_iter().enumerate() {
                        if self.validate_play(index, play, &mut result.errors) {
                            playable += 1;
                        }
                    }
                    continue;
                }
            }
            check_field(&doc, spec, "", &mut result.errors);
        }

        if doc.yes_no(schema::LOCAL) == Lookup::Present(YesNo::Yes) {
            for name in NOT_LOCAL {
                if doc.contains(name) {
                    result.errors.push(ValidationError::LocalConflict {
                        field: name.to_string(),
                    });
                }
            }
        }

        check_unknown_fields(&doc, GLOBAL_FIELDS, "", &mut result.errors);

        if playable == 0 {
            result.warnings.push(ValidationWarning::NothingToPlay);
        }

        debug!(
            warnings = result.warnings.len(),
            errors = result.errors.len(),
            "Validated provisioner configuration"
        );
        result
    }

    /// Returns true when the play is enabled and raised no errors of its own.
    fn validate_play(
        &self,
        index: usize,
        play: &ConfigMap,
        errors: &mut Vec<ValidationError>,
    ) -> bool {
        let doc = Document::new(play);
        let prefix = format!("plays[{index}].");
        let before = errors.len();

        for spec in PLAY_FIELDS {
            check_field(&doc, spec, &prefix, errors);
        }

        let has_playbook = doc.contains(schema::PLAYBOOK);
        let has_module = doc.contains(schema::MODULE);
        match (has_playbook, has_module) {
            (true, true) => errors.push(ValidationError::AmbiguousTarget {
                field: format!("plays[{index}]"),
            }),
            (false, false) => errors.push(ValidationError::MissingTarget {
                field: format!("plays[{index}]"),
            }),
            (true, false) => {
                check_foreign_fields(&doc, MODULE_ONLY, TargetKind::Playbook, &prefix, errors)
            }
            (false, true) => {
                check_foreign_fields(&doc, PLAYBOOK_ONLY, TargetKind::Module, &prefix, errors)
            }
        }

        check_unknown_fields(&doc, PLAY_FIELDS, &prefix, errors);

        let enabled = doc.yes_no(schema::ENABLED) != Lookup::Present(YesNo::No);
        let clean = errors.len() == before;
        debug!(play = index, enabled, clean, "Validated play");
        enabled && clean
    }
}

/// Validates a raw document with the default validator.
pub fn validate(root: &ConfigMap) -> ValidationResult {
    ConfigValidator::new().validate(root)
}

fn check_field(
    doc: &Document<'_>,
    spec: &FieldSpec,
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    let field = || format!("{prefix}{}", spec.name);
    let shape_error = match spec.shape {
        FieldShape::String => doc.string(spec.name).map(drop),
        FieldShape::YesNo => doc.yes_no(spec.name).map(drop),
        FieldShape::Count => doc.count(spec.name).map(drop),
        FieldShape::StringList => doc.string_list(spec.name).map(drop),
        FieldShape::Map => doc.map(spec.name).map(drop),
        FieldShape::MapList => doc.map_list(spec.name).map(drop),
        FieldShape::Path => match doc.string(spec.name) {
            Lookup::Present(path) => {
                if !Path::new(&path).exists() {
                    errors.push(ValidationError::FileNotFound { field: field(), path });
                }
                Lookup::Present(())
            }
            other => other.map(drop),
        },
        FieldShape::BecomeMethod => match doc.string(spec.name) {
            Lookup::Present(method) => {
                if !is_supported_become_method(&method) {
                    errors.push(ValidationError::UnsupportedBecomeMethod {
                        field: field(),
                        method,
                    });
                }
                Lookup::Present(())
            }
            other => other.map(drop),
        },
    };

    match shape_error {
        Lookup::Mismatch { expected, found } => errors.push(ValidationError::TypeMismatch {
            field: field(),
            expected,
            found,
        }),
        Lookup::Invalid { expected, value } => errors.push(ValidationError::InvalidValue {
            field: field(),
            expected,
            value,
        }),
        Lookup::Absent | Lookup::Present(()) => {}
    }
}

fn check_foreign_fields(
    doc: &Document<'_>,
    foreign: &[&str],
    kind: TargetKind,
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    for name in foreign {
        if doc.contains(name) {
            errors.push(ValidationError::FieldNotAllowed {
                field: format!("{prefix}{name}"),
                kind,
            });
        }
    }
}

fn check_unknown_fields(
    doc: &Document<'_>,
    declared: &[FieldSpec],
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    for key in doc.keys() {
        if !schema::is_declared(declared, key) {
            errors.push(ValidationError::UnknownField {
                field: format!("{prefix}{key}"),
            });
        }
    }
}
