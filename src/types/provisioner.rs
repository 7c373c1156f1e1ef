use serde::Serialize;
use std::path::PathBuf;

use super::play::{Play, SharedFields, YesNo};

/// Provisioner-wide settings together with the resolved plays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisionerConfig {
    pub plays: Vec<Play>,
    /// Defaults every play falls back to, field by field.
    pub defaults: SharedFields,
    pub inventory_file: Option<PathBuf>,
    pub use_sudo: YesNo,
    pub skip_install: YesNo,
    pub skip_cleanup: YesNo,
    pub install_version: Option<String>,
    pub local: YesNo,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            plays: Vec::new(),
            defaults: SharedFields::default(),
            inventory_file: None,
            use_sudo: YesNo::Yes,
            skip_install: YesNo::No,
            skip_cleanup: YesNo::No,
            install_version: None,
            local: YesNo::No,
        }
    }
}

impl ProvisionerConfig {
    pub fn enabled_plays(&self) -> impl Iterator<Item = &Play> {
        self.plays.iter().filter(|play| play.is_enabled())
    }

    pub fn is_local(&self) -> bool {
        self.local.is_yes()
    }
}
