use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::value::ConfigMap;

/// Literal `"yes"`/`"no"` flag. Native booleans are never accepted in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        matches!(self, YesNo::Yes)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYesNo(pub String);

impl FromStr for YesNo {
    type Err = InvalidYesNo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(YesNo::Yes),
            "no" => Ok(YesNo::No),
            other => Err(InvalidYesNo(other.to_string())),
        }
    }
}

/// Privilege escalation mechanisms ansible understands for `become_method`.
pub const BECOME_METHODS: &[&str] = &[
    "sudo", "su", "pbrun", "pfexec", "doas", "dzdo", "ksu", "runas", "pmrun",
];

pub fn is_supported_become_method(method: &str) -> bool {
    BECOME_METHODS.contains(&method)
}

/// Fields a play may set itself or inherit from the provisioner.
///
/// `None` means "not supplied". The same shape carries both the provisioner
/// defaults and a play's own overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SharedFields {
    pub hosts: Option<Vec<String>>,
    pub groups: Option<Vec<String>>,
    pub r#become: Option<YesNo>,
    pub become_method: Option<String>,
    pub become_user: Option<String>,
    pub extra_vars: Option<ConfigMap>,
    pub forks: Option<u32>,
    pub limit: Option<String>,
    pub vault_password_file: Option<PathBuf>,
    pub verbose: Option<YesNo>,
}

/// Hosts and groups an inventory document is rendered from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryMeta {
    pub hosts: Vec<String>,
    pub groups: Vec<String>,
}

/// Resolved arguments shared by playbook and module invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallArgs {
    pub r#become: YesNo,
    pub become_method: String,
    pub become_user: String,
    pub extra_vars: ConfigMap,
    /// Zero leaves the choice to ansible.
    pub forks: u32,
    pub limit: String,
    pub vault_password_file: Option<PathBuf>,
    pub verbose: YesNo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybookTarget {
    pub path: PathBuf,
    pub force_handlers: YesNo,
    pub skip_tags: Vec<String>,
    pub start_at_task: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleTarget {
    pub name: String,
    pub args: ConfigMap,
    pub background: Option<u32>,
    pub host_pattern: Option<String>,
    pub one_line: YesNo,
    pub poll: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayTarget {
    Playbook(PlaybookTarget),
    Module(ModuleTarget),
}

impl PlayTarget {
    pub fn kind(&self) -> TargetKind {
        match self {
            PlayTarget::Playbook(_) => TargetKind::Playbook,
            PlayTarget::Module(_) => TargetKind::Module,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Playbook,
    Module,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Playbook => f.write_str("playbook"),
            TargetKind::Module => f.write_str("module"),
        }
    }
}

/// One resolved unit of work. Self-contained: nothing refers back to the
/// provisioner defaults it was resolved against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Play {
    pub enabled: YesNo,
    pub target: PlayTarget,
    pub inventory_meta: InventoryMeta,
    pub call_args: CallArgs,
}

impl Play {
    pub fn is_enabled(&self) -> bool {
        self.enabled.is_yes()
    }
}
