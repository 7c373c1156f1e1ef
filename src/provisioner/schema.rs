//! Declared provisioner fields, in the order diagnostics are reported.

pub const PLAYS: &str = "plays";
pub const HOSTS: &str = "hosts";
pub const GROUPS: &str = "groups";
pub const BECOME: &str = "become";
pub const BECOME_METHOD: &str = "become_method";
pub const BECOME_USER: &str = "become_user";
pub const EXTRA_VARS: &str = "extra_vars";
pub const FORKS: &str = "forks";
pub const INVENTORY_FILE: &str = "inventory_file";
pub const LIMIT: &str = "limit";
pub const VAULT_PASSWORD_FILE: &str = "vault_password_file";
pub const VERBOSE: &str = "verbose";
pub const USE_SUDO: &str = "use_sudo";
pub const SKIP_INSTALL: &str = "skip_install";
pub const SKIP_CLEANUP: &str = "skip_cleanup";
pub const INSTALL_VERSION: &str = "install_version";
pub const LOCAL: &str = "local";

pub const ENABLED: &str = "enabled";
pub const PLAYBOOK: &str = "playbook";
pub const MODULE: &str = "module";
pub const FORCE_HANDLERS: &str = "force_handlers";
pub const SKIP_TAGS: &str = "skip_tags";
pub const START_AT_TASK: &str = "start_at_task";
pub const TAGS: &str = "tags";
pub const ARGS: &str = "args";
pub const BACKGROUND: &str = "background";
pub const HOST_PATTERN: &str = "host_pattern";
pub const ONE_LINE: &str = "one_line";
pub const POLL: &str = "poll";

/// Expected shape of a field's raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    String,
    /// A string naming a file that must exist.
    Path,
    YesNo,
    Count,
    StringList,
    Map,
    MapList,
    BecomeMethod,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: FieldShape,
}

const fn field(name: &'static str, shape: FieldShape) -> FieldSpec {
    FieldSpec { name, shape }
}

pub const GLOBAL_FIELDS: &[FieldSpec] = &[
    field(PLAYS, FieldShape::MapList),
    field(HOSTS, FieldShape::StringList),
    field(GROUPS, FieldShape::StringList),
    field(BECOME, FieldShape::YesNo),
    field(BECOME_METHOD, FieldShape::BecomeMethod),
    field(BECOME_USER, FieldShape::String),
    field(EXTRA_VARS, FieldShape::Map),
    field(FORKS, FieldShape::Count),
    field(INVENTORY_FILE, FieldShape::Path),
    field(LIMIT, FieldShape::String),
    field(VAULT_PASSWORD_FILE, FieldShape::Path),
    field(VERBOSE, FieldShape::YesNo),
    field(USE_SUDO, FieldShape::YesNo),
    field(SKIP_INSTALL, FieldShape::YesNo),
    field(SKIP_CLEANUP, FieldShape::YesNo),
    field(INSTALL_VERSION, FieldShape::String),
    field(LOCAL, FieldShape::YesNo),
];

pub const PLAY_FIELDS: &[FieldSpec] = &[
    field(ENABLED, FieldShape::YesNo),
    field(PLAYBOOK, FieldShape::Path),
    field(MODULE, FieldShape::String),
    field(HOSTS, FieldShape::StringList),
    field(GROUPS, FieldShape::StringList),
    field(BECOME, FieldShape::YesNo),
    field(BECOME_METHOD, FieldShape::BecomeMethod),
    field(BECOME_USER, FieldShape::String),
    field(EXTRA_VARS, FieldShape::Map),
    field(FORKS, FieldShape::Count),
    field(LIMIT, FieldShape::String),
    field(VAULT_PASSWORD_FILE, FieldShape::Path),
    field(VERBOSE, FieldShape::YesNo),
    field(FORCE_HANDLERS, FieldShape::YesNo),
    field(SKIP_TAGS, FieldShape::StringList),
    field(START_AT_TASK, FieldShape::String),
    field(TAGS, FieldShape::StringList),
    field(ARGS, FieldShape::Map),
    field(BACKGROUND, FieldShape::Count),
    field(HOST_PATTERN, FieldShape::String),
    field(ONE_LINE, FieldShape::YesNo),
    field(POLL, FieldShape::Count),
];

/// Fields only meaningful for a playbook play.
pub const PLAYBOOK_ONLY: &[&str] = &[FORCE_HANDLERS, SKIP_TAGS, START_AT_TASK, TAGS];

/// Fields only meaningful for a module play.
pub const MODULE_ONLY: &[&str] = &[ARGS, BACKGROUND, HOST_PATTERN, ONE_LINE, POLL];

/// Global fields that have no effect when running on the control machine.
pub const NOT_LOCAL: &[&str] = &[USE_SUDO, SKIP_INSTALL, SKIP_CLEANUP, INSTALL_VERSION];

pub fn is_declared(fields: &[FieldSpec], name: &str) -> bool {
    fields.iter().any(|spec| spec.name == name)
}
