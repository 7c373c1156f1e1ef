//! Ansible command lines for resolved plays.

use serde::Serialize;
use std::path::Path;

use crate::types::{CallArgs, ModuleTarget, Play, PlayTarget, PlaybookTarget, ProvisionerConfig};

pub const ANSIBLE: &str = "ansible";
pub const ANSIBLE_PLAYBOOK: &str = "ansible-playbook";
pub const DEFAULT_HOST_PATTERN: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PlayCommand {
    pub fn for_play(play: &Play, inventory_path: &Path) -> Self {
        let inventory = format!("--inventory-file={}", inventory_path.display());
        match &play.target {
            PlayTarget::Playbook(playbook) => {
                let mut args = vec![playbook.path.display().to_string(), inventory];
                push_shared_args(&mut args, &play.call_args);
                push_playbook_args(&mut args, playbook);
                Self {
                    program: ANSIBLE_PLAYBOOK.to_string(),
                    args,
                }
            }
            PlayTarget::Module(module) => {
                let pattern = module
                    .host_pattern
                    .clone()
                    .unwrap_or_else(|| DEFAULT_HOST_PATTERN.to_string());
                let mut args = vec![pattern, format!("--module-name={}", module.name), inventory];
                push_shared_args(&mut args, &play.call_args);
                push_module_args(&mut args, module);
                Self {
                    program: ANSIBLE.to_string(),
                    args,
                }
            }
        }
    }

    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// The command as one line, quoted for a POSIX shell.
    pub fn to_shell_string(&self) -> String {
        shell_words::join(self.argv())
    }
}

fn push_shared_args(args: &mut Vec<String>, call: &CallArgs) {
    if call.r#become.is_yes() {
        args.push("--become".to_string());
        if !call.become_method.is_empty() {
            args.push(format!("--become-method={}", call.become_method));
        }
        if !call.become_user.is_empty() {
            args.push(format!("--become-user={}", call.become_user));
        }
    }
    if !call.extra_vars.is_empty() {
        let vars: serde_json::Map<String, serde_json::Value> = call
            .extra_vars
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        args.push(format!(
            "--extra-vars={}",
            serde_json::Value::Object(vars)
        ));
    }
    if call.forks > 0 {
        args.push(format!("--forks={}", call.forks));
    }
    if !call.limit.is_empty() {
        args.push(format!("--limit={}", call.limit));
    }
    if let Some(vault) = &call.vault_password_file {
        args.push(format!("--vault-password-file={}", vault.display()));
    }
    if call.verbose.is_yes() {
        args.push("--verbose".to_string());
    }
}

fn push_playbook_args(args: &mut Vec<String>, playbook: &PlaybookTarget) {
    if playbook.force_handlers.is_yes() {
        args.push("--force-handlers".to_string());
    }
    if !playbook.skip_tags.is_empty() {
        args.push(format!("--skip-tags={}", playbook.skip_tags.join(",")));
    }
    if let Some(task) = &playbook.start_at_task {
        args.push(format!("--start-at-task={task}"));
    }
    if !playbook.tags.is_empty() {
        args.push(format!("--tags={}", playbook.tags.join(",")));
    }
}

fn push_module_args(args: &mut Vec<String>, module: &ModuleTarget) {
    if !module.args.is_empty() {
        let pairs: Vec<String> = module
            .args
            .iter()
            .map(|(key, value)| format!("{key}={}", shell_words::quote(&value.to_arg_string())))
            .collect();
        args.push(format!("--args={}", pairs.join(" ")));
    }
    if let Some(background) = module.background {
        args.push(format!("--background={background}"));
    }
    if let Some(poll) = module.poll {
        args.push(format!("--poll={poll}"));
    }
    if module.one_line.is_yes() {
        args.push("--one-line".to_string());
    }
}

/// The pip invocation that installs ansible on the target, unless installing
/// is skipped or everything runs locally.
pub fn install_command(config: &ProvisionerConfig) -> Option<PlayCommand> {
    if config.skip_install.is_yes() || config.is_local() {
        return None;
    }

    let package = match &config.install_version {
        Some(version) => format!("ansible=={version}"),
        None => ANSIBLE.to_string(),
    };

    let command = if config.use_sudo.is_yes() {
        PlayCommand {
            program: "sudo".to_string(),
            args: vec!["pip".to_string(), "install".to_string(), package],
        }
    } else {
        PlayCommand {
            program: "pip".to_string(),
            args: vec!["install".to_string(), package],
        }
    };
    Some(command)
}
