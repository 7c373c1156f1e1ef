use std::path::PathBuf;
use tracing::debug;

use super::error::DecodeError;
use super::fallback::FallbackResolver;
use super::schema;
use crate::types::{
    ConfigMap, Document, Lookup, ModuleTarget, Play, PlayTarget, PlaybookTarget,
    ProvisionerConfig, SharedFields, YesNo,
};

/// Builds the typed plan from a raw document.
///
/// Only structural problems fail here. Semantic rules (allowed become
/// methods, file existence, field groups) belong to the validator, so fields
/// from the wrong target group are simply not carried over.
pub fn decode(root: &ConfigMap) -> Result<ProvisionerConfig, DecodeError> {
    let doc = Document::new(root);

    let defaults = decode_shared(&doc, "")?;
    let mut config = ProvisionerConfig {
        plays: Vec::new(),
        inventory_file: take(doc.string(schema::INVENTORY_FILE), "", schema::INVENTORY_FILE)?
            .map(PathBuf::from),
        use_sudo: take(doc.yes_no(schema::USE_SUDO), "", schema::USE_SUDO)?.unwrap_or(YesNo::Yes),
        skip_install: take(doc.yes_no(schema::SKIP_INSTALL), "", schema::SKIP_INSTALL)?
            .unwrap_or_default(),
        skip_cleanup: take(doc.yes_no(schema::SKIP_CLEANUP), "", schema::SKIP_CLEANUP)?
            .unwrap_or_default(),
        install_version: take(doc.string(schema::INSTALL_VERSION), "", schema::INSTALL_VERSION)?,
        local: take(doc.yes_no(schema::LOCAL), "", schema::LOCAL)?.unwrap_or_default(),
        defaults,
    };

    let raw_plays = take(doc.map_list(schema::PLAYS), "", schema::PLAYS)?.unwrap_or_default();
    let resolver = FallbackResolver::new(&config.defaults);
    let mut plays = Vec::with_capacity(raw_plays.len());
    for (index, raw) in raw_plays.into_iter().enumerate() {
        let play = decode_play(index, raw, &resolver)?;
        debug!(
            play = index,
            kind = %play.target.kind(),
            enabled = %play.enabled,
            "Decoded play"
        );
        plays.push(play);
    }
    config.plays = plays;

    Ok(config)
}

fn decode_play(
    index: usize,
    raw: &ConfigMap,
    resolver: &FallbackResolver<'_>,
) -> Result<Play, DecodeError> {
    let doc = Document::new(raw);
    let prefix = format!("plays[{index}].");

    let enabled =
        take(doc.yes_no(schema::ENABLED), &prefix, schema::ENABLED)?.unwrap_or(YesNo::Yes);
    let playbook = take(doc.string(schema::PLAYBOOK), &prefix, schema::PLAYBOOK)?;
    let module = take(doc.string(schema::MODULE), &prefix, schema::MODULE)?;

    let target = match (playbook, module) {
        (Some(_), Some(_)) => {
            return Err(DecodeError::AmbiguousTarget {
                field: format!("plays[{index}]"),
            })
        }
        (None, None) => {
            return Err(DecodeError::MissingTarget {
                field: format!("plays[{index}]"),
            })
        }
        (Some(path), None) => PlayTarget::Playbook(PlaybookTarget {
            path: PathBuf::from(path),
            force_handlers: take(
                doc.yes_no(schema::FORCE_HANDLERS),
                &prefix,
                schema::FORCE_HANDLERS,
            )?
            .unwrap_or_default(),
            skip_tags: take(doc.string_list(schema::SKIP_TAGS), &prefix, schema::SKIP_TAGS)?
                .unwrap_or_default(),
            start_at_task: take(doc.string(schema::START_AT_TASK), &prefix, schema::START_AT_TASK)?,
            tags: take(doc.string_list(schema::TAGS), &prefix, schema::TAGS)?.unwrap_or_default(),
        }),
        (None, Some(name)) => PlayTarget::Module(ModuleTarget {
            name,
            args: take(doc.map(schema::ARGS), &prefix, schema::ARGS)?.unwrap_or_default(),
            background: take(doc.count(schema::BACKGROUND), &prefix, schema::BACKGROUND)?,
            host_pattern: take(doc.string(schema::HOST_PATTERN), &prefix, schema::HOST_PATTERN)?,
            one_line: take(doc.yes_no(schema::ONE_LINE), &prefix, schema::ONE_LINE)?
                .unwrap_or_default(),
            poll: take(doc.count(schema::POLL), &prefix, schema::POLL)?,
        }),
    };

    let overrides = decode_shared(&doc, &prefix)?;
    let (inventory_meta, call_args) = resolver.resolve(&overrides);

    Ok(Play {
        enabled,
        target,
        inventory_meta,
        call_args,
    })
}

/// Reads the inheritable fields exactly as supplied, without defaults.
fn decode_shared(doc: &Document<'_>, prefix: &str) -> Result<SharedFields, DecodeError> {
    Ok(SharedFields {
        hosts: take(doc.string_list(schema::HOSTS), prefix, schema::HOSTS)?,
        groups: take(doc.string_list(schema::GROUPS), prefix, schema::GROUPS)?,
        r#become: take(doc.yes_no(schema::BECOME), prefix, schema::BECOME)?,
        become_method: take(doc.string(schema::BECOME_METHOD), prefix, schema::BECOME_METHOD)?,
        become_user: take(doc.string(schema::BECOME_USER), prefix, schema::BECOME_USER)?,
        extra_vars: take(doc.map(schema::EXTRA_VARS), prefix, schema::EXTRA_VARS)?,
        forks: take(doc.count(schema::FORKS), prefix, schema::FORKS)?,
        limit: take(doc.string(schema::LIMIT), prefix, schema::LIMIT)?,
        vault_password_file: take(
            doc.string(schema::VAULT_PASSWORD_FILE),
            prefix,
            schema::VAULT_PASSWORD_FILE,
        )?
        .map(PathBuf::from),
        verbose: take(doc.yes_no(schema::VERBOSE), prefix, schema::VERBOSE)?,
    })
}

fn take<T>(lookup: Lookup<T>, prefix: &str, name: &str) -> Result<Option<T>, DecodeError> {
    match lookup {
        Lookup::Absent => Ok(None),
        Lookup::Present(value) => Ok(Some(value)),
        Lookup::Mismatch { expected, found } => Err(DecodeError::TypeMismatch {
            field: format!("{prefix}{name}"),
            expected,
            found,
        }),
        Lookup::Invalid { expected, value } => Err(DecodeError::InvalidValue {
            field: format!("{prefix}{name}"),
            expected,
            value,
        }),
    }
}
