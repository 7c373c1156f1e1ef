//! Per-field inheritance of provisioner defaults.

use crate::types::{CallArgs, InventoryMeta, SharedFields};

/// Returns the play value when it was supplied, else the provisioner default,
/// else the zero value.
///
/// Presence is what counts: an explicitly supplied empty list or empty string
/// still overrides the default.
pub fn inherit<T: Clone + Default>(play: Option<T>, default: Option<&T>) -> T {
    play.or_else(|| default.cloned()).unwrap_or_default()
}

/// Resolves a play's shared fields against the provisioner defaults.
pub struct FallbackResolver<'a> {
    defaults: &'a SharedFields,
}

impl<'a> FallbackResolver<'a> {
    pub fn new(defaults: &'a SharedFields) -> Self {
        Self { defaults }
    }

    pub fn inventory_meta(&self, play: &SharedFields) -> InventoryMeta {
        InventoryMeta {
            hosts: inherit(play.hosts.clone(), self.defaults.hosts.as_ref()),
            groups: inherit(play.groups.clone(), self.defaults.groups.as_ref()),
        }
    }

    pub fn call_args(&self, play: &SharedFields) -> CallArgs {
        let defaults = self.defaults;
        CallArgs {
            r#become: inherit(play.r#become, defaults.r#become.as_ref()),
            become_method: inherit(play.become_method.clone(), defaults.become_method.as_ref()),
            become_user: inherit(play.become_user.clone(), defaults.become_user.as_ref()),
            extra_vars: inherit(play.extra_vars.clone(), defaults.extra_vars.as_ref()),
            forks: inherit(play.forks, defaults.forks.as_ref()),
            limit: inherit(play.limit.clone(), defaults.limit.as_ref()),
            vault_password_file: play
                .vault_password_file
                .clone()
                .or_else(|| defaults.vault_password_file.clone()),
            verbose: inherit(play.verbose, defaults.verbose.as_ref()),
        }
    }

    pub fn resolve(&self, play: &SharedFields) -> (InventoryMeta, CallArgs) {
        (self.inventory_meta(play), self.call_args(play))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::YesNo;
    use proptest::prelude::*;

    fn defaults() -> SharedFields {
        SharedFields {
            hosts: Some(vec!["h1".to_string(), "h2".to_string()]),
            groups: Some(vec!["g1".to_string()]),
            r#become: Some(YesNo::Yes),
            become_method: Some("su".to_string()),
            become_user: Some("deploy".to_string()),
            forks: Some(10),
            limit: Some("a=b".to_string()),
            verbose: Some(YesNo::Yes),
            ..Default::default()
        }
    }

    #[test]
    fn test_unset_fields_inherit_defaults() {
        let defaults = defaults();
        let resolver = FallbackResolver::new(&defaults);

        let (meta, args) = resolver.resolve(&SharedFields::default());

        assert_eq!(meta.hosts, vec!["h1", "h2"]);
        assert_eq!(meta.groups, vec!["g1"]);
        assert_eq!(args.r#become, YesNo::Yes);
        assert_eq!(args.become_method, "su");
        assert_eq!(args.forks, 10);
        assert_eq!(args.vault_password_file, None);
    }

    #[test]
    fn test_fields_resolve_independently() {
        let defaults = defaults();
        let resolver = FallbackResolver::new(&defaults);
        let play = SharedFields {
            r#become: Some(YesNo::No),
            forks: Some(3),
            ..Default::default()
        };

        let args = resolver.call_args(&play);

        assert_eq!(args.r#become, YesNo::No);
        assert_eq!(args.forks, 3);
        assert_eq!(args.become_user, "deploy");
        assert_eq!(args.limit, "a=b");
    }

    #[test]
    fn test_explicit_empty_list_overrides_default() {
        let defaults = defaults();
        let resolver = FallbackResolver::new(&defaults);
        let play = SharedFields {
            hosts: Some(vec![]),
            ..Default::default()
        };

        let meta = resolver.inventory_meta(&play);

        assert!(meta.hosts.is_empty());
        assert_eq!(meta.groups, vec!["g1"]);
    }

    #[test]
    fn test_zero_values_without_defaults() {
        let defaults = SharedFields::default();
        let args = FallbackResolver::new(&defaults).call_args(&SharedFields::default());

        assert_eq!(args, CallArgs::default());
    }

    proptest! {
        #[test]
        fn prop_inherit_prefers_play_value(
            play in proptest::option::of(any::<u32>()),
            default in proptest::option::of(any::<u32>()),
        ) {
            let resolved = inherit(play, default.as_ref());
            match (play, default) {
                (Some(p), _) => prop_assert_eq!(resolved, p),
                (None, Some(d)) => prop_assert_eq!(resolved, d),
                (None, None) => prop_assert_eq!(resolved, 0),
            }
        }

        #[test]
        fn prop_limit_fallback_is_per_field(
            play_limit in proptest::option::of("[a-z=]{0,8}"),
            play_forks in proptest::option::of(1u32..64),
        ) {
            let defaults = defaults();
            let play = SharedFields {
                limit: play_limit.clone(),
                forks: play_forks,
                ..Default::default()
            };
            let args = FallbackResolver::new(&defaults).call_args(&play);

            prop_assert_eq!(args.limit, play_limit.unwrap_or_else(|| "a=b".to_string()));
            prop_assert_eq!(args.forks, play_forks.unwrap_or(10));
            prop_assert_eq!(args.become_user, "deploy".to_string());
        }
    }
}
