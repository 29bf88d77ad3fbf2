//! Allowed link targets and relations
//!
//! The supported values are fixed tables; user configuration can only narrow
//! them. A configured default that falls outside its allowed set is replaced
//! by the global default and reported as a [`ConfigWarning`].

use crate::config::ToolConfig;

/// Window targets in canonical order
pub const SUPPORTED_TARGETS: [&str; 4] = ["_self", "_blank", "_parent", "_top"];

/// `rel` tokens in canonical order (the empty string means "no rel")
pub const SUPPORTED_RELATIONS: [&str; 16] = [
    "",
    "alternate",
    "author",
    "bookmark",
    "external",
    "help",
    "license",
    "next",
    "nofollow",
    "noopener",
    "noreferrer",
    "opener",
    "prev",
    "search",
    "sponsored",
    "tag",
];

pub const DEFAULT_TARGET: &str = "_self";
pub const DEFAULT_RELATION: &str = "";

/// Which configured option a warning is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Target,
    Relation,
}

impl OptionKind {
    fn config_key(&self) -> &'static str {
        match self {
            OptionKind::Target => "defaultTarget",
            OptionKind::Relation => "defaultRelation",
        }
    }
}

/// A configured default was not in its allowed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub kind: OptionKind,
    pub configured: String,
    pub fallback: &'static str,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} is not among the available values, falling back to {:?}",
            self.kind.config_key(),
            self.configured,
            self.fallback
        )
    }
}

/// A resolved default plus the warning raised while resolving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub warning: Option<ConfigWarning>,
}

fn available(supported: &[&'static str], configured: Option<&Vec<String>>) -> Vec<&'static str> {
    match configured {
        Some(allowed) => supported
            .iter()
            .copied()
            .filter(|value| allowed.iter().any(|a| a.as_str() == *value))
            .collect(),
        None => supported.to_vec(),
    }
}

fn resolve_default(
    kind: OptionKind,
    configured: Option<&str>,
    available: &[&'static str],
    fallback: &'static str,
) -> Resolved {
    match configured {
        None => Resolved {
            value: fallback.to_string(),
            warning: None,
        },
        Some(value) if available.iter().any(|v| *v == value) => Resolved {
            value: value.to_string(),
            warning: None,
        },
        Some(value) => Resolved {
            value: fallback.to_string(),
            warning: Some(ConfigWarning {
                kind,
                configured: value.to_string(),
                fallback,
            }),
        },
    }
}

/// Supported targets narrowed by `config.targets`, in canonical order
pub fn available_targets(config: &ToolConfig) -> Vec<&'static str> {
    available(&SUPPORTED_TARGETS, config.targets.as_ref())
}

/// Supported relations narrowed by `config.relations`, in canonical order
pub fn available_relations(config: &ToolConfig) -> Vec<&'static str> {
    available(&SUPPORTED_RELATIONS, config.relations.as_ref())
}

pub fn user_default_target(config: &ToolConfig) -> Resolved {
    resolve_default(
        OptionKind::Target,
        config.default_target.as_deref(),
        &available_targets(config),
        DEFAULT_TARGET,
    )
}

pub fn user_default_relation(config: &ToolConfig) -> Resolved {
    resolve_default(
        OptionKind::Relation,
        config.default_relation.as_deref(),
        &available_relations(config),
        DEFAULT_RELATION,
    )
}

/// Effective option sets, computed once per tool instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub targets: Vec<&'static str>,
    pub default_target: String,
    pub relations: Vec<&'static str>,
    pub default_relation: String,
    pub warnings: Vec<ConfigWarning>,
}

impl ResolvedOptions {
    pub fn resolve(config: &ToolConfig) -> Self {
        let target = user_default_target(config);
        let relation = user_default_relation(config);
        let warnings: Vec<ConfigWarning> = [target.warning, relation.warning]
            .into_iter()
            .flatten()
            .collect();
        for warning in &warnings {
            tracing::warn!(target: "config", "{}", warning);
        }

        Self {
            targets: available_targets(config),
            default_target: target.value,
            relations: available_relations(config),
            default_relation: relation.value,
            warnings,
        }
    }

    pub fn has_target(&self, target: &str) -> bool {
        self.targets.iter().any(|t| *t == target)
    }

    pub fn has_relation(&self, rel: &str) -> bool {
        self.relations.iter().any(|r| *r == rel)
    }

    /// `target` if it can be shown in the selector, else the default
    pub fn target_or_default(&self, target: Option<&str>) -> String {
        match target {
            Some(t) if self.has_target(t) => t.to_string(),
            _ => self.default_target.clone(),
        }
    }

    /// `rel` if it can be shown in the selector, else the default
    pub fn relation_or_default(&self, rel: Option<&str>) -> String {
        match rel {
            Some(r) if self.has_relation(r) => r.to_string(),
            _ => self.default_relation.clone(),
        }
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self::resolve(&ToolConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_sets_are_complete() {
        let config = ToolConfig::default();
        assert_eq!(available_targets(&config), SUPPORTED_TARGETS.to_vec());
        assert_eq!(available_relations(&config), SUPPORTED_RELATIONS.to_vec());
    }

    #[test]
    fn test_targets_keep_canonical_order() {
        let config = ToolConfig::default().with_targets(["_top", "_blank"]);
        assert_eq!(available_targets(&config), vec!["_blank", "_top"]);
    }

    #[test]
    fn test_unknown_tokens_are_dropped() {
        let config = ToolConfig::default().with_relations(["nofollow", "bogus"]);
        assert_eq!(available_relations(&config), vec!["nofollow"]);
    }

    #[test]
    fn test_default_target_outside_set_falls_back_with_warning() {
        let config = ToolConfig::default()
            .with_targets(["_blank"])
            .with_default_target("_parent");
        let resolved = user_default_target(&config);
        assert_eq!(resolved.value, "_self");
        assert_eq!(
            resolved.warning,
            Some(ConfigWarning {
                kind: OptionKind::Target,
                configured: "_parent".to_string(),
                fallback: "_self",
            })
        );
    }

    #[test]
    fn test_unset_default_is_silent() {
        let config = ToolConfig::default().with_targets(["_blank"]);
        let resolved = user_default_target(&config);
        assert_eq!(resolved.value, "_self");
        assert!(resolved.warning.is_none());
    }

    #[test]
    fn test_valid_default_relation_is_kept() {
        let config = ToolConfig::default().with_default_relation("nofollow");
        let resolved = user_default_relation(&config);
        assert_eq!(resolved.value, "nofollow");
        assert!(resolved.warning.is_none());
    }

    #[test]
    fn test_resolved_options_collect_warnings() {
        let config = ToolConfig::default()
            .with_default_target("_new")
            .with_relations(["nofollow"])
            .with_default_relation("author");
        let options = ResolvedOptions::resolve(&config);
        assert_eq!(options.default_target, "_self");
        assert_eq!(options.default_relation, "");
        assert_eq!(options.warnings.len(), 2);
        assert_eq!(
            options.warnings[1].to_string(),
            "defaultRelation \"author\" is not among the available values, falling back to \"\""
        );
    }

    #[test]
    fn test_or_default_helpers() {
        let options = ResolvedOptions::resolve(&ToolConfig::default().with_targets(["_blank"]));
        assert_eq!(options.target_or_default(Some("_blank")), "_blank");
        assert_eq!(options.target_or_default(Some("_top")), "_self");
        assert_eq!(options.relation_or_default(None), "");
        assert_eq!(options.relation_or_default(Some("nofollow")), "nofollow");
    }
}
