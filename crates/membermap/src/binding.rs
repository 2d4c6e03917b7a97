// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-pair binding configuration.
//!
//! A [`BindingConfig`] overrides the structural convention for one type pair:
//! ignored source members, explicit (possibly nested) field bindings and
//! target type substitutions. A [`BindingProvider`] hands out the
//! configuration of a pair together with the name-matching policy.

use crate::config::ConfigError;
use crate::types::{TypeName, TypePair};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Separator between segments of a member path.
pub const PATH_SEPARATOR: char = '.';

/// Dotted chain of member names, e.g. `Address.City`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path. Empty segments are kept so validation can report them.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split(PATH_SEPARATOR).map(str::to_string).collect(),
        }
    }

    /// Single-segment path.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment (member of the root type).
    pub fn head(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }

    /// Last segment (member receiving or providing the value).
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// More than one segment.
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// True when no segment carries a name.
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|s| s.is_empty())
    }

    /// True when the path is blank or has an empty segment.
    pub fn has_empty_segment(&self) -> bool {
        self.segments.is_empty() || self.segments.iter().any(|s| s.is_empty())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Explicit source path to target path binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub source: FieldPath,
    pub target: FieldPath,
}

impl FieldBinding {
    /// Create a binding from two dotted paths.
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: FieldPath::parse(source),
            target: FieldPath::parse(target),
        }
    }

    /// True when either side spans more than one member.
    pub fn is_path(&self) -> bool {
        self.source.is_nested() || self.target.is_nested()
    }
}

/// Overrides for one type pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingConfig {
    ignored: BTreeSet<String>,
    bindings: Vec<FieldBinding>,
    types: HashMap<String, TypeName>,
}

impl BindingConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Never map source member `name`.
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignored.insert(name.into());
        self
    }

    /// Bind source path `source` to target path `target`.
    ///
    /// Bindings are keyed by the head of the source path. Declaring two
    /// bindings for the same source member is rejected by [`Self::validate`].
    pub fn bind(mut self, source: &str, target: &str) -> Self {
        self.add_binding(FieldBinding::new(source, target));
        self
    }

    /// Map the value written to target member `target` through `ty`.
    pub fn bind_type(mut self, target: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        self.types.insert(target.into(), ty.into());
        self
    }

    /// Add a binding.
    pub fn add_binding(&mut self, binding: FieldBinding) {
        self.bindings.push(binding);
    }

    /// Check if source member `name` is ignored.
    pub fn ignore_source_field(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    /// Target member name declared for source member `source_name`.
    ///
    /// For a nested target path this is the path leaf.
    pub fn bind_field(&self, source_name: &str) -> Option<&str> {
        self.binding_for(source_name).map(|b| b.target.leaf())
    }

    /// Source path declared for source member `source_name`.
    pub fn bind_field_source_path(&self, source_name: &str) -> Option<&FieldPath> {
        self.binding_for(source_name).map(|b| &b.source)
    }

    /// Nested target path whose leaf is `target_name`, first declared wins.
    pub fn bind_field_target_path(&self, target_name: &str) -> Option<&FieldPath> {
        self.nested_target_bindings(target_name)
            .first()
            .map(|b| &b.target)
    }

    /// Bindings with a nested target path ending in `target_name`, in declaration order.
    pub fn nested_target_bindings(&self, target_name: &str) -> Vec<&FieldBinding> {
        self.bindings
            .iter()
            .filter(|b| b.target.is_nested() && b.target.leaf() == target_name)
            .collect()
    }

    /// Binding declared for source member `source_name`.
    pub fn binding_for(&self, source_name: &str) -> Option<&FieldBinding> {
        self.bindings.iter().find(|b| b.source.head() == source_name)
    }

    /// Substituted type for target member `target_name`.
    pub fn bind_type_for(&self, target_name: &str) -> Option<&TypeName> {
        self.types.get(target_name)
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }

    /// Check names and paths for obvious mistakes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ignored.iter().any(|name| name.is_empty()) {
            return Err(ConfigError::Invalid("empty ignored member name".into()));
        }

        for (i, binding) in self.bindings.iter().enumerate() {
            if let Some(earlier) = self.bindings[..i]
                .iter()
                .find(|b| b.source.head() == binding.source.head())
            {
                return Err(ConfigError::Invalid(format!(
                    "bindings '{}' and '{}' both start at source member '{}'",
                    earlier.source,
                    binding.source,
                    binding.source.head()
                )));
            }
            if binding.source.has_empty_segment() {
                return Err(ConfigError::Invalid(format!(
                    "binding '{}' -> '{}' has an empty source segment",
                    binding.source, binding.target
                )));
            }
            if binding.target.has_empty_segment() {
                return Err(ConfigError::Invalid(format!(
                    "binding '{}' -> '{}' has an empty target segment",
                    binding.source, binding.target
                )));
            }
        }

        for (target, ty) in &self.types {
            if target.is_empty() || ty.as_str().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "type override '{}' -> '{}' is incomplete",
                    target, ty
                )));
            }
        }

        Ok(())
    }
}

/// Policy deciding whether a resolved target name designates a target member.
#[derive(Clone, Default)]
pub enum NameMatching {
    /// Ordinal string equality.
    #[default]
    Exact,

    /// Case-insensitive equality.
    IgnoreCase,

    /// Case-insensitive equality ignoring `_` and `-`.
    IgnoreCaseAndSeparators,

    /// User supplied predicate `(resolved name, member name)`.
    Custom(Arc<dyn Fn(&str, &str) -> bool + Send + Sync>),
}

impl NameMatching {
    /// Wrap a predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Apply the policy.
    pub fn matches(&self, candidate: &str, member: &str) -> bool {
        match self {
            Self::Exact => candidate == member,
            Self::IgnoreCase => candidate.eq_ignore_ascii_case(member),
            Self::IgnoreCaseAndSeparators => {
                let strip = |s: &str| -> String {
                    s.chars()
                        .filter(|c| *c != '_' && *c != '-')
                        .flat_map(char::to_lowercase)
                        .collect()
                };
                strip(candidate) == strip(member)
            }
            Self::Custom(predicate) => predicate(candidate, member),
        }
    }
}

impl fmt::Debug for NameMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("Exact"),
            Self::IgnoreCase => f.write_str("IgnoreCase"),
            Self::IgnoreCaseAndSeparators => f.write_str("IgnoreCaseAndSeparators"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl FromStr for NameMatching {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "ignore_case" => Ok(Self::IgnoreCase),
            "ignore_case_and_separators" => Ok(Self::IgnoreCaseAndSeparators),
            other => Err(ConfigError::Invalid(format!(
                "unknown name matching policy '{}'",
                other
            ))),
        }
    }
}

/// Source of per-pair configuration and of the name-matching predicate.
pub trait BindingProvider {
    /// Configuration of `pair`, if any was declared.
    fn config_for(&self, pair: &TypePair) -> Option<&BindingConfig>;

    /// Check if `member` is designated by the resolved target name `candidate`.
    fn name_matches(&self, candidate: &str, member: &str) -> bool {
        candidate == member
    }
}

impl<T: BindingProvider + ?Sized> BindingProvider for &T {
    fn config_for(&self, pair: &TypePair) -> Option<&BindingConfig> {
        (**self).config_for(pair)
    }

    fn name_matches(&self, candidate: &str, member: &str) -> bool {
        (**self).name_matches(candidate, member)
    }
}

/// Default [`BindingProvider`]: a table of pair configurations plus one policy.
#[derive(Debug, Clone, Default)]
pub struct MapperConfig {
    pairs: HashMap<TypePair, BindingConfig>,
    name_matching: NameMatching,
}

impl MapperConfig {
    /// Create an empty configuration with exact name matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the configuration of a pair (builder style).
    pub fn bind(mut self, pair: TypePair, config: BindingConfig) -> Self {
        self.insert(pair, config);
        self
    }

    /// Set the name-matching policy (builder style).
    pub fn name_matching(mut self, policy: NameMatching) -> Self {
        self.name_matching = policy;
        self
    }

    /// Declare the configuration of a pair, returning the one it replaces.
    pub fn insert(&mut self, pair: TypePair, config: BindingConfig) -> Option<BindingConfig> {
        self.pairs.insert(pair, config)
    }

    pub fn set_name_matching(&mut self, policy: NameMatching) {
        self.name_matching = policy;
    }

    /// Declared pairs (unordered).
    pub fn pairs(&self) -> impl Iterator<Item = &TypePair> {
        self.pairs.keys()
    }

    /// Validate every pair configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (pair, config) in &self.pairs {
            config
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("pair {}: {}", pair, e)))?;
        }
        Ok(())
    }
}

impl BindingProvider for MapperConfig {
    fn config_for(&self, pair: &TypePair) -> Option<&BindingConfig> {
        self.pairs.get(pair)
    }

    fn name_matches(&self, candidate: &str, member: &str) -> bool {
        self.name_matching.matches(candidate, member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_parse() {
        let path = FieldPath::parse("Address.City");
        assert_eq!(path.segments(), &["Address".to_string(), "City".to_string()]);
        assert_eq!(path.head(), "Address");
        assert_eq!(path.leaf(), "City");
        assert!(path.is_nested());
        assert_eq!(path.to_string(), "Address.City");

        let single = FieldPath::parse("Name");
        assert!(!single.is_nested());
        assert_eq!(single.head(), single.leaf());
        assert_eq!(single, FieldPath::single("Name"));
    }

    #[test]
    fn test_field_path_empty_segments() {
        assert!(FieldPath::parse("").has_empty_segment());
        assert!(FieldPath::parse("").is_blank());
        assert!(!FieldPath::parse("A..B").is_blank());
        assert!(FieldPath::parse("A..B").has_empty_segment());
        assert!(FieldPath::parse(".A").has_empty_segment());
        assert!(!FieldPath::parse("A.B").has_empty_segment());
    }

    #[test]
    fn test_binding_lookups() {
        let config = BindingConfig::new()
            .bind("Login", "Username")
            .bind("Addr.City", "Location.City");

        assert_eq!(config.bind_field("Login"), Some("Username"));
        assert_eq!(config.bind_field("Addr"), Some("City"));
        assert_eq!(config.bind_field("City"), None);

        assert_eq!(
            config.bind_field_source_path("Addr").map(ToString::to_string),
            Some("Addr.City".into())
        );
        assert_eq!(
            config.bind_field_target_path("City").map(ToString::to_string),
            Some("Location.City".into())
        );
        // Single-segment bindings are renames, never paths.
        assert_eq!(config.bind_field_target_path("Username"), None);
    }

    #[test]
    fn test_binding_same_source_is_rejected() {
        let config = BindingConfig::new()
            .bind("Addr.City", "Location.City")
            .bind("Addr.Zip", "Location.Zip");

        assert_eq!(config.bindings().len(), 2);
        assert_eq!(config.bind_field("Addr"), Some("City"));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'Addr.City' and 'Addr.Zip'"));
    }

    #[test]
    fn test_path_binding_detection() {
        assert!(FieldBinding::new("Addr.City", "City").is_path());
        assert!(FieldBinding::new("City", "Location.City").is_path());
        assert!(!FieldBinding::new("Login", "Username").is_path());

        let config = BindingConfig::new()
            .bind("A", "X.Name")
            .bind("B", "Y.Name")
            .bind("Addr.City", "City");
        let targets: Vec<_> = config
            .nested_target_bindings("Name")
            .iter()
            .map(|b| b.target.to_string())
            .collect();
        assert_eq!(targets, vec!["X.Name", "Y.Name"]);
        assert!(config.nested_target_bindings("City").is_empty());
        assert_eq!(
            config.binding_for("B").map(|b| b.target.to_string()),
            Some("Y.Name".into())
        );
    }

    #[test]
    fn test_ignore_and_type_override() {
        let config = BindingConfig::new()
            .ignore("Password")
            .bind_type("Shape", "Circle");

        assert!(config.ignore_source_field("Password"));
        assert!(!config.ignore_source_field("Name"));
        assert_eq!(config.bind_type_for("Shape"), Some(&TypeName::new("Circle")));
        assert_eq!(config.bind_type_for("Name"), None);
        assert_eq!(config.ignored().collect::<Vec<_>>(), vec!["Password"]);
    }

    #[test]
    fn test_binding_config_validation() {
        assert!(BindingConfig::new().bind("A.B", "C").validate().is_ok());
        assert!(BindingConfig::new().bind("A.", "C").validate().is_err());
        assert!(BindingConfig::new().bind("A", "").validate().is_err());
        assert!(BindingConfig::new().ignore("").validate().is_err());
        assert!(BindingConfig::new().bind_type("X", "").validate().is_err());
    }

    #[test]
    fn test_name_matching_policies() {
        assert!(NameMatching::Exact.matches("Name", "Name"));
        assert!(!NameMatching::Exact.matches("name", "Name"));

        assert!(NameMatching::IgnoreCase.matches("name", "NAME"));
        assert!(!NameMatching::IgnoreCase.matches("first_name", "FirstName"));

        assert!(NameMatching::IgnoreCaseAndSeparators.matches("first_name", "FirstName"));
        assert!(NameMatching::IgnoreCaseAndSeparators.matches("zip-code", "ZipCode"));
        assert!(!NameMatching::IgnoreCaseAndSeparators.matches("zip", "ZipCode"));

        let prefixed = NameMatching::custom(|candidate, member| {
            member.strip_prefix("m_") == Some(candidate)
        });
        assert!(prefixed.matches("Name", "m_Name"));
        assert!(!prefixed.matches("Name", "Name"));
    }

    #[test]
    fn test_name_matching_from_str() {
        assert!(matches!("exact".parse::<NameMatching>(), Ok(NameMatching::Exact)));
        assert!(matches!(
            "ignore_case".parse::<NameMatching>(),
            Ok(NameMatching::IgnoreCase)
        ));
        assert!("fuzzy".parse::<NameMatching>().is_err());
    }

    #[test]
    fn test_mapper_config_provider() {
        let pair = TypePair::new("User", "UserDto");
        let config = MapperConfig::new()
            .bind(pair.clone(), BindingConfig::new().ignore("Password"))
            .name_matching(NameMatching::IgnoreCase);

        assert!(config.config_for(&pair).is_some());
        assert!(config.config_for(&TypePair::new("UserDto", "User")).is_none());
        assert!(config.name_matches("id", "Id"));
        assert_eq!(config.pairs().count(), 1);
        assert!(config.validate().is_ok());
    }
}
