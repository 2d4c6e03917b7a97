// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping document configuration.
//!
//! A mapping document describes shapes (members and annotations) and per-pair
//! binding overrides in TOML. It is turned into a [`ShapeRegistry`] and a
//! [`MapperConfig`] for the builder.

use crate::binding::{BindingConfig, FieldBinding, MapperConfig, NameMatching};
use crate::introspect::{ShapeDescriptor, ShapeRegistry};
use crate::types::{Annotation, MemberDescriptor, MemberKind, TypeName, TypePair};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Root of a mapping document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingDocument {
    /// Name-matching policy applied to every pair.
    #[serde(default)]
    pub name_matching: NameMatchingConfig,

    /// Declared shapes.
    #[serde(default)]
    pub shapes: Vec<ShapeConfig>,

    /// Declared pair overrides.
    #[serde(default)]
    pub pairs: Vec<PairConfig>,
}

/// Name-matching policy as written in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatchingConfig {
    #[default]
    Exact,
    IgnoreCase,
    IgnoreCaseAndSeparators,
}

impl From<NameMatchingConfig> for NameMatching {
    fn from(config: NameMatchingConfig) -> Self {
        match config {
            NameMatchingConfig::Exact => Self::Exact,
            NameMatchingConfig::IgnoreCase => Self::IgnoreCase,
            NameMatchingConfig::IgnoreCaseAndSeparators => Self::IgnoreCaseAndSeparators,
        }
    }
}

/// Shape declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Type name.
    pub name: String,

    /// Direct base type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Public members, inherited ones included.
    #[serde(default)]
    pub members: Vec<MemberConfig>,
}

/// Member storage kind as written in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKindConfig {
    #[default]
    Property,
    Field,
}

/// Member declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberConfig {
    /// Member name.
    pub name: String,

    /// Declared value type.
    #[serde(rename = "type")]
    pub value_type: String,

    /// Storage kind.
    #[serde(default)]
    pub kind: MemberKindConfig,

    /// Property exposes a getter.
    #[serde(default = "default_true")]
    pub readable: bool,

    /// Property exposes a setter.
    #[serde(default = "default_true")]
    pub writable: bool,

    /// Setter argument count (indexers take more than one).
    #[serde(default = "default_setter_arity")]
    pub setter_arity: usize,

    /// Attached annotations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationConfig>,
}

fn default_true() -> bool {
    true
}

fn default_setter_arity() -> usize {
    1
}

impl MemberConfig {
    /// Read/write property.
    pub fn property(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            kind: MemberKindConfig::Property,
            readable: true,
            writable: true,
            setter_arity: 1,
            annotations: Vec::new(),
        }
    }

    /// Attach an annotation.
    pub fn annotate(mut self, annotation: AnnotationConfig) -> Self {
        self.annotations.push(annotation);
        self
    }

    fn to_descriptor(&self) -> MemberDescriptor {
        let kind = match self.kind {
            MemberKindConfig::Field => MemberKind::Field,
            MemberKindConfig::Property => MemberKind::Property {
                readable: self.readable,
                setter_arity: self.writable.then_some(self.setter_arity),
            },
        };
        MemberDescriptor::new(self.name.as_str(), self.value_type.as_str(), kind)
    }
}

/// Annotation declaration: exactly one of `bind` or `ignore`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// Counterpart member name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    /// Ignore the member.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignore: bool,

    /// Opposing type the annotation is restricted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl AnnotationConfig {
    fn to_annotation(&self) -> Result<Annotation, String> {
        match (&self.bind, self.ignore, &self.scope) {
            (Some(_), true, _) => Err("annotation declares both bind and ignore".into()),
            (None, false, _) => Err("annotation declares neither bind nor ignore".into()),
            (Some(member), false, None) => Ok(Annotation::bind(member.as_str())),
            (Some(member), false, Some(scope)) => {
                Ok(Annotation::bind_scoped(member.as_str(), scope.as_str()))
            }
            (None, true, None) => Ok(Annotation::ignore()),
            (None, true, Some(scope)) => Ok(Annotation::ignore_scoped(scope.as_str())),
        }
    }
}

/// Binding overrides for one pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    /// Source type name.
    pub source: String,

    /// Target type name.
    pub target: String,

    /// Ignored source members.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// Explicit bindings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingEntry>,

    /// Target type substitutions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeOverride>,
}

impl PairConfig {
    /// Type pair this entry configures.
    pub fn pair(&self) -> TypePair {
        TypePair::new(self.source.as_str(), self.target.as_str())
    }

    fn to_binding_config(&self) -> BindingConfig {
        let mut config = BindingConfig::new();
        for name in &self.ignore {
            config = config.ignore(name.as_str());
        }
        for binding in &self.bindings {
            config.add_binding(FieldBinding::new(&binding.source, &binding.target));
        }
        for ty in &self.types {
            config = config.bind_type(ty.target.as_str(), ty.ty.as_str());
        }
        config
    }
}

/// `source` path bound to `target` path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingEntry {
    pub source: String,
    pub target: String,
}

/// Values written to target member `target` are mapped through type `ty`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeOverride {
    pub target: String,

    #[serde(rename = "type")]
    pub ty: String,
}

impl MappingDocument {
    /// Load and validate a document from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a document from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let document: Self = toml::from_str(content)?;
        document.validate()?;
        Ok(document)
    }

    /// Render the document as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the document.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();

        for shape in &self.shapes {
            if shape.name.is_empty() {
                return Err(ConfigError::Invalid("Shape with empty name".into()));
            }
            if !names.insert(shape.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "Shape '{}' declared twice",
                    shape.name
                )));
            }

            let mut members = HashSet::new();
            for member in &shape.members {
                if member.name.is_empty() || member.value_type.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "Shape '{}' has a member with empty name or type",
                        shape.name
                    )));
                }
                if !members.insert(member.name.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "Shape '{}' declares member '{}' twice",
                        shape.name, member.name
                    )));
                }
                for annotation in &member.annotations {
                    annotation.to_annotation().map_err(|e| {
                        ConfigError::Invalid(format!("{}.{}: {}", shape.name, member.name, e))
                    })?;
                }
            }
        }

        let mut pairs = HashSet::new();
        for entry in &self.pairs {
            if entry.source.is_empty() || entry.target.is_empty() {
                return Err(ConfigError::Invalid("Pair with empty type name".into()));
            }
            let pair = entry.pair();
            if !pairs.insert(pair.clone()) {
                return Err(ConfigError::Invalid(format!(
                    "Pair {} declared twice",
                    pair
                )));
            }
            entry
                .to_binding_config()
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("Pair {}: {}", pair, e)))?;
        }

        Ok(())
    }

    /// Type pairs with declared overrides, in document order.
    pub fn pairs(&self) -> Vec<TypePair> {
        self.pairs.iter().map(PairConfig::pair).collect()
    }

    /// Build the introspection table and binding provider.
    pub fn to_parts(&self) -> Result<(ShapeRegistry, MapperConfig), ConfigError> {
        self.validate()?;

        let mut registry = ShapeRegistry::new();
        for shape in &self.shapes {
            let mut descriptor = ShapeDescriptor::new(shape.name.as_str());
            descriptor.base = shape.base.as_deref().map(TypeName::from);

            for member in &shape.members {
                descriptor.members.push(member.to_descriptor());
                for annotation in &member.annotations {
                    let annotation = annotation.to_annotation().map_err(ConfigError::Invalid)?;
                    descriptor.add_annotation(member.name.as_str(), annotation);
                }
            }

            registry.register(descriptor);
        }

        let mut mapper = MapperConfig::new().name_matching(self.name_matching.into());
        for entry in &self.pairs {
            mapper.insert(entry.pair(), entry.to_binding_config());
        }

        Ok((registry, mapper))
    }

    /// Example document used by `gen-config`.
    pub fn example() -> Self {
        Self {
            name_matching: NameMatchingConfig::Exact,
            shapes: vec![
                ShapeConfig {
                    name: "User".into(),
                    base: None,
                    members: vec![
                        MemberConfig::property("Name", "string"),
                        MemberConfig::property("Login", "string").annotate(AnnotationConfig {
                            bind: Some("Username".into()),
                            ..Default::default()
                        }),
                        MemberConfig::property("Password", "string"),
                        MemberConfig::property("Addr", "Address"),
                    ],
                },
                ShapeConfig {
                    name: "Address".into(),
                    base: None,
                    members: vec![MemberConfig::property("City", "string")],
                },
                ShapeConfig {
                    name: "UserDto".into(),
                    base: None,
                    members: vec![
                        MemberConfig::property("Name", "string"),
                        MemberConfig::property("Username", "string"),
                        MemberConfig::property("Password", "string"),
                        MemberConfig::property("Location", "Location"),
                    ],
                },
                ShapeConfig {
                    name: "Location".into(),
                    base: None,
                    members: vec![MemberConfig::property("City", "string")],
                },
            ],
            pairs: vec![PairConfig {
                source: "User".into(),
                target: "UserDto".into(),
                ignore: vec!["Password".into()],
                bindings: vec![BindingEntry {
                    source: "Addr.City".into(),
                    target: "Location.City".into(),
                }],
                types: Vec::new(),
            }],
        }
    }
}
