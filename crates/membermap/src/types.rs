// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Core data model: type identities, member descriptors and member annotations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a shape (struct, class, record...) as seen by the resolver.
///
/// Equality is structural on the name; two descriptors with the same name
/// are the same type.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Create a type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered (source, target) pair of shapes.
///
/// This is the identity under which callers cache mapping plans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypePair {
    /// Shape data is read from.
    pub source: TypeName,

    /// Shape data is written to.
    pub target: TypeName,
}

impl TypePair {
    /// Create a new type pair.
    pub fn new(source: impl Into<TypeName>, target: impl Into<TypeName>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for TypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// How a member stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberKind {
    /// Plain storage slot, always readable and writable.
    Field,

    /// Accessor-backed member.
    Property {
        /// Exposes a getter.
        readable: bool,

        /// Number of arguments taken by the setter, `None` when there is no setter.
        /// Indexers expose setters taking more than one argument.
        setter_arity: Option<usize>,
    },
}

/// A named, typed member of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberDescriptor {
    /// Member name, unique within the declaring shape.
    pub name: String,

    /// Declared value type.
    pub value_type: TypeName,

    /// Storage kind and accessor capabilities.
    #[serde(flatten)]
    pub kind: MemberKind,
}

impl MemberDescriptor {
    /// Create a member with an explicit kind.
    pub fn new(name: impl Into<String>, value_type: impl Into<TypeName>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            kind,
        }
    }

    /// Field-like member.
    pub fn field(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        Self::new(name, value_type, MemberKind::Field)
    }

    /// Property with a getter and a single-value setter.
    pub fn property(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        Self::new(
            name,
            value_type,
            MemberKind::Property {
                readable: true,
                setter_arity: Some(1),
            },
        )
    }

    /// Property with a getter only.
    pub fn read_only(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        Self::new(
            name,
            value_type,
            MemberKind::Property {
                readable: true,
                setter_arity: None,
            },
        )
    }

    /// Property with a single-value setter only.
    pub fn write_only(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        Self::new(
            name,
            value_type,
            MemberKind::Property {
                readable: false,
                setter_arity: Some(1),
            },
        )
    }

    /// Indexed property: readable, setter takes the index plus the value.
    pub fn indexer(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        Self::new(
            name,
            value_type,
            MemberKind::Property {
                readable: true,
                setter_arity: Some(2),
            },
        )
    }

    /// Check if the member can act as a mapping source.
    pub fn is_readable(&self) -> bool {
        match self.kind {
            MemberKind::Field => true,
            MemberKind::Property { readable, .. } => readable,
        }
    }

    /// Check if the member can act as a mapping target.
    pub fn is_writable(&self) -> bool {
        match self.kind {
            MemberKind::Field => true,
            MemberKind::Property { setter_arity, .. } => setter_arity == Some(1),
        }
    }
}

/// Applicability of an annotation with respect to the opposing shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Applies whatever the opposing shape is.
    #[default]
    Unscoped,

    /// Applies only when the opposing shape is assignable to this type.
    ScopedTo(TypeName),
}

impl Scope {
    /// Build a scope from an optional scoping type.
    pub fn from_option(scope: Option<TypeName>) -> Self {
        match scope {
            Some(ty) => Self::ScopedTo(ty),
            None => Self::Unscoped,
        }
    }

    pub fn is_unscoped(&self) -> bool {
        matches!(self, Self::Unscoped)
    }
}

/// "This member corresponds to the counterpart member `member`".
///
/// On a source member it names the target member to write; on a target
/// member it names the source member to read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindAnnotation {
    /// Counterpart member name.
    pub member: String,

    /// Scoping of the annotation.
    pub scope: Scope,
}

/// "Never map this source member".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IgnoreAnnotation {
    pub scope: Scope,
}

/// Metadata attached to a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    Bind(BindAnnotation),
    Ignore(IgnoreAnnotation),
}

impl Annotation {
    /// Unscoped bind annotation.
    pub fn bind(member: impl Into<String>) -> Self {
        Self::Bind(BindAnnotation {
            member: member.into(),
            scope: Scope::Unscoped,
        })
    }

    /// Bind annotation scoped to `scope`.
    pub fn bind_scoped(member: impl Into<String>, scope: impl Into<TypeName>) -> Self {
        Self::Bind(BindAnnotation {
            member: member.into(),
            scope: Scope::ScopedTo(scope.into()),
        })
    }

    /// Unscoped ignore annotation.
    pub fn ignore() -> Self {
        Self::Ignore(IgnoreAnnotation::default())
    }

    /// Ignore annotation scoped to `scope`.
    pub fn ignore_scoped(scope: impl Into<TypeName>) -> Self {
        Self::Ignore(IgnoreAnnotation {
            scope: Scope::ScopedTo(scope.into()),
        })
    }

    pub fn as_bind(&self) -> Option<&BindAnnotation> {
        match self {
            Self::Bind(bind) => Some(bind),
            Self::Ignore(_) => None,
        }
    }

    pub fn as_ignore(&self) -> Option<&IgnoreAnnotation> {
        match self {
            Self::Ignore(ignore) => Some(ignore),
            Self::Bind(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_capabilities() {
        let field = MemberDescriptor::field("Id", "int");
        assert!(field.is_readable());
        assert!(field.is_writable());

        let prop = MemberDescriptor::property("Name", "string");
        assert!(prop.is_readable());
        assert!(prop.is_writable());

        let getter = MemberDescriptor::read_only("Total", "decimal");
        assert!(getter.is_readable());
        assert!(!getter.is_writable());

        let setter = MemberDescriptor::write_only("Secret", "string");
        assert!(!setter.is_readable());
        assert!(setter.is_writable());

        let indexer = MemberDescriptor::indexer("Item", "string");
        assert!(indexer.is_readable());
        assert!(!indexer.is_writable());
    }

    #[test]
    fn test_type_pair_display() {
        let pair = TypePair::new("User", "UserDto");
        assert_eq!(pair.to_string(), "User -> UserDto");
        assert_eq!(pair, TypePair::new("User", "UserDto"));
        assert_ne!(pair, TypePair::new("UserDto", "User"));
    }

    #[test]
    fn test_scope_from_option() {
        assert_eq!(Scope::from_option(None), Scope::Unscoped);
        assert_eq!(
            Scope::from_option(Some("Dto".into())),
            Scope::ScopedTo(TypeName::new("Dto"))
        );
        assert!(Scope::default().is_unscoped());
    }

    #[test]
    fn test_annotation_accessors() {
        let bind = Annotation::bind_scoped("Username", "UserDto");
        assert_eq!(bind.as_bind().map(|b| b.member.as_str()), Some("Username"));
        assert!(bind.as_ignore().is_none());

        let ignore = Annotation::ignore();
        assert!(ignore.as_bind().is_none());
        assert_eq!(ignore.as_ignore().map(|i| i.scope.is_unscoped()), Some(true));
    }

    #[test]
    fn test_member_serialization() {
        let member = MemberDescriptor::read_only("Total", "decimal");
        let json = serde_json::to_value(&member).expect("serialize");
        assert_eq!(json["name"], "Total");
        assert_eq!(json["value_type"], "decimal");
        assert_eq!(json["kind"], "property");
        assert_eq!(json["readable"], true);
        assert!(json["setter_arity"].is_null());
    }
}
