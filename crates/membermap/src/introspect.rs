// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type introspection.
//!
//! The resolver never inspects types itself; it asks a [`TypeIntrospector`]
//! for a shape's members, for the annotations attached to a member, and for
//! assignability between two shapes. [`ShapeRegistry`] is an implementation
//! backed by explicitly registered metadata tables.

use crate::types::{Annotation, MemberDescriptor, TypeName};
use std::collections::HashMap;

/// Source of structural metadata about shapes.
pub trait TypeIntrospector {
    /// Public instance members of `ty`, in enumeration order.
    ///
    /// Unknown types (including primitives) have no members.
    fn members(&self, ty: &TypeName) -> &[MemberDescriptor];

    /// Annotations attached to member `member` of `owner`.
    fn annotations(&self, owner: &TypeName, member: &str) -> &[Annotation];

    /// Check if a value of type `from` can be stored in a slot of type `to`.
    fn is_assignable(&self, from: &TypeName, to: &TypeName) -> bool {
        from == to
    }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for &T {
    fn members(&self, ty: &TypeName) -> &[MemberDescriptor] {
        (**self).members(ty)
    }

    fn annotations(&self, owner: &TypeName, member: &str) -> &[Annotation] {
        (**self).annotations(owner, member)
    }

    fn is_assignable(&self, from: &TypeName, to: &TypeName) -> bool {
        (**self).is_assignable(from, to)
    }
}

/// Registered description of one shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeDescriptor {
    /// Shape identity.
    pub name: TypeName,

    /// Direct base shape, if any.
    pub base: Option<TypeName>,

    /// Full public surface (inherited members included), in declaration order.
    pub members: Vec<MemberDescriptor>,

    annotations: HashMap<String, Vec<Annotation>>,
}

impl ShapeDescriptor {
    /// Create an empty shape.
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the direct base shape.
    pub fn base(mut self, base: impl Into<TypeName>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Append a member.
    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Attach an annotation to the member named `member`.
    pub fn annotate(mut self, member: impl Into<String>, annotation: Annotation) -> Self {
        self.add_annotation(member, annotation);
        self
    }

    /// Attach an annotation to the member named `member`.
    pub fn add_annotation(&mut self, member: impl Into<String>, annotation: Annotation) {
        self.annotations
            .entry(member.into())
            .or_default()
            .push(annotation);
    }

    /// Get member by name.
    pub fn get_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Annotations of a member (empty when none were attached).
    pub fn annotations_of(&self, member: &str) -> &[Annotation] {
        self.annotations
            .get(member)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// In-memory metadata table keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    shapes: HashMap<TypeName, ShapeDescriptor>,
}

impl ShapeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape, returning the one it replaces.
    pub fn register(&mut self, shape: ShapeDescriptor) -> Option<ShapeDescriptor> {
        self.shapes.insert(shape.name.clone(), shape)
    }

    /// Register a shape (builder style).
    pub fn with_shape(mut self, shape: ShapeDescriptor) -> Self {
        self.register(shape);
        self
    }

    /// Get a registered shape.
    pub fn shape(&self, name: &TypeName) -> Option<&ShapeDescriptor> {
        self.shapes.get(name)
    }

    /// Check if a shape is registered.
    pub fn contains(&self, name: &TypeName) -> bool {
        self.shapes.contains_key(name)
    }

    /// Number of registered shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate over registered shapes (unordered).
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeDescriptor> {
        self.shapes.values()
    }
}

impl TypeIntrospector for ShapeRegistry {
    fn members(&self, ty: &TypeName) -> &[MemberDescriptor] {
        self.shapes
            .get(ty)
            .map(|s| s.members.as_slice())
            .unwrap_or_default()
    }

    fn annotations(&self, owner: &TypeName, member: &str) -> &[Annotation] {
        self.shapes
            .get(owner)
            .map(|s| s.annotations_of(member))
            .unwrap_or_default()
    }

    fn is_assignable(&self, from: &TypeName, to: &TypeName) -> bool {
        let mut current = Some(from);
        // A well-formed chain visits each shape at most once.
        let mut remaining = self.shapes.len() + 1;

        while let Some(ty) = current {
            if ty == to {
                return true;
            }
            if remaining == 0 {
                return false;
            }
            remaining -= 1;
            current = self.shapes.get(ty).and_then(|s| s.base.as_ref());
        }

        false
    }
}
