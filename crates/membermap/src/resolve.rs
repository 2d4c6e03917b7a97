// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name and path resolution rules.
//!
//! # Precedence
//!
//! Ignore (first match wins):
//! 1. unscoped ignore annotation on the source member
//! 2. ignore annotation scoped to a type the target is assignable to
//! 3. the pair configuration's ignore list
//!
//! Target name (first hit wins):
//! 1. unscoped bind annotation on the source member
//! 2. bind annotation scoped to a type the target is assignable to
//! 3. the pair configuration's binding for the source member (path leaf)
//! 4. a target member declaring it receives this source member
//! 5. the source member's own name
//!
//! Path entry (first hit wins):
//! 1. the source member's own binding, when its target leaf is the resolved
//!    name and either side spans several members
//! 2. a nested target path ending in the resolved name whose binding is not
//!    declared for another member of the source type

use crate::binding::{BindingConfig, FieldPath};
use crate::error::ResolutionError;
use crate::filter::{eligible_members, Side};
use crate::introspect::TypeIntrospector;
use crate::types::{MemberDescriptor, Scope, TypeName, TypePair};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Source member name -> target member name, declared from the target side.
pub type ReverseBindIndex = HashMap<String, String>;

/// Check if `scope` applies when the opposing shape is `opposing`.
pub fn scope_applies<I>(introspector: &I, scope: &Scope, opposing: &TypeName) -> bool
where
    I: TypeIntrospector + ?Sized,
{
    match scope {
        Scope::Unscoped => true,
        Scope::ScopedTo(ty) => introspector.is_assignable(opposing, ty),
    }
}

/// Collect bind annotations declared on target members.
///
/// Two target members claiming the same source member is a binding mistake.
pub fn build_reverse_bind_index<I>(
    introspector: &I,
    pair: &TypePair,
    targets: &[&MemberDescriptor],
) -> Result<ReverseBindIndex, ResolutionError>
where
    I: TypeIntrospector + ?Sized,
{
    let mut index = ReverseBindIndex::new();

    for target in targets {
        let binds = introspector
            .annotations(&pair.target, &target.name)
            .iter()
            .filter_map(|a| a.as_bind())
            .filter(|b| scope_applies(introspector, &b.scope, &pair.source));

        for bind in binds {
            match index.entry(bind.member.clone()) {
                Entry::Occupied(entry) if entry.get() != &target.name => {
                    return Err(ResolutionError::AmbiguousReverseBind {
                        type_name: pair.target.clone(),
                        source_name: bind.member.clone(),
                        first: entry.get().clone(),
                        second: target.name.clone(),
                    });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(target.name.clone());
                }
            }
        }
    }

    Ok(index)
}

/// Check if `source` must be left out of the mapping.
pub fn is_ignored<I>(
    introspector: &I,
    config: Option<&BindingConfig>,
    pair: &TypePair,
    source: &MemberDescriptor,
) -> bool
where
    I: TypeIntrospector + ?Sized,
{
    let ignores: Vec<_> = introspector
        .annotations(&pair.source, &source.name)
        .iter()
        .filter_map(|a| a.as_ignore())
        .collect();

    if ignores.iter().any(|i| i.scope.is_unscoped()) {
        return true;
    }

    if ignores
        .iter()
        .any(|i| scope_applies(introspector, &i.scope, &pair.target))
    {
        return true;
    }

    config.is_some_and(|c| c.ignore_source_field(&source.name))
}

/// Name of the target member `source` should be written to.
pub fn resolve_target_name<'a, I>(
    introspector: &'a I,
    config: Option<&'a BindingConfig>,
    pair: &TypePair,
    source: &'a MemberDescriptor,
    index: &'a ReverseBindIndex,
) -> &'a str
where
    I: TypeIntrospector + ?Sized,
{
    let binds: Vec<_> = introspector
        .annotations(&pair.source, &source.name)
        .iter()
        .filter_map(|a| a.as_bind())
        .collect();

    if let Some(bind) = binds.iter().copied().find(|b| b.scope.is_unscoped()) {
        return &bind.member;
    }

    if let Some(bind) = binds
        .iter()
        .copied()
        .find(|b| scope_applies(introspector, &b.scope, &pair.target))
    {
        return &bind.member;
    }

    if let Some(name) = config.and_then(|c| c.bind_field(&source.name)) {
        return name;
    }

    if let Some(name) = index.get(&source.name) {
        return name;
    }

    &source.name
}

/// Source and target paths of the path entry `source` maps through, if any.
pub fn select_binding_paths<'a>(
    config: &'a BindingConfig,
    source: &MemberDescriptor,
    target_name: &str,
    sources: &[&MemberDescriptor],
) -> Option<(FieldPath, &'a FieldPath)> {
    if let Some(own) = config
        .binding_for(&source.name)
        .filter(|b| b.target.leaf() == target_name)
    {
        return own.is_path().then(|| (own.source.clone(), &own.target));
    }

    let claimed = |head: &str| head != source.name && sources.iter().any(|s| s.name == head);
    let target = config
        .nested_target_bindings(target_name)
        .into_iter()
        .find(|b| !claimed(b.source.head()))
        .map(|b| &b.target)?;

    let source_path = config
        .bind_field_source_path(&source.name)
        .cloned()
        .unwrap_or_else(|| FieldPath::single(source.name.as_str()));
    Some((source_path, target))
}

/// Walk `path` from `root`, returning one descriptor per segment.
pub fn resolve_path<I>(
    introspector: &I,
    root: &TypeName,
    path: &FieldPath,
    side: Side,
) -> Result<Vec<MemberDescriptor>, ResolutionError>
where
    I: TypeIntrospector + ?Sized,
{
    if path.is_blank() {
        return Err(ResolutionError::EmptyPath(root.clone()));
    }

    let mut chain = Vec::with_capacity(path.segments().len());
    let mut current = root.clone();

    for segment in path.segments() {
        let member = eligible_members(introspector, &current, side)
            .into_iter()
            .find(|m| &m.name == segment)
            .ok_or_else(|| ResolutionError::UnknownMember {
                path: path.to_string(),
                segment: segment.clone(),
                type_name: current.clone(),
            })?;

        current = member.value_type.clone();
        chain.push(member.clone());
    }

    Ok(chain)
}

/// Resolve a path over readable members of the pair's source type.
pub fn resolve_source_path<I>(
    introspector: &I,
    pair: &TypePair,
    path: &FieldPath,
) -> Result<Vec<MemberDescriptor>, ResolutionError>
where
    I: TypeIntrospector + ?Sized,
{
    resolve_path(introspector, &pair.source, path, Side::Source)
}

/// Resolve a path over writable members of the pair's target type.
pub fn resolve_target_path<I>(
    introspector: &I,
    pair: &TypePair,
    path: &FieldPath,
) -> Result<Vec<MemberDescriptor>, ResolutionError>
where
    I: TypeIntrospector + ?Sized,
{
    resolve_path(introspector, &pair.target, path, Side::Target)
}
