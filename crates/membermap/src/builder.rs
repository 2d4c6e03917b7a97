// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping plan construction.
//!
//! [`MappingMemberBuilder::build`] turns a [`TypePair`] into the ordered list
//! of member correspondences a copier needs. The builder holds no state of its
//! own: the same pair, annotations and configuration always give the same plan.

use crate::binding::BindingProvider;
use crate::error::ResolutionError;
use crate::filter::{source_members, target_members};
use crate::introspect::TypeIntrospector;
use crate::resolve::{
    build_reverse_bind_index, is_ignored, resolve_source_path, resolve_target_name,
    resolve_target_path, select_binding_paths,
};
use crate::types::{MemberDescriptor, TypePair};
use serde::Serialize;
use std::fmt;

/// One source-to-target correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingMemberPath {
    /// Direct member to member copy.
    Simple {
        source: MemberDescriptor,
        target: MemberDescriptor,

        /// Pair the value must be mapped through instead of the members' declared types.
        #[serde(skip_serializing_if = "Option::is_none")]
        substitution: Option<TypePair>,
    },

    /// Copy between nested members, each chain running from the root type to the leaf.
    Path {
        source: Vec<MemberDescriptor>,
        target: Vec<MemberDescriptor>,
    },
}

impl MappingMemberPath {
    /// Plain direct pair.
    pub fn simple(source: MemberDescriptor, target: MemberDescriptor) -> Self {
        Self::Simple {
            source,
            target,
            substitution: None,
        }
    }

    /// Direct pair whose value goes through `substitution`.
    pub fn substituted(
        source: MemberDescriptor,
        target: MemberDescriptor,
        substitution: TypePair,
    ) -> Self {
        Self::Simple {
            source,
            target,
            substitution: Some(substitution),
        }
    }

    /// Nested pair.
    pub fn path(source: Vec<MemberDescriptor>, target: Vec<MemberDescriptor>) -> Self {
        Self::Path { source, target }
    }

    pub fn is_path(&self) -> bool {
        matches!(self, Self::Path { .. })
    }

    /// Member of the source root type the entry reads from.
    pub fn source_head(&self) -> Option<&MemberDescriptor> {
        match self {
            Self::Simple { source, .. } => Some(source),
            Self::Path { source, .. } => source.first(),
        }
    }

    /// Member finally written on the target side.
    pub fn target_leaf(&self) -> Option<&MemberDescriptor> {
        match self {
            Self::Simple { target, .. } => Some(target),
            Self::Path { target, .. } => target.last(),
        }
    }

    pub fn substitution(&self) -> Option<&TypePair> {
        match self {
            Self::Simple { substitution, .. } => substitution.as_ref(),
            Self::Path { .. } => None,
        }
    }
}

fn join_names(chain: &[MemberDescriptor]) -> String {
    chain
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for MappingMemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple {
                source,
                target,
                substitution: None,
            } => write!(f, "{} -> {}", source.name, target.name),
            Self::Simple {
                source,
                target,
                substitution: Some(pair),
            } => write!(f, "{} -> {} via ({})", source.name, target.name, pair),
            Self::Path { source, target } => {
                write!(f, "{} -> {}", join_names(source), join_names(target))
            }
        }
    }
}

/// Resolves mapping plans against an introspector and a binding provider.
pub struct MappingMemberBuilder<'a, I: ?Sized, P: ?Sized> {
    introspector: &'a I,
    bindings: &'a P,
}

impl<'a, I, P> MappingMemberBuilder<'a, I, P>
where
    I: TypeIntrospector + ?Sized,
    P: BindingProvider + ?Sized,
{
    /// Create a builder over the two collaborators.
    pub fn new(introspector: &'a I, bindings: &'a P) -> Self {
        Self {
            introspector,
            bindings,
        }
    }

    /// Compute the mapping plan of `pair`.
    ///
    /// Entries follow source member enumeration order; each source member
    /// yields at most one entry. Members without a counterpart are skipped.
    /// An explicit path that does not resolve aborts the whole pair.
    pub fn build(&self, pair: &TypePair) -> Result<Vec<MappingMemberPath>, ResolutionError> {
        let introspector = self.introspector;
        let sources = source_members(introspector, &pair.source);
        let targets = target_members(introspector, &pair.target);
        let index = build_reverse_bind_index(introspector, pair, &targets)?;
        let config = self.bindings.config_for(pair);

        let mut plan = Vec::with_capacity(sources.len());

        for source in sources.iter().copied() {
            if is_ignored(introspector, config, pair, source) {
                continue;
            }

            let target_name = resolve_target_name(introspector, config, pair, source, &index);

            let paths =
                config.and_then(|c| select_binding_paths(c, source, target_name, &sources));
            if let Some((source_path, target_path)) = paths {
                let entry = MappingMemberPath::path(
                    resolve_source_path(introspector, pair, &source_path)?,
                    resolve_target_path(introspector, pair, target_path)?,
                );
                tracing::trace!("{}: path entry {}", pair, entry);
                plan.push(entry);
                continue;
            }

            let Some(target) = targets
                .iter()
                .find(|t| self.bindings.name_matches(target_name, &t.name))
            else {
                continue;
            };

            let substituted = config.and_then(|c| c.bind_type_for(target_name));
            let entry = match substituted {
                Some(ty) => {
                    let via = TypePair::new(source.value_type.clone(), ty.clone());
                    tracing::trace!("{}: {} mapped through {}", pair, source.name, via);
                    MappingMemberPath::substituted(source.clone(), (*target).clone(), via)
                }
                None => MappingMemberPath::simple(source.clone(), (*target).clone()),
            };
            plan.push(entry);
        }

        tracing::debug!("Resolved {} member mapping(s) for {}", plan.len(), pair);
        Ok(plan)
    }
}
