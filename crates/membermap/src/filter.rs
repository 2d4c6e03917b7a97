// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member eligibility.
//!
//! A member can feed a mapping when it is readable and can receive one when it
//! accepts a single value. Fields qualify on both sides.

use crate::introspect::TypeIntrospector;
use crate::types::{MemberDescriptor, TypeName};

/// Side of the mapping a member is considered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    /// Check if `member` is an eligible endpoint on this side.
    pub fn accepts(self, member: &MemberDescriptor) -> bool {
        match self {
            Self::Source => member.is_readable(),
            Self::Target => member.is_writable(),
        }
    }
}

/// Members of `ty` eligible on `side`, in enumeration order.
pub fn eligible_members<'a, I>(
    introspector: &'a I,
    ty: &TypeName,
    side: Side,
) -> Vec<&'a MemberDescriptor>
where
    I: TypeIntrospector + ?Sized,
{
    introspector
        .members(ty)
        .iter()
        .filter(|m| side.accepts(m))
        .collect()
}

/// Readable members of `ty`.
pub fn source_members<'a, I>(introspector: &'a I, ty: &TypeName) -> Vec<&'a MemberDescriptor>
where
    I: TypeIntrospector + ?Sized,
{
    eligible_members(introspector, ty, Side::Source)
}

/// Members of `ty` accepting a single value.
pub fn target_members<'a, I>(introspector: &'a I, ty: &TypeName) -> Vec<&'a MemberDescriptor>
where
    I: TypeIntrospector + ?Sized,
{
    eligible_members(introspector, ty, Side::Target)
}
