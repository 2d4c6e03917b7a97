// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolution errors.
//!
//! Only binding mistakes are errors. A source member without a counterpart is
//! simply left unmapped and never reported here.

use crate::types::TypeName;
use thiserror::Error;

/// Fatal error while building the mapping plan of one type pair.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("member '{segment}' of path '{path}' not found on type '{type_name}'")]
    UnknownMember {
        /// Full dotted path as configured.
        path: String,
        /// First segment that failed to resolve.
        segment: String,
        /// Type searched for `segment`.
        type_name: TypeName,
    },

    #[error("empty member path bound on type '{0}'")]
    EmptyPath(TypeName),

    #[error(
        "target members '{first}' and '{second}' of '{type_name}' both bind source member '{source_name}'"
    )]
    AmbiguousReverseBind {
        type_name: TypeName,
        source_name: String,
        first: String,
        second: String,
    },
}
