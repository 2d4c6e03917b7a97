// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-pair plan memoization for callers.
//!
//! Building a plan is pure, so a plan computed once for a pair can be reused
//! for the lifetime of the metadata it was computed from. Two threads racing
//! on the same missing pair may both build it; the first insert is kept.

use crate::binding::BindingProvider;
use crate::builder::{MappingMemberBuilder, MappingMemberPath};
use crate::error::ResolutionError;
use crate::introspect::TypeIntrospector;
use crate::types::TypePair;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared, immutable mapping plan.
pub type Plan = Arc<[MappingMemberPath]>;

/// Thread-safe cache of mapping plans keyed by type pair.
#[derive(Debug, Default)]
pub struct PlanCache {
    plans: RwLock<HashMap<TypePair, Plan>>,
}

impl PlanCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached plan.
    pub fn get(&self, pair: &TypePair) -> Option<Plan> {
        self.plans.read().get(pair).cloned()
    }

    /// Return the cached plan of `pair`, building it on first use.
    ///
    /// Errors are returned to the caller and never cached.
    pub fn get_or_build<I, P>(
        &self,
        builder: &MappingMemberBuilder<'_, I, P>,
        pair: &TypePair,
    ) -> Result<Plan, ResolutionError>
    where
        I: TypeIntrospector + ?Sized,
        P: BindingProvider + ?Sized,
    {
        if let Some(plan) = self.get(pair) {
            return Ok(plan);
        }

        let plan: Plan = builder.build(pair)?.into();

        let mut plans = self.plans.write();
        Ok(plans.entry(pair.clone()).or_insert(plan).clone())
    }

    /// Drop the plan of one pair, returning it.
    pub fn invalidate(&self, pair: &TypePair) -> Option<Plan> {
        self.plans.write().remove(pair)
    }

    /// Drop every plan.
    pub fn clear(&self) {
        self.plans.write().clear();
    }

    pub fn len(&self) -> usize {
        self.plans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.read().is_empty()
    }
}
