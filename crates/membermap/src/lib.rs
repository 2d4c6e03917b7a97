// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member correspondence resolution for object mappers.
//!
//! Given a source type and a target type, computes the ordered list of
//! member pairs a value copier walks: which source member feeds which target
//! member, through which nested path, and through which substituted type.
//!
//! # Features
//!
//! - **Annotations**: Bind or ignore members on either side, optionally
//!   scoped to one opposing type
//! - **Per-pair configuration**: Ignore members, bind dotted member paths,
//!   substitute target value types
//! - **Name matching**: Exact, case-insensitive, or a custom predicate
//! - **Plan caching**: Memoize plans per type pair
//!
//! # Quick Start
//!
//! ```
//! use membermap::{
//!     BindingConfig, MapperConfig, MappingMemberBuilder, MemberDescriptor, ShapeDescriptor,
//!     ShapeRegistry, TypePair,
//! };
//!
//! let registry = ShapeRegistry::new()
//!     .with_shape(
//!         ShapeDescriptor::new("User")
//!             .member(MemberDescriptor::property("Name", "string"))
//!             .member(MemberDescriptor::property("Password", "string")),
//!     )
//!     .with_shape(
//!         ShapeDescriptor::new("UserDto")
//!             .member(MemberDescriptor::property("Name", "string"))
//!             .member(MemberDescriptor::property("Password", "string")),
//!     );
//!
//! let pair = TypePair::new("User", "UserDto");
//! let config = MapperConfig::new().bind(pair.clone(), BindingConfig::new().ignore("Password"));
//!
//! let plan = MappingMemberBuilder::new(&registry, &config).build(&pair).unwrap();
//! assert_eq!(plan.len(), 1);
//! assert_eq!(plan[0].to_string(), "Name -> Name");
//! ```
//!
//! # Mapping Document
//!
//! ```toml
//! name_matching = "exact"
//!
//! [[shapes]]
//! name = "User"
//!
//! [[shapes.members]]
//! name = "Login"
//! type = "string"
//!
//! [[shapes.members.annotations]]
//! bind = "Username"
//!
//! [[pairs]]
//! source = "User"
//! target = "UserDto"
//! ignore = ["Password"]
//!
//! [[pairs.bindings]]
//! source = "Addr.City"
//! target = "Location.City"
//! ```

pub mod binding;
pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod introspect;
pub mod resolve;
pub mod types;

pub use binding::{
    BindingConfig, BindingProvider, FieldBinding, FieldPath, MapperConfig, NameMatching,
};
pub use builder::{MappingMemberBuilder, MappingMemberPath};
pub use cache::{Plan, PlanCache};
pub use config::{ConfigError, MappingDocument};
pub use error::ResolutionError;
pub use introspect::{ShapeDescriptor, ShapeRegistry, TypeIntrospector};
pub use types::{Annotation, MemberDescriptor, MemberKind, Scope, TypeName, TypePair};
