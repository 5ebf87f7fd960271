//! Reflective metadata for editor-side object inspection.
//!
//! Types are declared up front in a [`TypeCatalog`], which then answers
//! hierarchy-walking member lookups through the [`MemberResolver`] capability
//! and name-based type lookups through [`TypeLookup`]. Runtime objects are
//! described by the [`Instance`] and [`Component`] traits.

/// Type catalog construction and lookup.
pub mod catalog;
/// Dense type identities.
pub mod ids;
/// Runtime instance model: objects, components and sibling queries.
pub mod instance;
/// Member descriptors and resolved member keys.
pub mod member;
/// Resolution capabilities consumed by registries.
pub mod resolver;

pub use catalog::{
	Ancestors, CatalogBuilder, CatalogError, TypeBuilder, TypeCatalog, TypeDescriptor,
};
pub use ids::TypeKey;
pub use instance::{Component, ComponentRef, GameObject, Instance};
pub use member::{MemberDescriptor, MemberKey, MemberKind, Visibility};
pub use resolver::{MemberResolver, ResolveError, TypeLookup};
