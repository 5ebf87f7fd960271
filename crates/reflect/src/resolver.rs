//! Capabilities a registry needs from the metadata facility.
//!
//! Registries stay agnostic to how metadata is stored; they only see whether a
//! lookup succeeded. [`TypeCatalog`](crate::TypeCatalog) implements both traits.

use crate::{MemberKey, MemberKind, TypeKey};

/// Why a member lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("unknown type {0}")]
	UnknownType(TypeKey),
	#[error("no member {name:?} on {ty} or its base types")]
	NotFound { ty: TypeKey, name: Box<str> },
	#[error("{name:?} on {ty} is a {found}, not a {expected}")]
	WrongKind {
		ty: TypeKey,
		name: Box<str>,
		expected: MemberKind,
		found: MemberKind,
	},
}

/// Hierarchy-walking member lookup by name.
pub trait MemberResolver: Send + Sync {
	/// Resolves `name` as a member of `kind` on `ty`, searching every
	/// visibility level and then each base type in turn.
	fn resolve(&self, ty: TypeKey, name: &str, kind: MemberKind) -> Result<MemberKey, ResolveError>;

	/// Returns the direct base type of `ty`, if any.
	fn base_type(&self, ty: TypeKey) -> Option<TypeKey>;
}

/// Name-based type lookup.
pub trait TypeLookup: Send + Sync {
	/// Finds a type by name within one module origin.
	fn find_type(&self, name: &str, module: &str) -> Option<TypeKey>;

	/// Returns true if `ty` is `of` or derives from it.
	fn is_subtype(&self, ty: TypeKey, of: TypeKey) -> bool;
}
