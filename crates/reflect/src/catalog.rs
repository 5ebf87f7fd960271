//! Type catalog: the metadata backing member resolution.
//!
//! A [`CatalogBuilder`] collects type declarations and produces an immutable
//! [`TypeCatalog`]. Inheritance is single and parents must be declared before
//! their children, so a finished catalog never contains cycles.

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::resolver::{MemberResolver, ResolveError, TypeLookup};
use crate::{MemberDescriptor, MemberKey, MemberKind, TypeKey, Visibility};


/// Errors raised while declaring types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
	#[error("duplicate type {module}::{name}")]
	DuplicateType { module: String, name: String },
	#[error("duplicate {kind} {member:?} on {module}::{ty}")]
	DuplicateMember {
		module: String,
		ty: String,
		member: String,
		kind: MemberKind,
	},
	#[error("unknown parent type {0}")]
	UnknownParent(TypeKey),
}

/// A type declaration.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
	pub key: TypeKey,
	pub name: Arc<str>,
	/// Module origin the type was loaded from.
	pub module: Arc<str>,
	pub parent: Option<TypeKey>,
	/// Members declared directly on this type, in declaration order.
	pub members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
	/// Finds a directly declared member of the given kind.
	pub fn member(&self, name: &str, kind: MemberKind) -> Option<&MemberDescriptor> {
		self.members
			.iter()
			.find(|m| m.kind == kind && &*m.name == name)
	}

	/// Finds a directly declared member of any kind.
	pub fn member_named(&self, name: &str) -> Option<&MemberDescriptor> {
		self.members.iter().find(|m| &*m.name == name)
	}

	pub fn fields(&self) -> impl Iterator<Item = &MemberDescriptor> {
		self.members.iter().filter(|m| m.kind == MemberKind::Field)
	}

	pub fn properties(&self) -> impl Iterator<Item = &MemberDescriptor> {
		self.members
			.iter()
			.filter(|m| m.kind == MemberKind::Property)
	}

	/// Returns `module::name`.
	pub fn qualified_name(&self) -> String {
		format!("{}::{}", self.module, self.name)
	}
}

type NameIndex = HashMap<Arc<str>, HashMap<Arc<str>, TypeKey>>;

/// Collects type declarations.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
	types: Vec<TypeDescriptor>,
	by_module: NameIndex,
}

impl CatalogBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts declaring a type. Nothing is recorded until [`TypeBuilder::finish`].
	pub fn add_type(
		&mut self,
		module: impl Into<Arc<str>>,
		name: impl Into<Arc<str>>,
	) -> TypeBuilder<'_> {
		TypeBuilder {
			builder: self,
			module: module.into(),
			name: name.into(),
			parent: None,
			members: Vec::new(),
		}
	}

	/// Number of types declared so far.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	pub fn build(self) -> TypeCatalog {
		TypeCatalog {
			types: self.types,
			by_module: self.by_module,
		}
	}

	fn contains(&self, module: &str, name: &str) -> bool {
		self.by_module
			.get(module)
			.is_some_and(|names| names.contains_key(name))
	}
}

/// Declaration of one type, finished with [`TypeBuilder::finish`].
pub struct TypeBuilder<'a> {
	builder: &'a mut CatalogBuilder,
	module: Arc<str>,
	name: Arc<str>,
	parent: Option<TypeKey>,
	members: Vec<MemberDescriptor>,
}

impl TypeBuilder<'_> {
	/// Sets the base type.
	pub fn extends(mut self, parent: TypeKey) -> Self {
		self.parent = Some(parent);
		self
	}

	/// Declares a public field.
	pub fn field(self, name: impl Into<Arc<str>>) -> Self {
		self.member(name, MemberKind::Field, Visibility::Public)
	}

	/// Declares a public property.
	pub fn property(self, name: impl Into<Arc<str>>) -> Self {
		self.member(name, MemberKind::Property, Visibility::Public)
	}

	pub fn member(
		mut self,
		name: impl Into<Arc<str>>,
		kind: MemberKind,
		visibility: Visibility,
	) -> Self {
		self.members.push(MemberDescriptor {
			name: name.into(),
			kind,
			visibility,
		});
		self
	}

	/// Validates the declaration and records it.
	pub fn finish(self) -> Result<TypeKey, CatalogError> {
		let Self {
			builder,
			module,
			name,
			parent,
			members,
		} = self;

		if builder.contains(&module, &name) {
			return Err(CatalogError::DuplicateType {
				module: module.to_string(),
				name: name.to_string(),
			});
		}

		if let Some(parent) = parent
			&& parent.index() >= builder.types.len()
		{
			return Err(CatalogError::UnknownParent(parent));
		}

		for (i, m) in members.iter().enumerate() {
			if members[..i]
				.iter()
				.any(|prev| prev.kind == m.kind && prev.name == m.name)
			{
				return Err(CatalogError::DuplicateMember {
					module: module.to_string(),
					ty: name.to_string(),
					member: m.name.to_string(),
					kind: m.kind,
				});
			}
		}

		let key = TypeKey::from_u32(builder.types.len() as u32);
		builder
			.by_module
			.entry(module.clone())
			.or_default()
			.insert(name.clone(), key);
		builder.types.push(TypeDescriptor {
			key,
			name,
			module,
			parent,
			members,
		});
		Ok(key)
	}
}

/// Immutable set of type declarations.
#[derive(Debug, Default)]
pub struct TypeCatalog {
	types: Vec<TypeDescriptor>,
	by_module: NameIndex,
}

impl TypeCatalog {
	pub fn builder() -> CatalogBuilder {
		CatalogBuilder::new()
	}

	#[inline]
	pub fn get(&self, ty: TypeKey) -> Option<&TypeDescriptor> {
		self.types.get(ty.index())
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Iterates declarations in key order.
	pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
		self.types.iter()
	}

	/// Finds a type by name within one module origin.
	pub fn find_type(&self, name: &str, module: &str) -> Option<TypeKey> {
		self.by_module.get(module)?.get(name).copied()
	}

	#[inline]
	pub fn parent(&self, ty: TypeKey) -> Option<TypeKey> {
		self.get(ty)?.parent
	}

	/// Iterates `ty` followed by each of its base types. Empty for unknown keys.
	pub fn ancestors(&self, ty: TypeKey) -> Ancestors<'_> {
		Ancestors {
			catalog: self,
			next: self.get(ty).map(|_| ty),
		}
	}

	/// Returns true if `ty` is `of` or derives from it.
	pub fn is_subtype(&self, ty: TypeKey, of: TypeKey) -> bool {
		self.ancestors(ty).any(|t| t == of)
	}

	fn resolve_member(
		&self,
		ty: TypeKey,
		name: &str,
		kind: MemberKind,
	) -> Result<MemberKey, ResolveError> {
		if self.get(ty).is_none() {
			return Err(ResolveError::UnknownType(ty));
		}

		let mut other_kind = None;
		for t in self.ancestors(ty) {
			let Some(desc) = self.get(t) else { break };
			if let Some(m) = desc.member(name, kind) {
				return Ok(MemberKey::new(t, m.name.clone(), kind));
			}
			if other_kind.is_none() {
				other_kind = desc.member_named(name).map(|m| m.kind);
			}
		}

		Err(match other_kind {
			Some(found) => ResolveError::WrongKind {
				ty,
				name: name.into(),
				expected: kind,
				found,
			},
			None => ResolveError::NotFound {
				ty,
				name: name.into(),
			},
		})
	}
}

/// Iterator over a type and its base types, most derived first.
pub struct Ancestors<'a> {
	catalog: &'a TypeCatalog,
	next: Option<TypeKey>,
}

impl Iterator for Ancestors<'_> {
	type Item = TypeKey;

	fn next(&mut self) -> Option<TypeKey> {
		let cur = self.next?;
		self.next = self.catalog.parent(cur);
		Some(cur)
	}
}

impl MemberResolver for TypeCatalog {
	fn resolve(&self, ty: TypeKey, name: &str, kind: MemberKind) -> Result<MemberKey, ResolveError> {
		self.resolve_member(ty, name, kind)
	}

	fn base_type(&self, ty: TypeKey) -> Option<TypeKey> {
		self.parent(ty)
	}
}

impl TypeLookup for TypeCatalog {
	fn find_type(&self, name: &str, module: &str) -> Option<TypeKey> {
		TypeCatalog::find_type(self, name, module)
	}

	fn is_subtype(&self, ty: TypeKey, of: TypeKey) -> bool {
		TypeCatalog::is_subtype(self, ty, of)
	}
}
