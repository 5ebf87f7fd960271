//! Runtime instance model.
//!
//! Guards and validators inspect live objects through [`Instance`]. Objects
//! that sit on a [`GameObject`] additionally expose [`Component`], which lets
//! a guard ask about sibling components.

use std::sync::Arc;

use crate::{TypeCatalog, TypeKey};


/// A live object being inspected.
pub trait Instance {
	/// Runtime type of the object.
	fn type_key(&self) -> TypeKey;

	/// Component view, when the object is attached to a [`GameObject`].
	fn as_component(&self) -> Option<&dyn Component> {
		None
	}
}

/// An object attached to a host that may carry other components.
pub trait Component {
	/// Returns true if the owning object carries a component of `ty` or of a
	/// type derived from it. The queried component itself counts.
	fn has_component(&self, ty: TypeKey) -> bool;
}

/// A named bag of components.
#[derive(Debug, Clone)]
pub struct GameObject {
	name: String,
	catalog: Arc<TypeCatalog>,
	components: Vec<TypeKey>,
}

impl GameObject {
	pub fn new(name: impl Into<String>, catalog: Arc<TypeCatalog>) -> Self {
		Self {
			name: name.into(),
			catalog,
			components: Vec::new(),
		}
	}

	pub fn with_component(mut self, ty: TypeKey) -> Self {
		self.add_component(ty);
		self
	}

	/// Attaches a component and returns its slot index.
	pub fn add_component(&mut self, ty: TypeKey) -> usize {
		self.components.push(ty);
		self.components.len() - 1
	}

	/// Detaches the first component of exactly `ty`.
	///
	/// Slot indices after the removed one shift down.
	pub fn remove_component(&mut self, ty: TypeKey) -> bool {
		match self.components.iter().position(|&c| c == ty) {
			Some(idx) => {
				self.components.remove(idx);
				true
			}
			None => false,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn catalog(&self) -> &TypeCatalog {
		&self.catalog
	}

	pub fn components(&self) -> &[TypeKey] {
		&self.components
	}

	pub fn component(&self, index: usize) -> Option<ComponentRef<'_>> {
		(index < self.components.len()).then_some(ComponentRef {
			object: self,
			index,
		})
	}

	/// First component whose type is `ty` or derives from it.
	pub fn get_component(&self, ty: TypeKey) -> Option<ComponentRef<'_>> {
		let index = self
			.components
			.iter()
			.position(|&c| self.catalog.is_subtype(c, ty))?;
		Some(ComponentRef {
			object: self,
			index,
		})
	}

	pub fn has_component(&self, ty: TypeKey) -> bool {
		self.get_component(ty).is_some()
	}
}

/// Borrowed view of one component slot on a [`GameObject`].
#[derive(Debug, Clone, Copy)]
pub struct ComponentRef<'a> {
	object: &'a GameObject,
	index: usize,
}

impl<'a> ComponentRef<'a> {
	pub fn object(&self) -> &'a GameObject {
		self.object
	}

	pub fn index(&self) -> usize {
		self.index
	}
}

impl Instance for ComponentRef<'_> {
	fn type_key(&self) -> TypeKey {
		self.object.components[self.index]
	}

	fn as_component(&self) -> Option<&dyn Component> {
		Some(self)
	}
}

impl Component for ComponentRef<'_> {
	fn has_component(&self, ty: TypeKey) -> bool {
		self.object.has_component(ty)
	}
}
