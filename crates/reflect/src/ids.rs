use std::fmt;

/// Dense identity of a type declared in a [`TypeCatalog`](crate::TypeCatalog).
///
/// Keys are only meaningful for the catalog that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(u32);

impl TypeKey {
	/// Creates a key from its raw index.
	pub const fn from_u32(raw: u32) -> Self {
		Self(raw)
	}

	/// Returns the raw index.
	pub const fn as_u32(self) -> u32 {
		self.0
	}

	pub(crate) const fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "type#{}", self.0)
	}
}
