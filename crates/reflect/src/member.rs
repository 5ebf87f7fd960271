use std::fmt;
use std::sync::Arc;

use crate::TypeKey;

/// Whether a member is a stored field or an accessor property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
	/// Plain stored field.
	Field,
	/// Accessor-backed property.
	Property,
}

impl MemberKind {
	/// Returns a lowercase label for diagnostics.
	pub const fn as_str(self) -> &'static str {
		match self {
			MemberKind::Field => "field",
			MemberKind::Property => "property",
		}
	}
}

impl fmt::Display for MemberKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Declared visibility of a member.
///
/// Resolution searches every level, so this is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
	#[default]
	Public,
	NonPublic,
}

/// A member as declared on one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
	pub name: Arc<str>,
	pub kind: MemberKind,
	pub visibility: Visibility,
}

/// A resolved member handle.
///
/// `declaring` is the type that declares the member, not the type the lookup
/// started from, so an inherited member resolves to the same key through every
/// subtype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberKey {
	declaring: TypeKey,
	name: Arc<str>,
	kind: MemberKind,
}

impl MemberKey {
	pub fn new(declaring: TypeKey, name: impl Into<Arc<str>>, kind: MemberKind) -> Self {
		Self {
			declaring,
			name: name.into(),
			kind,
		}
	}

	/// Type that declares this member.
	pub const fn declaring_type(&self) -> TypeKey {
		self.declaring
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub const fn kind(&self) -> MemberKind {
		self.kind
	}
}

impl fmt::Display for MemberKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}::{}", self.kind, self.declaring, self.name)
	}
}
