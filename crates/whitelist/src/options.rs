//! Construction-time configuration for [`WhitelistRegistry`](crate::WhitelistRegistry).

use crate::builtins::TEXT_MESH_MODULES;

/// Options applied when a registry is built from a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistOptions {
	/// Seed the built-in entries (see [`crate::builtins`]).
	pub seed_builtins: bool,
	/// Module origins searched, in order, for the alternate mesh source type.
	pub alternate_mesh_modules: Vec<String>,
}

impl Default for WhitelistOptions {
	fn default() -> Self {
		Self {
			seed_builtins: true,
			alternate_mesh_modules: TEXT_MESH_MODULES.iter().map(|m| m.to_string()).collect(),
		}
	}
}

impl WhitelistOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts from an empty registry.
	pub fn without_builtins(mut self) -> Self {
		self.seed_builtins = false;
		self
	}

	/// Replaces the module origins searched for the alternate mesh source.
	pub fn with_alternate_mesh_modules<I, S>(mut self, modules: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.alternate_mesh_modules = modules.into_iter().map(Into::into).collect();
		self
	}
}
