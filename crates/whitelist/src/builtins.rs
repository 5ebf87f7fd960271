//! Built-in whitelist entries.
//!
//! `MeshFilter.shared_mesh` is exempt unless the same object also carries a
//! `TextMeshPro` component. Text components populate the mesh reference at
//! runtime, so an empty reference in the editor is expected there and must
//! not be reported; everywhere else the mesh is validated as usual.

use vetted_reflect::{MemberKey, MemberKind, MemberResolver, TypeKey, TypeLookup};

use crate::WhitelistRegistry;
use crate::options::WhitelistOptions;
use crate::predicate::GuardPredicate;

#[cfg(test)]
mod tests;

/// Module origin of engine component types.
pub const ENGINE_MODULE: &str = "engine";
pub const MESH_FILTER_TYPE: &str = "MeshFilter";
pub const SHARED_MESH_PROPERTY: &str = "shared_mesh";
/// Alternate mesh source; may be absent from the running process.
pub const TEXT_MESH_TYPE: &str = "TextMeshPro";
/// Module origins searched for [`TEXT_MESH_TYPE`], in preference order.
pub const TEXT_MESH_MODULES: [&str; 2] = ["game", "game-firstpass"];

/// Resolves the built-in `MeshFilter.shared_mesh` member, if the catalog has it.
pub fn mesh_filter_shared_mesh(resolver: &dyn MemberResolver, lookup: &dyn TypeLookup) -> Option<MemberKey> {
	let ty = lookup.find_type(MESH_FILTER_TYPE, ENGINE_MODULE)?;
	resolver
		.resolve(ty, SHARED_MESH_PROPERTY, MemberKind::Property)
		.ok()
}

/// Finds [`TEXT_MESH_TYPE`] in the first module origin that declares it.
pub fn alternate_mesh_source<S: AsRef<str>>(lookup: &dyn TypeLookup, modules: &[S]) -> Option<TypeKey> {
	modules
		.iter()
		.find_map(|module| lookup.find_type(TEXT_MESH_TYPE, module.as_ref()))
}

/// Keeps the exemption unless the instance's object carries `alternate`.
///
/// Permissive when `alternate` is `None` or the instance is not a component.
pub fn dont_validate_if_alternate_mesh_source(alternate: Option<TypeKey>) -> GuardPredicate {
	GuardPredicate::new("dont_validate_if_alternate_mesh_source", move |instance| {
		let Some(alternate) = alternate else {
			return true;
		};
		instance
			.as_component()
			.is_none_or(|component| !component.has_component(alternate))
	})
}

pub(crate) fn seed(registry: &mut WhitelistRegistry, lookup: &dyn TypeLookup, options: &WhitelistOptions) {
	let Some(mesh_filter) = lookup.find_type(MESH_FILTER_TYPE, ENGINE_MODULE) else {
		tracing::debug!("{ENGINE_MODULE}::{MESH_FILTER_TYPE} not in catalog, skipping built-in whitelist");
		return;
	};

	let member = match registry.try_register_member(mesh_filter, SHARED_MESH_PROPERTY, MemberKind::Property) {
		Ok(member) => member,
		Err(e) => {
			tracing::debug!(error = %e, "built-in whitelist entry skipped");
			return;
		}
	};

	let alternate = alternate_mesh_source(lookup, &options.alternate_mesh_modules);
	if alternate.is_none() {
		tracing::debug!("{TEXT_MESH_TYPE} not found, mesh guard is permissive");
	}
	registry.register_predicate_for(member, dont_validate_if_alternate_mesh_source(alternate));
}
