use std::sync::Arc;

use vetted_reflect::{CatalogBuilder, GameObject, Instance, TypeCatalog};

use super::*;

struct Engine {
	catalog: Arc<TypeCatalog>,
	mesh_filter: TypeKey,
	text_mesh: Option<TypeKey>,
	renderer: TypeKey,
}

/// Builds an engine catalog, declaring `TextMeshPro` in `text_module` if given.
fn engine(text_module: Option<&str>) -> Engine {
	let mut b = CatalogBuilder::new();
	let component = b
		.add_type(ENGINE_MODULE, "Component")
		.property("enabled")
		.finish()
		.unwrap();
	let mesh_filter = b
		.add_type(ENGINE_MODULE, MESH_FILTER_TYPE)
		.extends(component)
		.property(SHARED_MESH_PROPERTY)
		.property("mesh")
		.finish()
		.unwrap();
	let renderer = b
		.add_type(ENGINE_MODULE, "MeshRenderer")
		.extends(component)
		.finish()
		.unwrap();
	let text_mesh = text_module.map(|module| {
		b.add_type(module, TEXT_MESH_TYPE)
			.extends(component)
			.property("text")
			.finish()
			.unwrap()
	});
	Engine {
		catalog: Arc::new(b.build()),
		mesh_filter,
		text_mesh,
		renderer,
	}
}

fn shared_mesh(e: &Engine) -> MemberKey {
	mesh_filter_shared_mesh(&*e.catalog, &*e.catalog).unwrap()
}

#[test]
fn test_builtin_entry_is_seeded() {
	let e = engine(Some("game"));
	let reg = WhitelistRegistry::with_builtins(e.catalog.clone());

	let member = shared_mesh(&e);
	assert!(reg.is_type_whitelisted(e.mesh_filter));
	assert!(reg.whitelisted_members_for(e.mesh_filter).unwrap().contains(&member));
	assert_eq!(reg.optional_predicates_for(&member).map(|p| p.len()), Some(1));
}

#[test]
fn test_mesh_exempt_without_text_mesh_sibling() {
	let e = engine(Some("game"));
	let reg = WhitelistRegistry::with_builtins(e.catalog.clone());
	let obj = GameObject::new("rock", e.catalog.clone())
		.with_component(e.mesh_filter)
		.with_component(e.renderer);

	let filter = obj.get_component(e.mesh_filter).unwrap();
	assert!(reg.is_exempt(&shared_mesh(&e), &filter));
}

#[test]
fn test_mesh_not_exempt_with_text_mesh_sibling() {
	let e = engine(Some("game"));
	let reg = WhitelistRegistry::with_builtins(e.catalog.clone());
	let obj = GameObject::new("label", e.catalog.clone())
		.with_component(e.mesh_filter)
		.with_component(e.text_mesh.unwrap());

	let filter = obj.get_component(e.mesh_filter).unwrap();
	assert!(!reg.is_exempt(&shared_mesh(&e), &filter));
}

#[test]
fn test_text_mesh_found_in_secondary_module() {
	let e = engine(Some("game-firstpass"));
	let reg = WhitelistRegistry::with_builtins(e.catalog.clone());
	let obj = GameObject::new("label", e.catalog.clone())
		.with_component(e.mesh_filter)
		.with_component(e.text_mesh.unwrap());

	let filter = obj.get_component(e.mesh_filter).unwrap();
	assert!(!reg.is_exempt(&shared_mesh(&e), &filter));
}

#[test]
fn test_primary_module_is_preferred() {
	let mut b = CatalogBuilder::new();
	let primary = b.add_type("game", TEXT_MESH_TYPE).finish().unwrap();
	b.add_type("game-firstpass", TEXT_MESH_TYPE).finish().unwrap();
	let catalog = b.build();

	assert_eq!(alternate_mesh_source(&catalog, &TEXT_MESH_MODULES), Some(primary));
}

#[test]
fn test_text_mesh_in_unsearched_module_is_ignored() {
	let e = engine(Some("plugins"));
	let reg = WhitelistRegistry::with_builtins(e.catalog.clone());
	let obj = GameObject::new("label", e.catalog.clone())
		.with_component(e.mesh_filter)
		.with_component(e.text_mesh.unwrap());

	let filter = obj.get_component(e.mesh_filter).unwrap();
	assert!(reg.is_exempt(&shared_mesh(&e), &filter));
}

#[test]
fn test_custom_modules_from_options() {
	let e = engine(Some("plugins"));
	let options = WhitelistOptions::new().with_alternate_mesh_modules(["plugins"]);
	let reg = WhitelistRegistry::from_options(e.catalog.clone(), &options);
	let obj = GameObject::new("label", e.catalog.clone())
		.with_component(e.mesh_filter)
		.with_component(e.text_mesh.unwrap());

	let filter = obj.get_component(e.mesh_filter).unwrap();
	assert!(!reg.is_exempt(&shared_mesh(&e), &filter));
}

#[test]
fn test_guard_is_permissive_without_alternate_type() {
	let e = engine(None);
	let reg = WhitelistRegistry::with_builtins(e.catalog.clone());
	let obj = GameObject::new("rock", e.catalog.clone())
		.with_component(e.mesh_filter)
		.with_component(e.renderer);

	let filter = obj.get_component(e.mesh_filter).unwrap();
	assert!(reg.is_exempt(&shared_mesh(&e), &filter));
}

#[test]
fn test_guard_is_permissive_for_non_components() {
	struct Detached(TypeKey);

	impl Instance for Detached {
		fn type_key(&self) -> TypeKey {
			self.0
		}
	}

	let e = engine(Some("game"));
	let guard = dont_validate_if_alternate_mesh_source(e.text_mesh);
	assert!(guard.check(&Detached(e.mesh_filter)));
}

#[test]
fn test_builtins_skipped_without_mesh_filter() {
	let mut b = CatalogBuilder::new();
	let renderer = b.add_type(ENGINE_MODULE, "MeshRenderer").finish().unwrap();
	let catalog = Arc::new(b.build());

	let reg = WhitelistRegistry::with_builtins(catalog.clone());
	assert!(reg.is_empty());
	assert!(!reg.is_type_whitelisted(renderer));
	assert!(mesh_filter_shared_mesh(&*catalog, &*catalog).is_none());
}

#[test]
fn test_builtins_skipped_when_member_missing() {
	let mut b = CatalogBuilder::new();
	let mesh_filter = b
		.add_type(ENGINE_MODULE, MESH_FILTER_TYPE)
		.field(SHARED_MESH_PROPERTY)
		.finish()
		.unwrap();
	let catalog = Arc::new(b.build());

	let reg = WhitelistRegistry::with_builtins(catalog);
	assert!(!reg.is_type_whitelisted(mesh_filter));
}

#[test]
fn test_options_can_disable_builtins() {
	let e = engine(Some("game"));
	let reg = WhitelistRegistry::from_options(e.catalog.clone(), &WhitelistOptions::new().without_builtins());
	assert!(reg.is_empty());
	assert!(reg.optional_predicates_for(&shared_mesh(&e)).is_none());
}
