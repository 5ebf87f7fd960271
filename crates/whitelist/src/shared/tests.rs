use std::sync::Arc;
use std::thread;

use vetted_reflect::{CatalogBuilder, MemberKind, MemberResolver, TypeCatalog};

use super::*;

fn catalog(fields: usize) -> (Arc<TypeCatalog>, TypeKey) {
	let mut b = CatalogBuilder::new();
	let mut ty = b.add_type("bench", "Wide");
	for i in 0..fields {
		ty = ty.field(format!("f{i}"));
	}
	let key = ty.finish().unwrap();
	(Arc::new(b.build()), key)
}

struct Bare(TypeKey);

impl Instance for Bare {
	fn type_key(&self) -> TypeKey {
		self.0
	}
}

#[test]
fn test_concurrent_registration_loses_nothing() {
	let (catalog, wide) = catalog(64);
	let shared = SharedWhitelist::new(WhitelistRegistry::new(catalog));

	thread::scope(|s| {
		for chunk in 0..4 {
			let shared = shared.clone();
			s.spawn(move || {
				for i in (chunk * 16)..(chunk * 16 + 16) {
					shared.register_whitelisted_type_field(wide, &format!("f{i}"));
				}
			});
		}
	});

	assert!(shared.is_type_whitelisted(wide));
	assert_eq!(shared.whitelisted_members_for(wide).map(|m| m.len()), Some(64));
}

#[test]
fn test_concurrent_predicate_registration() {
	let (catalog, wide) = catalog(1);
	let member = catalog.resolve(wide, "f0", MemberKind::Field).unwrap();
	let shared = SharedWhitelist::from(WhitelistRegistry::new(catalog));

	let ids: Vec<PredicateId> = thread::scope(|s| {
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let shared = shared.clone();
				let member = member.clone();
				s.spawn(move || shared.register_predicate_for(member, GuardPredicate::new("noop", |_| true)))
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	let set = shared.optional_predicates_for(&member).unwrap();
	assert_eq!(set.len(), 8);
	assert!(ids.iter().all(|&id| set.contains(id)));
}

#[test]
fn test_snapshots_are_detached() {
	let (catalog, wide) = catalog(2);
	let shared = SharedWhitelist::new(WhitelistRegistry::new(catalog));
	shared.register_whitelisted_type_field(wide, "f0");

	let snapshot = shared.whitelisted_members_for(wide).unwrap();
	shared.register_whitelisted_type_field(wide, "f1");
	shared.unregister_whitelisted_type_field(wide, "f0");

	assert_eq!(snapshot.len(), 1);
	assert_eq!(shared.whitelisted_members_for(wide).map(|m| m.len()), Some(1));
	assert!(shared.whitelisted_members_for(TypeKey::from_u32(9)).is_none());
}

#[test]
fn test_guard_may_query_the_handle() {
	let (catalog, wide) = catalog(1);
	let member = catalog.resolve(wide, "f0", MemberKind::Field).unwrap();
	let shared = SharedWhitelist::new(WhitelistRegistry::new(catalog));
	shared.register_whitelisted_type_field(wide, "f0");

	let inner = shared.clone();
	shared.register_predicate_for(
		member.clone(),
		GuardPredicate::new("reentrant", move |instance| inner.is_type_whitelisted(instance.type_key())),
	);

	assert!(shared.is_exempt(&member, &Bare(wide)));
}

#[test]
fn test_unregister_through_handle() {
	let (catalog, wide) = catalog(1);
	let member = catalog.resolve(wide, "f0", MemberKind::Field).unwrap();
	let shared = SharedWhitelist::new(WhitelistRegistry::new(catalog));
	shared.register_whitelisted_type_field(wide, "f0");
	let veto = shared.register_predicate_for(member.clone(), GuardPredicate::new("veto", |_| false));

	assert!(!shared.is_exempt(&member, &Bare(wide)));
	assert!(shared.unregister_predicate_for(&member, veto).is_some());
	assert!(shared.is_exempt(&member, &Bare(wide)));
	assert!(shared.read().optional_predicates_for(&member).is_some_and(|p| p.is_empty()));
}

#[test]
fn test_batch_mutation_under_write_guard() {
	let (catalog, wide) = catalog(2);
	let shared = SharedWhitelist::new(WhitelistRegistry::new(catalog));
	{
		let mut reg = shared.write();
		reg.register_whitelisted_type_field(wide, "f0");
		reg.register_whitelisted_type_field(wide, "f1");
	}
	assert_eq!(shared.whitelisted_members_for(wide).map(|m| m.len()), Some(2));

	shared.register_whitelisted_type_property(wide, "f0");
	shared.unregister_whitelisted_type_property(wide, "f0");
	assert_eq!(shared.whitelisted_members_for(wide).map(|m| m.len()), Some(2));
}
