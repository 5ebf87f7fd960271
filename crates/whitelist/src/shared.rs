//! Thread-shared registry handle.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use vetted_reflect::{Instance, MemberKey, TypeKey};

use crate::predicate::{GuardPredicate, PredicateId, PredicateSet};
use crate::registry::{MemberSet, WhitelistRegistry};

#[cfg(test)]
mod tests;

/// Cloneable handle to a [`WhitelistRegistry`] behind one lock.
///
/// Every lookup-or-create-then-mutate runs under a single write guard. Reads
/// return owned snapshots so no guard outlives the call.
#[derive(Debug, Clone)]
pub struct SharedWhitelist {
	inner: Arc<RwLock<WhitelistRegistry>>,
}

impl From<WhitelistRegistry> for SharedWhitelist {
	fn from(registry: WhitelistRegistry) -> Self {
		Self::new(registry)
	}
}

impl SharedWhitelist {
	pub fn new(registry: WhitelistRegistry) -> Self {
		Self {
			inner: Arc::new(RwLock::new(registry)),
		}
	}

	/// Locks for reading. Do not hold across calls back into this handle.
	pub fn read(&self) -> RwLockReadGuard<'_, WhitelistRegistry> {
		self.inner.read()
	}

	/// Locks for a batch of mutations.
	pub fn write(&self) -> RwLockWriteGuard<'_, WhitelistRegistry> {
		self.inner.write()
	}

	pub fn is_type_whitelisted(&self, ty: TypeKey) -> bool {
		self.inner.read().is_type_whitelisted(ty)
	}

	pub fn whitelisted_members_for(&self, ty: TypeKey) -> Option<MemberSet> {
		self.inner.read().whitelisted_members_for(ty).cloned()
	}

	pub fn optional_predicates_for(&self, member: &MemberKey) -> Option<PredicateSet> {
		self.inner.read().optional_predicates_for(member).cloned()
	}

	pub fn register_predicate_for(&self, member: MemberKey, predicate: GuardPredicate) -> PredicateId {
		self.inner.write().register_predicate_for(member, predicate)
	}

	pub fn unregister_predicate_for(&self, member: &MemberKey, id: PredicateId) -> Option<GuardPredicate> {
		self.inner.write().unregister_predicate_for(member, id)
	}

	pub fn register_whitelisted_type_property(&self, ty: TypeKey, name: &str) {
		self.inner.write().register_whitelisted_type_property(ty, name);
	}

	pub fn unregister_whitelisted_type_property(&self, ty: TypeKey, name: &str) {
		self.inner.write().unregister_whitelisted_type_property(ty, name);
	}

	pub fn register_whitelisted_type_field(&self, ty: TypeKey, name: &str) {
		self.inner.write().register_whitelisted_type_field(ty, name);
	}

	pub fn unregister_whitelisted_type_field(&self, ty: TypeKey, name: &str) {
		self.inner.write().unregister_whitelisted_type_field(ty, name);
	}

	/// Same verdict as [`WhitelistRegistry::is_exempt`].
	///
	/// Guards run after the lock is released, so a guard may query this
	/// handle itself.
	pub fn is_exempt(&self, member: &MemberKey, instance: &dyn Instance) -> bool {
		let guards = {
			let registry = self.inner.read();
			if !registry.is_listed(instance.type_key(), member) {
				return false;
			}
			registry.optional_predicates_for(member).cloned()
		};
		guards.is_none_or(|guards| guards.allows(instance))
	}
}
