//! Guard predicates that can revoke a member's exemption per instance.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use vetted_reflect::Instance;

static NEXT_PREDICATE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a [`GuardPredicate`], shared by all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredicateId(u64);

impl PredicateId {
	fn next() -> Self {
		Self(NEXT_PREDICATE_ID.fetch_add(1, Ordering::Relaxed))
	}

	pub const fn as_u64(self) -> u64 {
		self.0
	}
}

impl fmt::Display for PredicateId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "guard#{}", self.0)
	}
}

/// Signature of a guard check. `true` keeps the exemption.
pub type GuardFn = dyn Fn(&dyn Instance) -> bool + Send + Sync;

/// A side-effect-free check gating a whitelisted member.
///
/// Returning `false` for an instance revokes the member's exemption for that
/// instance only.
#[derive(Clone)]
pub struct GuardPredicate {
	id: PredicateId,
	label: &'static str,
	check: Arc<GuardFn>,
}

impl GuardPredicate {
	/// Wraps `check` under a fresh [`PredicateId`].
	pub fn new<F>(label: &'static str, check: F) -> Self
	where
		F: Fn(&dyn Instance) -> bool + Send + Sync + 'static,
	{
		Self {
			id: PredicateId::next(),
			label,
			check: Arc::new(check),
		}
	}

	pub fn id(&self) -> PredicateId {
		self.id
	}

	/// Name used in diagnostics.
	pub fn label(&self) -> &'static str {
		self.label
	}

	#[inline]
	pub fn check(&self, instance: &dyn Instance) -> bool {
		(self.check)(instance)
	}
}

impl fmt::Debug for GuardPredicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GuardPredicate")
			.field("id", &self.id)
			.field("label", &self.label)
			.finish_non_exhaustive()
	}
}

/// Insertion-ordered guards for one member, unique by [`PredicateId`].
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
	inner: IndexMap<PredicateId, GuardPredicate>,
}

impl PredicateSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a guard. Returns false if its id is already present.
	pub fn insert(&mut self, predicate: GuardPredicate) -> bool {
		if self.inner.contains_key(&predicate.id) {
			return false;
		}
		self.inner.insert(predicate.id, predicate);
		true
	}

	pub fn remove(&mut self, id: PredicateId) -> Option<GuardPredicate> {
		self.inner.shift_remove(&id)
	}

	pub fn contains(&self, id: PredicateId) -> bool {
		self.inner.contains_key(&id)
	}

	pub fn get(&self, id: PredicateId) -> Option<&GuardPredicate> {
		self.inner.get(&id)
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &GuardPredicate> {
		self.inner.values()
	}

	/// Returns true if every guard keeps the exemption for `instance`.
	///
	/// Evaluation stops at the first guard that revokes it.
	pub fn allows(&self, instance: &dyn Instance) -> bool {
		self.iter().all(|p| {
			let keep = p.check(instance);
			if !keep {
				tracing::trace!(guard = p.label, id = %p.id, ty = %instance.type_key(), "exemption revoked");
			}
			keep
		})
	}
}

impl<'a> IntoIterator for &'a PredicateSet {
	type Item = &'a GuardPredicate;
	type IntoIter = indexmap::map::Values<'a, PredicateId, GuardPredicate>;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.values()
	}
}
