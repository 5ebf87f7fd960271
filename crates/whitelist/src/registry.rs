//! The whitelist registry.
//!
//! Maps types to the members exempt from validation on their instances, and
//! members to the guards that can revoke that exemption per instance. Member
//! names are resolved through a [`MemberResolver`]; a name that fails to
//! resolve turns registration into a no-op.
//!
//! # Consumer protocol
//!
//! A validator about to flag `member` on `instance` skips it iff the member is
//! in the whitelist of the instance's type (or a base type) and every guard
//! registered for it returns true. [`WhitelistRegistry::is_exempt`] implements
//! exactly that.

use std::fmt;
use std::iter;
use std::sync::Arc;

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use vetted_reflect::{Instance, MemberKey, MemberKind, MemberResolver, TypeKey, TypeLookup};

use crate::builtins;
use crate::error::WhitelistError;
use crate::options::WhitelistOptions;
use crate::predicate::{GuardPredicate, PredicateId, PredicateSet};


/// Set of members exempt from validation on one type.
pub type MemberSet = HashSet<MemberKey>;

/// Registry of validation exemptions.
///
/// A type stays whitelisted once registered, even if later unregistrations
/// empty its member set. Unregistering on a type that was never registered
/// does not register it.
pub struct WhitelistRegistry {
	resolver: Arc<dyn MemberResolver>,
	types: HashMap<TypeKey, MemberSet>,
	predicates: HashMap<MemberKey, PredicateSet>,
}

impl fmt::Debug for WhitelistRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WhitelistRegistry")
			.field("types", &self.types)
			.field("predicates", &self.predicates)
			.finish_non_exhaustive()
	}
}

impl WhitelistRegistry {
	/// Creates an empty registry.
	pub fn new(resolver: Arc<dyn MemberResolver>) -> Self {
		Self {
			resolver,
			types: HashMap::default(),
			predicates: HashMap::default(),
		}
	}

	/// Creates a registry seeded with the built-in entries.
	pub fn with_builtins<C>(catalog: Arc<C>) -> Self
	where
		C: MemberResolver + TypeLookup + 'static,
	{
		Self::from_options(catalog, &WhitelistOptions::default())
	}

	pub fn from_options<C>(catalog: Arc<C>, options: &WhitelistOptions) -> Self
	where
		C: MemberResolver + TypeLookup + 'static,
	{
		let mut registry = Self::new(catalog.clone());
		if options.seed_builtins {
			builtins::seed(&mut registry, &*catalog, options);
		}
		registry
	}

	pub fn resolver(&self) -> &dyn MemberResolver {
		&*self.resolver
	}

	/// Returns true if `ty` has been registered, whatever its current members.
	#[inline]
	pub fn is_type_whitelisted(&self, ty: TypeKey) -> bool {
		self.types.contains_key(&ty)
	}

	/// Exempt members of `ty`, or `None` if `ty` was never registered.
	#[inline]
	pub fn whitelisted_members_for(&self, ty: TypeKey) -> Option<&MemberSet> {
		self.types.get(&ty)
	}

	/// Registered types with their member sets, in no particular order.
	pub fn whitelisted_types(&self) -> impl Iterator<Item = (TypeKey, &MemberSet)> {
		self.types.iter().map(|(&ty, members)| (ty, members))
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Guards for `member`, independent of the type it was reached through.
	///
	/// `None` if no guard was ever registered; the set may be empty after
	/// unregistrations.
	#[inline]
	pub fn optional_predicates_for(&self, member: &MemberKey) -> Option<&PredicateSet> {
		self.predicates.get(member)
	}

	/// Adds a guard for `member`. Registering the same predicate again has no
	/// further effect.
	pub fn register_predicate_for(&mut self, member: MemberKey, predicate: GuardPredicate) -> PredicateId {
		let id = predicate.id();
		self.predicates.entry(member).or_default().insert(predicate);
		id
	}

	pub fn try_unregister_predicate_for(
		&mut self,
		member: &MemberKey,
		id: PredicateId,
	) -> Result<Option<GuardPredicate>, WhitelistError> {
		let set = self
			.predicates
			.get_mut(member)
			.ok_or_else(|| WhitelistError::MissingPredicateSet {
				member: member.clone(),
			})?;
		Ok(set.remove(id))
	}

	/// Removes a guard from `member`. Warns and does nothing if `member` never
	/// had guards.
	pub fn unregister_predicate_for(&mut self, member: &MemberKey, id: PredicateId) -> Option<GuardPredicate> {
		match self.try_unregister_predicate_for(member, id) {
			Ok(removed) => removed,
			Err(e) => {
				tracing::warn!(%member, guard = %id, "unregister_predicate_for skipped: {e}");
				None
			}
		}
	}

	/// Resolves a property through the registry's resolver.
	pub fn property_from(&self, ty: TypeKey, name: &str) -> Option<MemberKey> {
		self.resolver.resolve(ty, name, MemberKind::Property).ok()
	}

	/// Resolves a field through the registry's resolver.
	pub fn field_from(&self, ty: TypeKey, name: &str) -> Option<MemberKey> {
		self.resolver.resolve(ty, name, MemberKind::Field).ok()
	}

	/// Resolves `name` on `ty` and adds it to the type's whitelist.
	pub fn try_register_member(
		&mut self,
		ty: TypeKey,
		name: &str,
		kind: MemberKind,
	) -> Result<MemberKey, WhitelistError> {
		let member = self.resolve(ty, name, kind)?;
		self.types.entry(ty).or_default().insert(member.clone());
		Ok(member)
	}

	/// Resolves `name` on `ty` and removes it from the type's whitelist.
	///
	/// Returns whether the member was present.
	pub fn try_unregister_member(
		&mut self,
		ty: TypeKey,
		name: &str,
		kind: MemberKind,
	) -> Result<bool, WhitelistError> {
		let member = self.resolve(ty, name, kind)?;
		Ok(self
			.types
			.get_mut(&ty)
			.is_some_and(|members| members.remove(&member)))
	}

	pub fn register_whitelisted_type_property(&mut self, ty: TypeKey, name: &str) {
		self.register_member(ty, name, MemberKind::Property);
	}

	pub fn unregister_whitelisted_type_property(&mut self, ty: TypeKey, name: &str) {
		self.unregister_member(ty, name, MemberKind::Property);
	}

	pub fn register_whitelisted_type_field(&mut self, ty: TypeKey, name: &str) {
		self.register_member(ty, name, MemberKind::Field);
	}

	pub fn unregister_whitelisted_type_field(&mut self, ty: TypeKey, name: &str) {
		self.unregister_member(ty, name, MemberKind::Field);
	}

	/// Returns true if a validator should skip `member` on `instance`.
	pub fn is_exempt(&self, member: &MemberKey, instance: &dyn Instance) -> bool {
		self.is_listed(instance.type_key(), member)
			&& self
				.optional_predicates_for(member)
				.is_none_or(|guards| guards.allows(instance))
	}

	/// Returns true if `member` is whitelisted on `ty` or one of its base types.
	pub(crate) fn is_listed(&self, ty: TypeKey, member: &MemberKey) -> bool {
		iter::successors(Some(ty), |&t| self.resolver.base_type(t)).any(|t| {
			self.types
				.get(&t)
				.is_some_and(|members| members.contains(member))
		})
	}

	fn resolve(&self, ty: TypeKey, name: &str, kind: MemberKind) -> Result<MemberKey, WhitelistError> {
		self.resolver
			.resolve(ty, name, kind)
			.map_err(|source| WhitelistError::UnresolvedMember {
				ty,
				name: name.into(),
				kind,
				source,
			})
	}

	fn register_member(&mut self, ty: TypeKey, name: &str, kind: MemberKind) {
		if let Err(e) = self.try_register_member(ty, name, kind) {
			tracing::debug!(error = %e, "whitelist registration skipped");
		}
	}

	fn unregister_member(&mut self, ty: TypeKey, name: &str, kind: MemberKind) {
		if let Err(e) = self.try_unregister_member(ty, name, kind) {
			tracing::debug!(error = %e, "whitelist unregistration skipped");
		}
	}
}
