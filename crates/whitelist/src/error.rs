use vetted_reflect::{MemberKey, MemberKind, ResolveError, TypeKey};

/// Reasons a whitelist mutation was skipped.
///
/// The registry's public register/unregister operations absorb these and log
/// them; the `try_*` variants hand them to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WhitelistError {
	#[error("cannot resolve {kind} {name:?} on {ty}: {source}")]
	UnresolvedMember {
		ty: TypeKey,
		name: Box<str>,
		kind: MemberKind,
		source: ResolveError,
	},
	#[error("no predicates registered for {member}")]
	MissingPredicateSet { member: MemberKey },
}
