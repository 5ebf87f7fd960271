//! Validation whitelist for editor-side object inspection.
//!
//! A validator walking object graphs asks [`WhitelistRegistry`] whether a
//! field or property it is about to flag is exempt on the instance at hand.
//! Exemptions are registered per type by member name and may be narrowed per
//! instance by [`GuardPredicate`]s.
//!
//! ```ignore
//! let registry = WhitelistRegistry::with_builtins(catalog.clone());
//! if !registry.is_exempt(&member, &component) {
//!     report(member);
//! }
//! ```

/// Built-in entries seeded at construction.
pub mod builtins;
/// Error types.
pub mod error;
/// Registry construction options.
pub mod options;
/// Guard predicates and per-member predicate sets.
pub mod predicate;
/// The registry itself.
pub mod registry;
/// Lock-guarded handle for use across threads.
pub mod shared;

pub use error::WhitelistError;
pub use options::WhitelistOptions;
pub use predicate::{GuardFn, GuardPredicate, PredicateId, PredicateSet};
pub use registry::{MemberSet, WhitelistRegistry};
pub use shared::SharedWhitelist;
