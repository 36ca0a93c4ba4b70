//! Self-specializing dispatch caches.
//!
//! Turns "which of these cases does this value match?" into an integer that can
//! feed a plain `match`:
//!
//! * [`StringDispatch`] matches a string against distinct string cases.
//! * [`TypeDispatch`] matches a value's runtime type against type cases
//!   ordered most specific first.
//!
//! Neither walks its case list on every call. Each owns a dispatch site that
//! observes inputs, grows a chain of exact guards for the values it actually
//! sees, and eventually settles into a permanent evaluator. See [`site`] for
//! the shared mechanics.
//!
//! Results are a case index, [`NO_MATCH`], or [`NULL_MATCH`].

/// First-match-wins guard chains.
pub mod chain;
/// Escalation tuning.
pub mod config;
/// Construction and call-time errors.
pub mod error;
/// Atomically retargeted dispatch sites.
pub mod site;
/// String dispatch cache.
pub mod string;
/// Case tables and partial-order validation.
pub mod table;
/// Type dispatch cache.
pub mod types;

pub use config::DispatchConfig;
pub use error::DispatchError;
pub use site::SiteShape;
pub use string::StringDispatch;
pub use types::TypeDispatch;

/// Result for inputs that match no case.
pub const NO_MATCH: i32 = -2;

/// Result for a null input when the cache accepts null.
pub const NULL_MATCH: i32 = -1;
