//! Runtime type descriptors for host type systems.
//!
//! A [`RuntimeType`] is a shared handle to a named class or interface with an
//! optional superclass and an ordered list of direct interfaces. The supertype
//! edges are fixed when the type is built, which keeps the relation acyclic and
//! lets consumers walk ancestry without locking.
//!
//! Consumers that must not keep types resident hold a [`WeakType`] or just the
//! [`TypeKey`], which stays unique for the whole process even after the type is
//! dropped.

/// Type descriptor builder.
mod builder;
/// Process-unique type identity.
mod key;
/// Shared and non-owning type handles.
mod ty;

pub use builder::TypeBuilder;
pub use key::TypeKey;
pub use ty::{RuntimeType, TypeKind, Typed, WeakType};

#[cfg(test)]
mod tests;
