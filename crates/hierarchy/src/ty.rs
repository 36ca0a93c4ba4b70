use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::TypeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	/// Concrete or abstract class with at most one superclass.
	Class,
	/// Interface; only contributes interface edges.
	Interface,
}

impl TypeKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Interface => "interface",
		}
	}
}

impl std::fmt::Display for TypeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

pub(crate) struct TypeInner {
	pub(crate) key: TypeKey,
	pub(crate) name: Box<str>,
	pub(crate) kind: TypeKind,
	pub(crate) superclass: Option<RuntimeType>,
	pub(crate) interfaces: SmallVec<[RuntimeType; 2]>,
}

/// Shared handle to a runtime type descriptor.
///
/// Equality and hashing go through [`TypeKey`], never through the name: two
/// separately built types named `Dog` are different types.
#[derive(Clone)]
pub struct RuntimeType(pub(crate) Arc<TypeInner>);

impl RuntimeType {
	#[inline]
	pub fn key(&self) -> TypeKey {
		self.0.key
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.0.name
	}

	#[inline]
	pub fn kind(&self) -> TypeKind {
		self.0.kind
	}

	#[inline]
	pub fn superclass(&self) -> Option<&RuntimeType> {
		self.0.superclass.as_ref()
	}

	#[inline]
	pub fn interfaces(&self) -> &[RuntimeType] {
		&self.0.interfaces
	}

	/// Direct supertypes: the superclass first, then interfaces in declared order.
	pub fn direct_supertypes(&self) -> impl Iterator<Item = &RuntimeType> {
		self.0.superclass.iter().chain(self.0.interfaces.iter())
	}

	/// Returns true if `self` is `other` or transitively extends/implements it.
	///
	/// Visits each supertype at most once, so shared ancestors reached along
	/// several paths cost nothing extra.
	pub fn is_subtype_of(&self, other: &RuntimeType) -> bool {
		let target = other.key();
		if self.key() == target {
			return true;
		}
		let mut seen = FxHashSet::default();
		let mut stack: Vec<&RuntimeType> = self.direct_supertypes().collect();
		while let Some(ty) = stack.pop() {
			if ty.key() == target {
				return true;
			}
			if seen.insert(ty.key()) {
				stack.extend(ty.direct_supertypes());
			}
		}
		false
	}

	/// Every transitive supertype exactly once, excluding `self`.
	///
	/// Depth-first, superclass edge before interface edges.
	pub fn ancestors(&self) -> Vec<RuntimeType> {
		let mut out: Vec<RuntimeType> = Vec::new();
		let mut seen = FxHashSet::default();
		let mut stack: Vec<&RuntimeType> = self.direct_supertypes().collect();
		stack.reverse();
		while let Some(ty) = stack.pop() {
			if !seen.insert(ty.key()) {
				continue;
			}
			out.push(ty.clone());
			let len = stack.len();
			stack.extend(ty.direct_supertypes());
			stack[len..].reverse();
		}
		out
	}

	/// Non-owning handle; does not keep this type alive.
	pub fn downgrade(&self) -> WeakType {
		WeakType {
			key: self.key(),
			inner: Arc::downgrade(&self.0),
		}
	}

	/// Number of live strong handles, including this one.
	pub fn strong_count(&self) -> usize {
		Arc::strong_count(&self.0)
	}
}

impl PartialEq for RuntimeType {
	fn eq(&self, other: &Self) -> bool {
		self.key() == other.key()
	}
}

impl Eq for RuntimeType {}

impl Hash for RuntimeType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key().hash(state);
	}
}

impl std::fmt::Debug for RuntimeType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}{}", self.kind(), self.name(), self.key())
	}
}

impl std::fmt::Display for RuntimeType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Non-owning reference to a [`RuntimeType`].
///
/// The key survives the type, so lookups keyed by it remain valid.
#[derive(Clone)]
pub struct WeakType {
	key: TypeKey,
	inner: Weak<TypeInner>,
}

impl WeakType {
	#[inline]
	pub fn key(&self) -> TypeKey {
		self.key
	}

	/// Returns the type if any strong owner is still alive.
	#[inline]
	pub fn upgrade(&self) -> Option<RuntimeType> {
		self.inner.upgrade().map(RuntimeType)
	}

	pub fn is_alive(&self) -> bool {
		self.inner.strong_count() > 0
	}
}

impl std::fmt::Debug for WeakType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.upgrade() {
			Some(ty) => write!(f, "Weak({ty:?})"),
			None => write!(f, "Weak(<reclaimed>{})", self.key),
		}
	}
}

/// Host values that expose their concrete runtime type.
pub trait Typed {
	fn runtime_type(&self) -> &RuntimeType;
}

impl<T: Typed + ?Sized> Typed for &T {
	fn runtime_type(&self) -> &RuntimeType {
		(**self).runtime_type()
	}
}

impl<T: Typed + ?Sized> Typed for Box<T> {
	fn runtime_type(&self) -> &RuntimeType {
		(**self).runtime_type()
	}
}

impl<T: Typed + ?Sized> Typed for Arc<T> {
	fn runtime_type(&self) -> &RuntimeType {
		(**self).runtime_type()
	}
}
