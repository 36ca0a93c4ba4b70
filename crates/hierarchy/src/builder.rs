use std::sync::Arc;

use smallvec::SmallVec;

use crate::ty::TypeInner;
use crate::{RuntimeType, TypeKey, TypeKind};

/// Builds a [`RuntimeType`] with its direct supertype edges.
///
/// ```
/// use caseswitch_hierarchy::RuntimeType;
///
/// let animal = RuntimeType::interface("Animal").build();
/// let dog = RuntimeType::class("Dog").implements(&animal).build();
/// assert!(dog.is_subtype_of(&animal));
/// ```
#[must_use]
pub struct TypeBuilder {
	name: Box<str>,
	kind: TypeKind,
	superclass: Option<RuntimeType>,
	interfaces: SmallVec<[RuntimeType; 2]>,
}

impl RuntimeType {
	pub fn class(name: impl Into<Box<str>>) -> TypeBuilder {
		TypeBuilder::new(name, TypeKind::Class)
	}

	pub fn interface(name: impl Into<Box<str>>) -> TypeBuilder {
		TypeBuilder::new(name, TypeKind::Interface)
	}
}

impl TypeBuilder {
	pub fn new(name: impl Into<Box<str>>, kind: TypeKind) -> Self {
		Self {
			name: name.into(),
			kind,
			superclass: None,
			interfaces: SmallVec::new(),
		}
	}

	/// Sets the superclass, replacing any previous one.
	///
	/// Interfaces have no superclass; on an interface builder the edge is
	/// recorded as an extended interface instead.
	pub fn extends(mut self, parent: &RuntimeType) -> Self {
		match self.kind {
			TypeKind::Class => self.superclass = Some(parent.clone()),
			TypeKind::Interface => self.push_interface(parent),
		}
		self
	}

	/// Adds a directly implemented (or, for interfaces, extended) interface.
	pub fn implements(mut self, iface: &RuntimeType) -> Self {
		self.push_interface(iface);
		self
	}

	fn push_interface(&mut self, iface: &RuntimeType) {
		if !self.interfaces.iter().any(|i| i.key() == iface.key()) {
			self.interfaces.push(iface.clone());
		}
	}

	pub fn build(self) -> RuntimeType {
		RuntimeType(Arc::new(TypeInner {
			key: TypeKey::next(),
			name: self.name,
			kind: self.kind,
			superclass: self.superclass,
			interfaces: self.interfaces,
		}))
	}
}
