use crate::{RuntimeType, TypeKind};

struct Lattice {
	object: RuntimeType,
	comparable: RuntimeType,
	char_sequence: RuntimeType,
	string: RuntimeType,
	integer: RuntimeType,
}

fn lattice() -> Lattice {
	let object = RuntimeType::class("Object").build();
	let comparable = RuntimeType::interface("Comparable").build();
	let char_sequence = RuntimeType::interface("CharSequence").build();
	let string = RuntimeType::class("String")
		.extends(&object)
		.implements(&char_sequence)
		.implements(&comparable)
		.build();
	let number = RuntimeType::class("Number").extends(&object).build();
	let integer = RuntimeType::class("Integer")
		.extends(&number)
		.implements(&comparable)
		.build();
	Lattice {
		object,
		comparable,
		char_sequence,
		string,
		integer,
	}
}

#[test]
fn subtype_is_reflexive_and_transitive() {
	let l = lattice();
	assert!(l.string.is_subtype_of(&l.string));
	assert!(l.string.is_subtype_of(&l.object));
	assert!(l.integer.is_subtype_of(&l.object));
	assert!(l.integer.is_subtype_of(&l.comparable));
	assert!(!l.integer.is_subtype_of(&l.char_sequence));
	assert!(!l.object.is_subtype_of(&l.string));
}

#[test]
fn ancestors_visit_superclass_first_without_duplicates() {
	let l = lattice();
	let names: Vec<_> = l
		.integer
		.ancestors()
		.iter()
		.map(|t| t.name().to_owned())
		.collect();
	assert_eq!(names, ["Number", "Object", "Comparable"]);

	let shared = RuntimeType::interface("Shared").build();
	let left = RuntimeType::interface("Left").extends(&shared).build();
	let right = RuntimeType::interface("Right").extends(&shared).build();
	let diamond = RuntimeType::class("Diamond")
		.implements(&left)
		.implements(&right)
		.build();
	let names: Vec<_> = diamond
		.ancestors()
		.iter()
		.map(|t| t.name().to_owned())
		.collect();
	assert_eq!(names, ["Left", "Shared", "Right"]);
}

#[test]
fn interface_extends_records_interface_edge() {
	let base = RuntimeType::interface("Base").build();
	let derived = RuntimeType::interface("Derived").extends(&base).build();
	assert_eq!(derived.kind(), TypeKind::Interface);
	assert!(derived.superclass().is_none());
	assert_eq!(derived.interfaces(), [base]);
}

#[test]
fn same_name_types_are_distinct() {
	let a = RuntimeType::class("Dog").build();
	let b = RuntimeType::class("Dog").build();
	assert_ne!(a, b);
	assert_ne!(a.key(), b.key());
	assert_eq!(a, a.clone());
}

#[test]
fn weak_handle_does_not_pin_type() {
	let ty = RuntimeType::class("Ephemeral").build();
	let weak = ty.downgrade();
	let key = ty.key();
	assert!(weak.is_alive());
	assert_eq!(weak.upgrade().map(|t| t.key()), Some(key));

	drop(ty);
	assert!(!weak.is_alive());
	assert!(weak.upgrade().is_none());
	assert_eq!(weak.key(), key);
}

#[test]
fn subtype_keeps_supertypes_alive() {
	let base = RuntimeType::class("Base").build();
	let weak_base = base.downgrade();
	let derived = RuntimeType::class("Derived").extends(&base).build();
	drop(base);
	assert!(weak_base.is_alive());
	drop(derived);
	assert!(!weak_base.is_alive());
}

/// Stacks `levels` interface diamonds: each join extends a left and a right
/// interface that both extend the previous join.
fn diamond_tower(levels: usize) -> (RuntimeType, Vec<RuntimeType>) {
	let root = RuntimeType::interface("Root").build();
	let mut types = vec![root.clone()];
	let mut join = root.clone();
	for level in 0..levels {
		let left = RuntimeType::interface(format!("L{level}")).extends(&join).build();
		let right = RuntimeType::interface(format!("R{level}")).extends(&join).build();
		join = RuntimeType::interface(format!("J{level}")).extends(&left).extends(&right).build();
		types.extend([left, right, join.clone()]);
	}
	(root, types)
}

#[test]
fn deep_diamonds_visit_each_supertype_once() {
	let (root, types) = diamond_tower(64);
	let leaf = RuntimeType::class("Leaf").implements(types.last().unwrap()).build();
	let unrelated = RuntimeType::interface("Unrelated").build();

	assert!(leaf.is_subtype_of(&root));
	assert!(!leaf.is_subtype_of(&unrelated));
	assert_eq!(leaf.ancestors().len(), types.len());
}

#[test]
fn keys_increase_in_build_order() {
	let first = RuntimeType::class("First").build();
	let second = RuntimeType::class("Second").build();
	assert!(first.key() < second.key());
	let shown = first.key().to_string();
	assert!(shown.starts_with('#'), "{shown}");
	assert_eq!(format!("{:?}", first), format!("class First{shown}"));
}
