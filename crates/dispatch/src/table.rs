//! Immutable case tables and their construction-time validation.
//!
//! # Invariants
//!
//! - String cases are pairwise distinct.
//! - Type cases respect the specificity partial order: no case is an
//!   ancestor-or-self of a case declared after it.
//! - Type tables hold only [`WeakType`]s and [`TypeKey`]s, never strong handles.

use std::collections::hash_map::Entry;

use caseswitch_hierarchy::{RuntimeType, TypeKey, WeakType};
use rustc_hash::FxHashMap;

use crate::{DispatchError, NO_MATCH};

/// Ordered distinct strings with a precomputed string → index map.
#[derive(Debug)]
pub struct StringTable {
	cases: Box<[Box<str>]>,
	index: FxHashMap<Box<str>, i32>,
}

impl StringTable {
	pub fn new<I, S>(cases: I) -> Result<Self, DispatchError>
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		Self::from_nullable(cases.into_iter().map(Some))
	}

	/// Like [`StringTable::new`] but rejects `None` elements with
	/// [`DispatchError::NullCase`].
	pub fn from_nullable<I, S>(cases: I) -> Result<Self, DispatchError>
	where
		I: IntoIterator<Item = Option<S>>,
		S: Into<Box<str>>,
	{
		let mut list: Vec<Box<str>> = Vec::new();
		let mut index: FxHashMap<Box<str>, i32> = FxHashMap::default();
		for (i, case) in cases.into_iter().enumerate() {
			let case: Box<str> = case.ok_or(DispatchError::NullCase { index: i })?.into();
			match index.entry(case.clone()) {
				Entry::Occupied(slot) => {
					return Err(DispatchError::DuplicateCase {
						case: case.into_string(),
						first: *slot.get() as usize,
						second: i,
					});
				}
				Entry::Vacant(slot) => {
					slot.insert(i as i32);
				}
			}
			list.push(case);
		}
		Ok(Self {
			cases: list.into_boxed_slice(),
			index,
		})
	}

	/// Index of the case equal to `value`, or [`NO_MATCH`].
	#[inline]
	pub fn index_of(&self, value: &str) -> i32 {
		self.index.get(value).copied().unwrap_or(NO_MATCH)
	}

	pub fn cases(&self) -> &[Box<str>] {
		&self.cases
	}

	pub fn len(&self) -> usize {
		self.cases.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cases.is_empty()
	}
}

/// Ordered type cases, most specific first, held without ownership.
#[derive(Debug)]
pub struct TypeTable {
	cases: Box<[WeakType]>,
	names: Box<[Box<str>]>,
	by_key: FxHashMap<TypeKey, i32>,
}

impl TypeTable {
	pub fn new(cases: &[RuntimeType]) -> Result<Self, DispatchError> {
		validate_partial_order(cases)?;
		Ok(Self {
			cases: cases.iter().map(RuntimeType::downgrade).collect(),
			names: cases.iter().map(|c| Box::from(c.name())).collect(),
			by_key: cases.iter().map(RuntimeType::key).zip(0..).collect(),
		})
	}

	/// Index of the case that is exactly `key`, if any.
	#[inline]
	pub fn case_index(&self, key: TypeKey) -> Option<i32> {
		self.by_key.get(&key).copied()
	}

	pub fn cases(&self) -> &[WeakType] {
		&self.cases
	}

	/// Case names as declared, available even after a case was reclaimed.
	pub fn names(&self) -> &[Box<str>] {
		&self.names
	}

	pub fn len(&self) -> usize {
		self.cases.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cases.is_empty()
	}
}

/// Rejects case lists where a case is an ancestor-or-self of a later case.
///
/// Cases are visited last to first. Each case claims itself and every ancestor
/// not yet claimed; a case that finds itself already claimed is shadowing the
/// later case that claimed it.
pub fn validate_partial_order(cases: &[RuntimeType]) -> Result<(), DispatchError> {
	if cases.len() < 2 {
		return Ok(());
	}
	let mut claims: FxHashMap<TypeKey, usize> = FxHashMap::default();
	for (i, case) in cases.iter().enumerate().rev() {
		match claims.entry(case.key()) {
			Entry::Occupied(slot) => {
				let later = *slot.get();
				return Err(DispatchError::OrderViolation {
					general: case.name().to_owned(),
					general_index: i,
					specific: cases[later].name().to_owned(),
					specific_index: later,
				});
			}
			Entry::Vacant(slot) => {
				slot.insert(i);
			}
		}
		claim_ancestors(&mut claims, case, i);
	}
	Ok(())
}

fn claim_ancestors(claims: &mut FxHashMap<TypeKey, usize>, ty: &RuntimeType, owner: usize) {
	for sup in ty.direct_supertypes() {
		if let Entry::Vacant(slot) = claims.entry(sup.key()) {
			slot.insert(owner);
			claim_ancestors(claims, sup, owner);
		}
	}
}
