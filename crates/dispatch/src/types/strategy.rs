//! Type-resolution strategies installed once a type site settles.

use caseswitch_hierarchy::{RuntimeType, TypeKey, WeakType};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::chain::GuardChain;
use crate::site::SiteShape;
use crate::table::TypeTable;
use crate::{DispatchConfig, NO_MATCH};

/// Resolution strategy, chosen once from the case count.
pub(crate) enum Strategy {
	/// Ordered subtype test per case. Reclaimed cases never match.
	Linear(GuardChain<WeakType>),
	Hierarchy(HierarchyCache),
}

impl Strategy {
	pub(crate) fn select(config: &DispatchConfig, table: &TypeTable) -> Self {
		if table.len() < config.linear_case_limit {
			Self::Linear(GuardChain::declared(table.cases().iter().cloned(), NO_MATCH))
		} else {
			Self::Hierarchy(HierarchyCache::new(table))
		}
	}

	pub(crate) fn index(&self, ty: &RuntimeType) -> i32 {
		match self {
			Self::Linear(chain) => chain.eval(|case| case.upgrade().is_some_and(|case| ty.is_subtype_of(&case))),
			Self::Hierarchy(cache) => cache.index(ty),
		}
	}

	pub(crate) fn shape(&self) -> SiteShape {
		match self {
			Self::Linear(_) => SiteShape::LinearScan,
			Self::Hierarchy(_) => SiteShape::HierarchyCache,
		}
	}
}

/// Memo size below which dead entries are never swept.
const SWEEP_FLOOR: usize = 64;

/// Memoized concrete type → index resolution.
///
/// A type's index is its own case index if it is a case, otherwise the
/// smallest non-[`NO_MATCH`] index among its direct supertypes. Every type
/// visited on the way is memoized by [`TypeKey`] next to a [`WeakType`], so
/// the memo never keeps a type alive and entries of reclaimed types are swept
/// out on insert.
///
/// Concurrent first resolutions of the same type may both compute it; the
/// answer is deterministic so either insert is correct.
pub(crate) struct HierarchyCache {
	cases: FxHashMap<TypeKey, i32>,
	resolved: RwLock<Memo>,
}

#[derive(Default)]
struct Memo {
	entries: FxHashMap<TypeKey, (WeakType, i32)>,
	/// Live entries left by the last sweep.
	swept: usize,
}

impl Memo {
	fn insert(&mut self, ty: &RuntimeType, index: i32) {
		if self.entries.len() >= (self.swept * 2).max(SWEEP_FLOOR) {
			let before = self.entries.len();
			self.entries.retain(|_, (weak, _)| weak.is_alive());
			self.swept = self.entries.len();
			tracing::trace!(before, after = self.swept, "hierarchy memo swept reclaimed types");
		}
		self.entries.insert(ty.key(), (ty.downgrade(), index));
	}
}

impl HierarchyCache {
	pub(crate) fn new(table: &TypeTable) -> Self {
		Self {
			cases: table.cases().iter().map(WeakType::key).zip(0..).collect(),
			resolved: RwLock::default(),
		}
	}

	pub(crate) fn index(&self, ty: &RuntimeType) -> i32 {
		let key = ty.key();
		if let Some(&index) = self.cases.get(&key) {
			return index;
		}
		let cached = self.resolved.read().entries.get(&key).map(|&(_, index)| index);
		if let Some(index) = cached {
			return index;
		}
		let index = ty
			.direct_supertypes()
			.map(|sup| self.index(sup))
			.filter(|&index| index != NO_MATCH)
			.min()
			.unwrap_or(NO_MATCH);
		self.resolved.write().insert(ty, index);
		index
	}

	/// Number of memoized non-case types.
	#[cfg(test)]
	pub(crate) fn resolved_len(&self) -> usize {
		self.resolved.read().entries.len()
	}
}
