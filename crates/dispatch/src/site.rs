//! Self-rewriting dispatch sites.
//!
//! # Mental model
//!
//! * A [`DispatchSite`] is an atomically swappable [`Target`]. Callers only ever
//!   invoke the top site (depth 0).
//! * A fresh site holds [`Target::Fallback`]. Invoking it runs the policy's
//!   [`Retarget::fallback`]. It computes the answer the slow way and may
//!   install a new target somewhere in the chain before returning it.
//! * Growth installs a [`Target::Guard`] at the missing site: one exact key test
//!   whose failure path is a new, deeper site. Settling installs a
//!   [`Target::Terminal`] at the top site, which drops the whole guard chain.
//!
//! # Concurrency & ordering
//!
//! * Reads are lock-free: one `ArcSwap` load per visited tier.
//! * Targets are built completely before they are published with a single
//!   compare-and-swap, so readers see either the old or the new target.
//! * [`DispatchSite::extend`] only replaces a `Fallback`. Two callers missing on
//!   the same tier race; the loser's guard is discarded and its key simply
//!   misses again later. Answers never depend on which target won.
//! * [`DispatchSite::settle`] never replaces a terminal, so once the top site
//!   settled a stale caller cannot restart warming there.
//!
//! The top site is threaded through every invocation instead of being stored
//! as a back-pointer in each tier, so the chain holds no reference cycles.

use std::sync::Arc;

use arc_swap::ArcSwap;

/// Policy driving one family of dispatch sites.
pub trait Retarget: Sized + Send + Sync + 'static {
	type Input: ?Sized;
	/// Key tested by a single guard tier.
	type Key: Send + Sync;
	/// Permanent evaluator installed at the top site.
	type Terminal: Send + Sync;

	/// Exact guard test for one tier.
	fn test(key: &Self::Key, value: &Self::Input) -> bool;

	fn eval_terminal(&self, terminal: &Self::Terminal, value: &Self::Input) -> i32;

	fn terminal_shape(&self, terminal: &Self::Terminal) -> SiteShape;

	/// Slow path for a miss at `site`. Must return the correct answer for
	/// `value` and may extend `site` or settle `top`.
	fn fallback(&self, site: &DispatchSite<Self>, top: &DispatchSite<Self>, value: &Self::Input) -> i32;
}

/// Current evaluation strategy of one site.
pub enum Target<R: Retarget> {
	Fallback,
	Guard(Guard<R>),
	Terminal(R::Terminal),
}

/// Single-test tier: `if value == key { index } else { next(value) }`.
pub struct Guard<R: Retarget> {
	key: R::Key,
	index: i32,
	next: DispatchSite<R>,
}

impl<R: Retarget> Guard<R> {
	pub fn new(key: R::Key, index: i32, next: DispatchSite<R>) -> Self {
		Self { key, index, next }
	}
}

/// Observable shape of a dispatch site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteShape {
	/// Still specializing; `tiers` guards are linked in front of the fallback.
	Warming { tiers: usize },
	/// Settled into the declared-order string guard chain.
	GuardChain,
	/// Settled into a flat string → index lookup.
	Lookup,
	/// Settled into an ordered subtype scan over the type cases.
	LinearScan,
	/// Settled into the memoizing per-type hierarchy cache.
	HierarchyCache,
}

impl SiteShape {
	pub fn is_settled(self) -> bool {
		!matches!(self, Self::Warming { .. })
	}
}

pub struct DispatchSite<R: Retarget> {
	target: ArcSwap<Target<R>>,
	depth: u32,
}

impl<R: Retarget> DispatchSite<R> {
	pub fn new(depth: u32) -> Self {
		Self {
			target: ArcSwap::from_pointee(Target::Fallback),
			depth,
		}
	}

	#[inline]
	pub fn depth(&self) -> u32 {
		self.depth
	}

	/// Evaluates this site for `value`. `top` must be the depth-0 site of the
	/// same chain (for the top site itself, `top` is `self`).
	#[inline]
	pub fn invoke(&self, policy: &R, top: &DispatchSite<R>, value: &R::Input) -> i32 {
		let target = self.target.load();
		match &**target {
			Target::Guard(guard) => {
				if R::test(&guard.key, value) {
					guard.index
				} else {
					guard.next.invoke(policy, top, value)
				}
			}
			Target::Terminal(terminal) => policy.eval_terminal(terminal, value),
			Target::Fallback => policy.fallback(self, top, value),
		}
	}

	/// Links `guard` in front of this site if it still holds
	/// [`Target::Fallback`]. Returns false when another caller already
	/// retargeted it, including a settle at the top site.
	pub fn extend(&self, guard: Guard<R>) -> bool {
		let current = self.target.load_full();
		if !matches!(*current, Target::Fallback) {
			return false;
		}
		let prev = self.target.compare_and_swap(&current, Arc::new(Target::Guard(guard)));
		Arc::ptr_eq(&prev, &current)
	}

	/// Installs the permanent evaluator. A site that is already terminal is
	/// never replaced; returns false in that case.
	pub fn settle(&self, terminal: R::Terminal) -> bool {
		let settled = Arc::new(Target::Terminal(terminal));
		loop {
			let current = self.target.load_full();
			if matches!(*current, Target::Terminal(_)) {
				return false;
			}
			let prev = self.target.compare_and_swap(&current, Arc::clone(&settled));
			if Arc::ptr_eq(&prev, &current) {
				return true;
			}
		}
	}

	pub fn shape(&self, policy: &R) -> SiteShape {
		let mut tiers = 0;
		let mut current = self.target.load_full();
		loop {
			let next = match &*current {
				Target::Terminal(terminal) if tiers == 0 => return policy.terminal_shape(terminal),
				Target::Guard(guard) => guard.next.target.load_full(),
				Target::Terminal(_) | Target::Fallback => return SiteShape::Warming { tiers },
			};
			tiers += 1;
			current = next;
		}
	}
}
