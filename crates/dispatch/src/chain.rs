//! First-match-wins guard chains.

/// Ordered `(key, index)` arms terminated by a default index.
///
/// The chain is immutable once built; evaluation walks the arms front to back
/// and returns the index of the first arm whose key passes the caller's test.
#[derive(Debug, Clone)]
pub struct GuardChain<K> {
	arms: Box<[(K, i32)]>,
	default: i32,
}

impl<K> GuardChain<K> {
	pub fn new(arms: impl IntoIterator<Item = (K, i32)>, default: i32) -> Self {
		Self {
			arms: arms.into_iter().collect(),
			default,
		}
	}

	/// Builds a chain whose arm `i` maps to index `i`.
	pub fn declared(keys: impl IntoIterator<Item = K>, default: i32) -> Self {
		Self::new(keys.into_iter().zip(0..), default)
	}

	#[inline]
	pub fn eval(&self, mut test: impl FnMut(&K) -> bool) -> i32 {
		self.arms
			.iter()
			.find(|(key, _)| test(key))
			.map_or(self.default, |&(_, index)| index)
	}

	pub fn len(&self) -> usize {
		self.arms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.arms.is_empty()
	}

	pub fn default_index(&self) -> i32 {
		self.default
	}

	pub fn arms(&self) -> impl Iterator<Item = (&K, i32)> {
		self.arms.iter().map(|(key, index)| (key, *index))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::NO_MATCH;

	#[test]
	fn first_matching_arm_wins() {
		let chain = GuardChain::new([("a", 3), ("b", 7), ("a", 9)], NO_MATCH);
		assert_eq!(chain.eval(|k| *k == "a"), 3);
		assert_eq!(chain.eval(|k| *k == "b"), 7);
		assert_eq!(chain.eval(|k| *k == "z"), NO_MATCH);
	}

	#[test]
	fn declared_chain_numbers_arms_in_order() {
		let chain = GuardChain::declared(["x", "y", "z"], NO_MATCH);
		assert_eq!(chain.len(), 3);
		let indices: Vec<_> = chain.arms().map(|(_, i)| i).collect();
		assert_eq!(indices, [0, 1, 2]);
		assert_eq!(chain.eval(|k| *k == "z"), 2);
	}

	#[test]
	fn empty_chain_returns_default() {
		let chain = GuardChain::<&str>::declared([], NO_MATCH);
		assert!(chain.is_empty());
		assert_eq!(chain.eval(|_| true), NO_MATCH);
		assert_eq!(chain.default_index(), NO_MATCH);
	}

	#[test]
	fn evaluation_stops_at_first_match() {
		let chain = GuardChain::declared([1, 2, 3, 4], NO_MATCH);
		let mut tested = Vec::new();
		let index = chain.eval(|k| {
			tested.push(*k);
			*k == 2
		});
		assert_eq!(index, 1);
		assert_eq!(tested, [1, 2]);
	}
}
