//! String dispatch cache.
//!
//! Maps a string to the index of the equal case, specializing on observed
//! inputs:
//!
//! 1. Each distinct miss at depth `d` installs a guard `value == observed` at
//!    that tier, deferring to a fresh tier `d + 1`.
//! 2. When `d` reaches the case count, the top site settles into a guard chain
//!    over the cases in declared order.
//! 3. When `d` reaches the tier cap first (many distinct inputs), the top site
//!    settles into a flat hash lookup.

use crate::chain::GuardChain;
use crate::site::{DispatchSite, Guard, Retarget, SiteShape};
use crate::table::StringTable;
use crate::{DispatchConfig, DispatchError, NO_MATCH, NULL_MATCH};


pub(crate) enum StringTerminal {
	Chain(GuardChain<Box<str>>),
	Lookup,
}

pub(crate) struct StringRetarget {
	table: StringTable,
	tier_cap: u32,
}

impl Retarget for StringRetarget {
	type Input = str;
	type Key = Box<str>;
	type Terminal = StringTerminal;

	#[inline]
	fn test(key: &Box<str>, value: &str) -> bool {
		**key == *value
	}

	fn eval_terminal(&self, terminal: &StringTerminal, value: &str) -> i32 {
		match terminal {
			StringTerminal::Chain(chain) => chain.eval(|case| **case == *value),
			StringTerminal::Lookup => self.table.index_of(value),
		}
	}

	fn terminal_shape(&self, terminal: &StringTerminal) -> SiteShape {
		match terminal {
			StringTerminal::Chain(_) => SiteShape::GuardChain,
			StringTerminal::Lookup => SiteShape::Lookup,
		}
	}

	fn fallback(&self, site: &DispatchSite<Self>, top: &DispatchSite<Self>, value: &str) -> i32 {
		let index = self.table.index_of(value);
		let depth = site.depth();
		if depth >= self.tier_cap {
			tracing::debug!(depth, cases = self.table.len(), "string dispatch settled into lookup");
			top.settle(StringTerminal::Lookup);
		} else if depth as usize == self.table.len() {
			tracing::debug!(depth, "string dispatch settled into declared guard chain");
			let chain = GuardChain::declared(self.table.cases().iter().cloned(), NO_MATCH);
			top.settle(StringTerminal::Chain(chain));
		} else {
			tracing::trace!(depth, index, "string dispatch grew guard tier");
			let next = DispatchSite::new(depth + 1);
			site.extend(Guard::new(value.into(), index, next));
		}
		index
	}
}

/// Classifies strings against a fixed, ordered list of distinct cases.
///
/// ```
/// use caseswitch_dispatch::{NO_MATCH, NULL_MATCH, StringDispatch};
///
/// let owners = StringDispatch::create(true, ["bernie the dog", "zara the cat"])?;
/// assert_eq!(owners.classify(Some("zara the cat"))?, 1);
/// assert_eq!(owners.classify(Some("rex"))?, NO_MATCH);
/// assert_eq!(owners.classify(None)?, NULL_MATCH);
/// # Ok::<(), caseswitch_dispatch::DispatchError>(())
/// ```
pub struct StringDispatch {
	allow_null: bool,
	policy: StringRetarget,
	top: DispatchSite<StringRetarget>,
}

impl StringDispatch {
	pub fn create<I, S>(allow_null: bool, cases: I) -> Result<Self, DispatchError>
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		Self::with_config(&DispatchConfig::default(), allow_null, cases)
	}

	pub fn with_config<I, S>(config: &DispatchConfig, allow_null: bool, cases: I) -> Result<Self, DispatchError>
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		Ok(Self::from_table(config, allow_null, StringTable::new(cases)?))
	}

	/// Builds a cache from cases that may contain nulls, rejecting the first
	/// null with [`DispatchError::NullCase`].
	///
	/// Uses [`DispatchConfig::default`]; build with [`Self::with_config`] once
	/// the cases are known to be non-null to tune the limits.
	pub fn from_nullable<I, S>(allow_null: bool, cases: I) -> Result<Self, DispatchError>
	where
		I: IntoIterator<Item = Option<S>>,
		S: Into<Box<str>>,
	{
		let table = StringTable::from_nullable(cases)?;
		Ok(Self::from_table(&DispatchConfig::default(), allow_null, table))
	}

	fn from_table(config: &DispatchConfig, allow_null: bool, table: StringTable) -> Self {
		tracing::debug!(
			cases = table.len(),
			allow_null,
			tier_cap = config.string_tier_cap,
			"string dispatch created"
		);
		Self {
			allow_null,
			policy: StringRetarget {
				table,
				tier_cap: config.string_tier_cap,
			},
			top: DispatchSite::new(0),
		}
	}

	/// Returns the index of the case equal to `value`, [`NO_MATCH`], or
	/// [`NULL_MATCH`] for `None` when null is allowed.
	///
	/// # Errors
	///
	/// [`DispatchError::NullInput`] for `None` when null is not allowed.
	#[inline]
	pub fn classify(&self, value: Option<&str>) -> Result<i32, DispatchError> {
		match value {
			Some(value) => Ok(self.classify_str(value)),
			None if self.allow_null => Ok(NULL_MATCH),
			None => Err(DispatchError::NullInput),
		}
	}

	/// Non-null path of [`StringDispatch::classify`].
	#[inline]
	pub fn classify_str(&self, value: &str) -> i32 {
		self.top.invoke(&self.policy, &self.top, value)
	}

	pub fn allows_null(&self) -> bool {
		self.allow_null
	}

	pub fn cases(&self) -> &[Box<str>] {
		self.policy.table.cases()
	}

	pub fn len(&self) -> usize {
		self.policy.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.policy.table.is_empty()
	}

	/// Current shape of the top-level dispatch site.
	pub fn shape(&self) -> SiteShape {
		self.top.shape(&self.policy)
	}
}

impl std::fmt::Debug for StringDispatch {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StringDispatch")
			.field("allow_null", &self.allow_null)
			.field("cases", &self.cases())
			.field("shape", &self.shape())
			.finish()
	}
}
