//! Type dispatch cache.
//!
//! Maps a value's runtime type to the first case that is an ancestor-or-self
//! of it. The top site first grows one exact-type guard per distinct concrete
//! type observed; once the tier cap is reached it settles into the
//! strategy chosen at construction.
//!
//! Guard keys are [`TypeKey`]s and the strategies hold [`WeakType`]s, so a
//! dispatch never keeps a type alive.

use caseswitch_hierarchy::{RuntimeType, TypeKey, Typed, WeakType};

use crate::site::{DispatchSite, Guard, Retarget, SiteShape};
use crate::table::TypeTable;
use crate::{DispatchConfig, DispatchError, NULL_MATCH};

mod strategy;


use strategy::Strategy;

pub(crate) struct TypeRetarget {
	strategy: Strategy,
	tier_cap: u32,
}

impl Retarget for TypeRetarget {
	type Input = RuntimeType;
	type Key = TypeKey;
	type Terminal = ();

	#[inline]
	fn test(key: &TypeKey, value: &RuntimeType) -> bool {
		*key == value.key()
	}

	fn eval_terminal(&self, _: &(), value: &RuntimeType) -> i32 {
		self.strategy.index(value)
	}

	fn terminal_shape(&self, _: &()) -> SiteShape {
		self.strategy.shape()
	}

	fn fallback(&self, site: &DispatchSite<Self>, top: &DispatchSite<Self>, value: &RuntimeType) -> i32 {
		let index = self.strategy.index(value);
		let depth = site.depth();
		if depth >= self.tier_cap {
			tracing::debug!(depth, shape = ?self.strategy.shape(), "type dispatch settled into strategy");
			top.settle(());
		} else {
			tracing::trace!(depth, index, ty = value.name(), "type dispatch grew guard tier");
			let next = DispatchSite::new(depth + 1);
			site.extend(Guard::new(value.key(), index, next));
		}
		index
	}
}

/// Classifies values by runtime type against ordered, most-specific-first
/// type cases.
///
/// ```
/// use caseswitch_dispatch::{NO_MATCH, NULL_MATCH, TypeDispatch};
/// use caseswitch_hierarchy::{RuntimeType, Typed};
///
/// struct Pet(RuntimeType);
/// impl Typed for Pet {
/// 	fn runtime_type(&self) -> &RuntimeType {
/// 		&self.0
/// 	}
/// }
///
/// let dog = RuntimeType::class("Dog").build();
/// let cat = RuntimeType::class("Cat").build();
/// let pets = TypeDispatch::create(true, &[dog.clone(), cat.clone()])?;
/// assert_eq!(pets.classify(Some(&Pet(cat)))?, 1);
/// assert_eq!(pets.classify(Some(&Pet(RuntimeType::class("Fox").build())))?, NO_MATCH);
/// assert_eq!(pets.classify(None::<&Pet>)?, NULL_MATCH);
/// # Ok::<(), caseswitch_dispatch::DispatchError>(())
/// ```
pub struct TypeDispatch {
	allow_null: bool,
	table: TypeTable,
	policy: TypeRetarget,
	top: DispatchSite<TypeRetarget>,
}

impl TypeDispatch {
	/// # Errors
	///
	/// [`DispatchError::OrderViolation`] if a case is an ancestor-or-self of a
	/// case declared after it.
	pub fn create(allow_null: bool, cases: &[RuntimeType]) -> Result<Self, DispatchError> {
		Self::with_config(&DispatchConfig::default(), allow_null, cases)
	}

	pub fn with_config(
		config: &DispatchConfig,
		allow_null: bool,
		cases: &[RuntimeType],
	) -> Result<Self, DispatchError> {
		let table = TypeTable::new(cases)?;
		let strategy = Strategy::select(config, &table);
		tracing::debug!(
			cases = table.len(),
			allow_null,
			strategy = ?strategy.shape(),
			tier_cap = config.type_tier_cap,
			"type dispatch created"
		);
		Ok(Self {
			allow_null,
			table,
			policy: TypeRetarget {
				strategy,
				tier_cap: config.type_tier_cap,
			},
			top: DispatchSite::new(0),
		})
	}

	/// Returns the index of the first case matching the runtime type of
	/// `value`, [`NO_MATCH`](crate::NO_MATCH), or [`NULL_MATCH`] for `None`
	/// when null is allowed.
	///
	/// # Errors
	///
	/// [`DispatchError::NullInput`] for `None` when null is not allowed.
	#[inline]
	pub fn classify<V: Typed + ?Sized>(&self, value: Option<&V>) -> Result<i32, DispatchError> {
		match value {
			Some(value) => Ok(self.classify_type(value.runtime_type())),
			None if self.allow_null => Ok(NULL_MATCH),
			None => Err(DispatchError::NullInput),
		}
	}

	/// Classifies a concrete runtime type directly.
	#[inline]
	pub fn classify_type(&self, ty: &RuntimeType) -> i32 {
		self.top.invoke(&self.policy, &self.top, ty)
	}

	pub fn allows_null(&self) -> bool {
		self.allow_null
	}

	/// Non-owning handles to the declared cases, in declared order.
	pub fn cases(&self) -> &[WeakType] {
		self.table.cases()
	}

	/// Declared case names; cases themselves are not kept alive.
	pub fn case_names(&self) -> &[Box<str>] {
		self.table.names()
	}

	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Current shape of the top-level dispatch site.
	pub fn shape(&self) -> SiteShape {
		self.top.shape(&self.policy)
	}

	/// Strategy the site settles into once the tier cap is reached.
	pub fn strategy_shape(&self) -> SiteShape {
		self.policy.strategy.shape()
	}
}

impl std::fmt::Debug for TypeDispatch {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TypeDispatch")
			.field("allow_null", &self.allow_null)
			.field("cases", &self.case_names())
			.field("shape", &self.shape())
			.finish()
	}
}
