/// Errors raised while building or invoking a dispatch cache.
///
/// Construction errors are permanent: no partially usable cache is returned.
/// [`DispatchError::NullInput`] is per call and leaves the cache untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
	/// A case list contained a null element.
	#[error("case at index {index} is null")]
	NullCase { index: usize },

	/// The same string was declared twice.
	#[error("duplicate case {case:?}: declared at index {first} and again at {second}")]
	DuplicateCase {
		case: String,
		first: usize,
		second: usize,
	},

	/// A more general type case is declared before a more specific one it
	/// would shadow.
	#[error(
		"case {specific} (index {specific_index}) matches a subtype of what case {general} \
		 (index {general_index}) matches but is located after it"
	)]
	OrderViolation {
		general: String,
		general_index: usize,
		specific: String,
		specific_index: usize,
	},

	/// Null was presented to a cache that does not accept null.
	#[error("null input presented to a dispatch that does not accept null")]
	NullInput,

	/// A configuration document could not be parsed.
	#[error("invalid dispatch config: {0}")]
	Config(String),
}

impl DispatchError {
	/// Returns true for errors that abort cache construction.
	pub fn is_construction(&self) -> bool {
		matches!(
			self,
			Self::NullCase { .. }
				| Self::DuplicateCase { .. }
				| Self::OrderViolation { .. }
				| Self::Config(_)
		)
	}
}
