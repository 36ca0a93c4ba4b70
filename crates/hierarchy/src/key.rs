use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of a runtime type.
///
/// Keys are handed out monotonically and never reused, so a key outliving its
/// type can never alias a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey(u64);

impl TypeKey {
	pub(crate) fn next() -> Self {
		Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
	}
}

impl std::fmt::Display for TypeKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}
