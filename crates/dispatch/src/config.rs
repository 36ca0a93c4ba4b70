//! Tuning knobs for dispatch escalation.
//!
//! Limits only affect the shape a site settles into, never its answers.

use serde::{Deserialize, Serialize};

use crate::DispatchError;

/// Default cap on string guard tiers before falling back to a flat lookup.
pub const DEFAULT_STRING_TIER_CAP: u32 = 32;
/// Default number of exact-type guard tiers before installing the type strategy.
pub const DEFAULT_TYPE_TIER_CAP: u32 = 8;
/// Type caches with fewer cases than this use a linear subtype scan.
pub const DEFAULT_LINEAR_CASE_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
	/// Depth at which a string site gives up on guards and settles into a
	/// hash lookup.
	pub string_tier_cap: u32,
	/// Depth at which a type site settles into its strategy.
	pub type_tier_cap: u32,
	/// Case count below which the linear subtype scan is chosen over the
	/// hierarchy cache.
	pub linear_case_limit: usize,
}

impl Default for DispatchConfig {
	fn default() -> Self {
		Self {
			string_tier_cap: DEFAULT_STRING_TIER_CAP,
			type_tier_cap: DEFAULT_TYPE_TIER_CAP,
			linear_case_limit: DEFAULT_LINEAR_CASE_LIMIT,
		}
	}
}

impl DispatchConfig {
	/// Parses a TOML document; missing keys keep their defaults.
	pub fn from_toml(src: &str) -> Result<Self, DispatchError> {
		toml::from_str(src).map_err(|e| DispatchError::Config(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_yields_defaults() {
		assert_eq!(DispatchConfig::from_toml("").unwrap(), DispatchConfig::default());
	}

	#[test]
	fn partial_document_overrides_named_keys() {
		let config = DispatchConfig::from_toml("type_tier_cap = 2\nlinear_case_limit = 0\n").unwrap();
		assert_eq!(config.type_tier_cap, 2);
		assert_eq!(config.linear_case_limit, 0);
		assert_eq!(config.string_tier_cap, DEFAULT_STRING_TIER_CAP);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = DispatchConfig::from_toml("string_tiers = 4").unwrap_err();
		assert!(matches!(err, DispatchError::Config(_)));
		assert!(err.is_construction());
	}

	#[test]
	fn wrong_value_type_is_rejected() {
		assert!(DispatchConfig::from_toml("string_tier_cap = \"many\"").is_err());
	}
}
