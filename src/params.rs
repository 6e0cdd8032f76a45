//! Reserved-parameter filtering for caller-supplied overlays.
//!
//! Overlays are merged after the protocol fields have been written, so anything that reached
//! the sink would overwrite the protocol value. Filtering through [`ReservedParams`] keeps the
//! protocol-controlled keys out of the sink regardless of the overlay's iteration order.

// std
use std::collections::HashSet;
// self
use crate::_prelude::*;

/// Protocol keys that overlays may never override.
pub const BASE_RESERVED_PARAMS: [&str; 5] =
	["client_id", "client_secret", "redirect_uri", "code", "refresh_token"];

/// Set of parameter names shielded from overlay parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservedParams(HashSet<String>);
impl ReservedParams {
	/// Returns the base protocol set ([`BASE_RESERVED_PARAMS`]).
	pub fn base() -> Self {
		Self(BASE_RESERVED_PARAMS.iter().map(|key| (*key).to_owned()).collect())
	}

	/// Returns the base protocol set extended with `extra` keys.
	pub fn with_extra<I, S>(extra: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut reserved = Self::base();

		reserved.0.extend(extra.into_iter().map(Into::into));

		reserved
	}

	/// Checks whether `key` is reserved.
	pub fn contains(&self, key: &str) -> bool {
		self.0.contains(key)
	}

	/// Number of reserved keys.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when nothing is reserved.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over the reserved keys in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

/// Feeds every overlay entry whose key is not reserved into `sink`.
///
/// Emission order follows the map's iteration order, which is unspecified.
pub fn merge_params<F>(reserved: &ReservedParams, overlay: &HashMap<String, String>, mut sink: F)
where
	F: FnMut(&str, &str),
{
	for (key, value) in overlay {
		if reserved.contains(key) {
			continue;
		}

		sink(key, value);
	}
}
