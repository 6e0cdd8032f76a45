//! Typed view over standard RFC 6749 token responses.

// crates.io
use serde::Deserializer;
use serde_json::Value;
// self
use crate::_prelude::*;

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Successful token endpoint response (RFC 6749 §5.1).
///
/// Provider-specific members (`id_token`, `refresh_token_expires_in`, GitHub's `error` on a
/// 200 response, ...) are kept in [`TokenResponse::extra`].
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
	/// Issued access token.
	pub access_token: TokenSecret,
	/// Token type, usually `bearer`.
	#[serde(default)]
	pub token_type: Option<String>,
	/// Refresh token, when the provider rotates or issues one.
	#[serde(default)]
	pub refresh_token: Option<TokenSecret>,
	/// Lifetime of the access token in seconds.
	#[serde(default, deserialize_with = "deserialize_expires_in")]
	pub expires_in: Option<u64>,
	/// Space-delimited scopes granted by the provider.
	#[serde(default)]
	pub scope: Option<String>,
	/// Remaining top-level members.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

// Some providers encode `expires_in` as a numeric string.
fn deserialize_expires_in<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Number(u64),
		Text(String),
	}

	match Option::<Raw>::deserialize(deserializer)? {
		None => Ok(None),
		Some(Raw::Number(secs)) => Ok(Some(secs)),
		Some(Raw::Text(text)) => text.trim().parse().map(Some).map_err(serde::de::Error::custom),
	}
}
