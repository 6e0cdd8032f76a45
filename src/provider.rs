//! Provider endpoint capability and a static implementation with common presets.
//!
//! The client only needs two strings from a provider, so anything able to hand them out
//! (a constant struct, a value loaded from configuration, a discovery document cache)
//! can implement [`Provider`].

// self
use crate::_prelude::*;

/// Endpoint capability required by [`OAuth2Client`](crate::client::OAuth2Client).
pub trait Provider
where
	Self: Send + Sync,
{
	/// Authorization endpoint where the end-user grants access.
	fn authorization_endpoint(&self) -> &str;

	/// Token endpoint where codes and refresh tokens are redeemed.
	fn token_endpoint(&self) -> &str;
}

/// Endpoint pair declared up front.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint used by the Authorization Code flow.
	pub authorization: String,
	/// Token endpoint used for exchanges and refreshes.
	pub token: String,
}
impl ProviderEndpoints {
	/// Creates an endpoint pair from arbitrary strings.
	pub fn new(authorization: impl Into<String>, token: impl Into<String>) -> Self {
		Self { authorization: authorization.into(), token: token.into() }
	}

	/// GitHub OAuth Apps endpoints.
	pub fn github() -> Self {
		Self::new(
			"https://github.com/login/oauth/authorize",
			"https://github.com/login/oauth/access_token",
		)
	}

	/// Google OAuth 2.0 endpoints.
	pub fn google() -> Self {
		Self::new("https://accounts.google.com/o/oauth2/v2/auth", "https://oauth2.googleapis.com/token")
	}
}
impl Provider for ProviderEndpoints {
	fn authorization_endpoint(&self) -> &str {
		&self.authorization
	}

	fn token_endpoint(&self) -> &str {
		&self.token
	}
}
