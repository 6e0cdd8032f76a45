//! OAuth 2.0 client orchestrating authorization URLs and token exchanges.

mod authorize;
mod exchange;
mod validate;

pub use authorize::*;
pub use exchange::*;
pub use validate::*;

// self
use crate::{_prelude::*, config::Config, http::TokenHttpClient, provider::Provider};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestOAuth2Client = OAuth2Client<ReqwestHttpClient>;

/// Couples a provider, a client registration, and an HTTP transport.
///
/// Build clients through [`OAuth2Client::with_http_client`] (or [`OAuth2Client::new`] with the
/// `reqwest` feature), which validate eagerly. The fields stay public so callers can assemble a
/// client by hand; every operation validates again before touching them, so a hand-built client
/// with missing pieces fails with a [`ConfigError`](crate::error::ConfigError) instead of
/// panicking. Nothing is mutated after construction, so a client can be shared freely across
/// tasks.
pub struct OAuth2Client<C>
where
	C: TokenHttpClient,
{
	/// Provider supplying the authorization and token endpoints.
	pub provider: Option<Arc<dyn Provider>>,
	/// Client registration and parameter overlays.
	pub config: Option<Arc<Config>>,
	/// HTTP transport used for every token endpoint request.
	pub http_client: Arc<C>,
}
impl<C> OAuth2Client<C>
where
	C: TokenHttpClient,
{
	/// Creates a validated client that reuses the caller-provided transport.
	pub fn with_http_client(
		provider: Arc<dyn Provider>,
		config: impl Into<Arc<Config>>,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let client = Self {
			provider: Some(provider),
			config: Some(config.into()),
			http_client: http_client.into(),
		};

		client.validate()?;

		Ok(client)
	}
}
#[cfg(feature = "reqwest")]
impl OAuth2Client<ReqwestHttpClient> {
	/// Creates a validated client backed by a default [`ReqwestHttpClient`].
	pub fn new(provider: Arc<dyn Provider>, config: impl Into<Arc<Config>>) -> Result<Self> {
		Self::with_http_client(provider, config, ReqwestHttpClient::default())
	}
}
impl<C> Clone for OAuth2Client<C>
where
	C: TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			provider: self.provider.clone(),
			config: self.config.clone(),
			http_client: Arc::clone(&self.http_client),
		}
	}
}
impl<C> Debug for OAuth2Client<C>
where
	C: TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth2Client")
			.field(
				"authorization_endpoint",
				&self.provider.as_deref().map(Provider::authorization_endpoint),
			)
			.field("token_endpoint", &self.provider.as_deref().map(Provider::token_endpoint))
			.field("config", &self.config)
			.finish()
	}
}
