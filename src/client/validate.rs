// self
use crate::{
	_prelude::*,
	client::OAuth2Client,
	config::Config,
	error::ConfigError,
	http::TokenHttpClient,
	provider::Provider,
};

/// Checks that `client` is complete enough to issue requests.
///
/// Reports the first failing condition in this order: missing instance, missing config,
/// missing provider, empty authorization endpoint, empty token endpoint, empty client ID,
/// empty client secret, empty redirect URI. Whitespace-only values count as empty.
pub fn validate<C>(client: Option<&OAuth2Client<C>>) -> Result<(), ConfigError>
where
	C: TokenHttpClient,
{
	validated(client).map(|_| ())
}

impl<C> OAuth2Client<C>
where
	C: TokenHttpClient,
{
	/// Validates this client; see [`validate`].
	pub fn validate(&self) -> Result<(), ConfigError> {
		validate(Some(self))
	}

	pub(crate) fn validated(&self) -> Result<Validated<'_>, ConfigError> {
		validated(Some(self))
	}
}

/// Borrowed parts of a client that passed validation.
pub(crate) struct Validated<'a> {
	pub(crate) provider: &'a dyn Provider,
	pub(crate) config: &'a Config,
}

fn validated<C>(client: Option<&OAuth2Client<C>>) -> Result<Validated<'_>, ConfigError>
where
	C: TokenHttpClient,
{
	let client = client.ok_or(ConfigError::MissingInstance)?;
	let config = client.config.as_deref().ok_or(ConfigError::MissingConfig)?;
	let provider = client.provider.as_deref().ok_or(ConfigError::MissingProvider)?;

	if is_blank(provider.authorization_endpoint()) {
		return Err(ConfigError::EmptyAuthorizationEndpoint);
	}
	if is_blank(provider.token_endpoint()) {
		return Err(ConfigError::EmptyTokenEndpoint);
	}
	if is_blank(&config.client_id) {
		return Err(ConfigError::EmptyClientId);
	}
	if is_blank(&config.client_secret) {
		return Err(ConfigError::EmptyClientSecret);
	}
	if is_blank(&config.redirect_uri) {
		return Err(ConfigError::EmptyRedirectUri);
	}

	Ok(Validated { provider, config })
}

pub(crate) fn is_blank(value: &str) -> bool {
	value.trim().is_empty()
}
