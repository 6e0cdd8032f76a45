//! Client registration data supplied by the caller.

// self
use crate::_prelude::*;

/// OAuth 2.0 client registration plus optional parameter overlays.
///
/// The overlays let callers attach provider-specific parameters (`scope`, `prompt`,
/// `access_type`, ...) without the client knowing about them. Keys that the protocol controls
/// are filtered out before the overlays are applied, see [`ReservedParams`].
///
/// [`ReservedParams`]: crate::params::ReservedParams
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: String,
	/// Redirect URI registered with the provider.
	pub redirect_uri: String,
	/// Extra parameters appended to the authorization URL.
	#[serde(default)]
	pub auth_url_params: HashMap<String, String>,
	/// Extra parameters appended to token endpoint requests.
	#[serde(default)]
	pub token_params: HashMap<String, String>,
}
impl Config {
	/// Creates a configuration without any parameter overlays.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			redirect_uri: redirect_uri.into(),
			auth_url_params: HashMap::new(),
			token_params: HashMap::new(),
		}
	}

	/// Adds or replaces an authorization URL overlay parameter.
	pub fn with_auth_url_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.auth_url_params.insert(key.into(), value.into());

		self
	}

	/// Adds or replaces a token request overlay parameter.
	pub fn with_token_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.token_params.insert(key.into(), value.into());

		self
	}
}
impl Debug for Config {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Config")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("redirect_uri", &self.redirect_uri)
			.field("auth_url_params", &self.auth_url_params)
			.field("token_params", &self.token_params)
			.finish()
	}
}
