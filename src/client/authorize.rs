// crates.io
use rand::{Rng, distr::Alphanumeric};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	client::OAuth2Client,
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	params::{self, ReservedParams},
};

const STATE_LEN: usize = 32;

impl<C> OAuth2Client<C>
where
	C: TokenHttpClient,
{
	/// Builds the URL the end-user should visit to grant access.
	///
	/// The query carries `client_id`, `redirect_uri`, `response_type=code`, the non-reserved
	/// `auth_url_params` overlay, and `state` when `state` is non-empty. Keys are emitted in
	/// sorted order and the query is appended to the authorization endpoint verbatim.
	pub fn authorization_url(&self, state: &str) -> Result<String> {
		const KIND: FlowKind = FlowKind::AuthorizationUrl;

		let span = FlowSpan::new(KIND, "authorization_url");
		let _entered = span.entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = self.build_authorization_url(state);

		if let Err(e) = &result {
			span.record_failure(e);
		}

		obs::record_flow_result(KIND, &result);

		result
	}

	fn build_authorization_url(&self, state: &str) -> Result<String> {
		let validated = self.validated()?;
		let config = validated.config;
		let mut query = BTreeMap::new();

		query.insert("client_id".to_owned(), config.client_id.clone());
		query.insert("redirect_uri".to_owned(), config.redirect_uri.clone());
		query.insert("response_type".to_owned(), "code".to_owned());

		// `response_type` and `state` are not reserved here: an overlay entry replaces
		// `response_type`, and an overlay `state` survives when the caller passes no state.
		params::merge_params(&ReservedParams::base(), &config.auth_url_params, |key, value| {
			query.insert(key.to_owned(), value.to_owned());
		});

		if !state.is_empty() {
			query.insert("state".to_owned(), state.to_owned());
		}

		let encoded = form_urlencoded::Serializer::new(String::new()).extend_pairs(&query).finish();

		Ok(format!("{}?{encoded}", validated.provider.authorization_endpoint()))
	}
}

/// Generates a random alphanumeric `state` value suitable for CSRF protection.
pub fn generate_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}
