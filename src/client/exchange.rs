//! Token endpoint exchanges for authorization codes and refresh tokens.
//!
//! Both grants share one pipeline: validate the client, build the protocol form, merge the
//! non-reserved `token_params` overlay, POST it to the token endpoint, then decode the body as a
//! JSON object. A body that is not a JSON object still comes back to the caller through
//! [`DecodeError::into_partial_response`] so the raw payload can be inspected.

// crates.io
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	client::{OAuth2Client, validate},
	error::DecodeError,
	http::{self, TokenHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	params::{self, ReservedParams},
	token::TokenResponse,
};

/// Token endpoint response: the raw body plus its decoded top-level JSON object.
#[derive(Clone, Debug, PartialEq)]
pub struct ExchangeResponse {
	raw: Vec<u8>,
	data: Option<Map<String, Value>>,
}
impl ExchangeResponse {
	pub(crate) fn partial(raw: Vec<u8>) -> Self {
		Self { raw, data: None }
	}

	/// Raw response body as received.
	pub fn raw(&self) -> &[u8] {
		&self.raw
	}

	/// Consumes the response and returns the raw body.
	pub fn into_raw(self) -> Vec<u8> {
		self.raw
	}

	/// Decoded top-level JSON object; `None` on a partial response.
	pub fn data(&self) -> Option<&Map<String, Value>> {
		self.data.as_ref()
	}

	/// Looks up a top-level member of the decoded object.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.data.as_ref()?.get(key)
	}

	/// Looks up a top-level string member of the decoded object.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key)?.as_str()
	}

	/// Decodes the raw body into a caller-chosen type.
	pub fn decode<T>(&self) -> Result<T, DecodeError>
	where
		T: DeserializeOwned,
	{
		decode_json(&self.raw)
	}

	/// Decodes the raw body as a standard [`TokenResponse`].
	pub fn token(&self) -> Result<TokenResponse, DecodeError> {
		self.decode()
	}

	fn from_body(raw: Vec<u8>) -> Result<Self, DecodeError> {
		let data = decode_json(&raw)?;

		Ok(Self { raw, data: Some(data) })
	}
}

impl<C> OAuth2Client<C>
where
	C: TokenHttpClient,
{
	/// Redeems an authorization code (`grant_type=authorization_code`).
	///
	/// Empty or whitespace-only codes are rejected with [`Error::EmptyCode`] before the client is
	/// validated and before any request is sent.
	pub async fn exchange_authorization_code(&self, code: &str) -> Result<ExchangeResponse> {
		const KIND: FlowKind = FlowKind::AuthorizationCode;

		if validate::is_blank(code) {
			return Err(Error::EmptyCode);
		}

		let grant = GrantForm { field: "code", value: code, grant_type: "authorization_code" };

		// Unlike the refresh path, `grant_type` is not reserved here, so a `token_params`
		// entry overrides `authorization_code`.
		self.exchange(KIND, "exchange_authorization_code", grant, ReservedParams::base()).await
	}

	/// Redeems a refresh token (`grant_type=refresh_token`).
	///
	/// Empty or whitespace-only tokens are rejected with [`Error::EmptyRefreshToken`] before the
	/// client is validated and before any request is sent.
	pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<ExchangeResponse> {
		const KIND: FlowKind = FlowKind::RefreshToken;

		if validate::is_blank(refresh_token) {
			return Err(Error::EmptyRefreshToken);
		}

		let grant =
			GrantForm { field: "refresh_token", value: refresh_token, grant_type: "refresh_token" };

		self.exchange(
			KIND,
			"exchange_refresh_token",
			grant,
			ReservedParams::with_extra(["grant_type"]),
		)
		.await
	}

	async fn exchange(
		&self,
		kind: FlowKind,
		stage: &'static str,
		grant: GrantForm<'_>,
		reserved: ReservedParams,
	) -> Result<ExchangeResponse> {
		let span = FlowSpan::new(kind, stage);

		obs::record_flow_outcome(kind, FlowOutcome::Attempt);

		let result = span.instrument(self.send_exchange(grant, reserved)).await;

		if let Err(e) = &result {
			span.record_failure(e);
		}

		obs::record_flow_result(kind, &result);

		result
	}

	async fn send_exchange(
		&self,
		grant: GrantForm<'_>,
		reserved: ReservedParams,
	) -> Result<ExchangeResponse> {
		let validated = self.validated()?;
		let config = validated.config;
		let mut form = BTreeMap::new();

		form.insert("client_id".to_owned(), config.client_id.clone());
		form.insert("client_secret".to_owned(), config.client_secret.clone());
		form.insert(grant.field.to_owned(), grant.value.to_owned());
		form.insert("redirect_uri".to_owned(), config.redirect_uri.clone());
		form.insert("grant_type".to_owned(), grant.grant_type.to_owned());

		params::merge_params(&reserved, &config.token_params, |key, value| {
			form.insert(key.to_owned(), value.to_owned());
		});

		let body =
			http::post_form(self.http_client.as_ref(), validated.provider.token_endpoint(), &form)
				.await?;

		Ok(ExchangeResponse::from_body(body)?)
	}
}

struct GrantForm<'a> {
	field: &'static str,
	value: &'a str,
	grant_type: &'static str,
}

fn decode_json<T>(raw: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(raw);
	let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
		let path = e.path().to_string();

		DecodeError::new(e.into_inner(), path, raw.to_vec())
	})?;

	deserializer.end().map_err(|e| DecodeError::new(e, ".".into(), raw.to_vec()))?;

	Ok(value)
}
