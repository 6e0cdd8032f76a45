//! Transport primitives for token endpoint calls.
//!
//! The module exposes [`TokenHttpClient`], the client's only dependency on an HTTP stack,
//! together with [`post_form`], which performs the url-encoded POST used by every token
//! exchange and classifies the outcome into transport failures, unexpected statuses, and raw
//! success bodies. [`ReqwestHttpClient`] is the default transport behind the `reqwest` feature.

// std
#[cfg(feature = "reqwest")] use std::time::Duration;
// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{_prelude::*, error::TransportError};

/// Media type of every token endpoint request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Abstraction over HTTP transports capable of executing token endpoint requests.
///
/// Callers provide an implementation (typically behind `Arc<T>` where `T: TokenHttpClient`) and
/// the client requests a short-lived [`AsyncHttpClient`] handle for each call. Implementations
/// must be `Send + Sync + 'static` so one transport can back many clients, and the handle's
/// request future must be `Send` so client futures can hop executors.
///
/// Cancellation is cooperative: dropping the future returned by the handle must abort the
/// in-flight request. Bounded waits belong to the transport (see
/// [`ReqwestHttpClient::with_timeout`]) and must surface as an error, never a hang.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single request.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for the next request.
	fn handle(&self) -> Self::Handle;
}

/// POSTs `form` as `application/x-www-form-urlencoded` to `url` and returns the raw body.
///
/// Form keys are serialized in sorted order. Statuses outside `200..300` yield
/// [`Error::UnexpectedStatus`] carrying the body; transport failures yield
/// [`Error::Transport`]. Nothing is retried.
pub async fn post_form<C>(
	http_client: &C,
	url: &str,
	form: &BTreeMap<String, String>,
) -> Result<Vec<u8>>
where
	C: TokenHttpClient,
{
	let body = form_urlencoded::Serializer::new(String::new()).extend_pairs(form).finish();
	let request = Request::builder()
		.method(Method::POST)
		.uri(url)
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, "application/json")
		.body(body.into_bytes())
		.map_err(TransportError::Request)?;
	let handle = http_client.handle();
	let response = handle.call(request).await.map_err(TransportError::from)?;
	let status = response.status().as_u16();
	let body = response.into_body();

	if !(200..300).contains(&status) {
		return Err(Error::UnexpectedStatus { status, body });
	}

	Ok(body)
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token endpoints return results directly instead of delegating to another URI, so
/// [`ReqwestHttpClient::without_redirects`] is the recommended constructor for production use.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient {
	client: ReqwestClient,
	timeout: Option<Duration>,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, timeout: None }
	}

	/// Builds a client that never follows redirects.
	pub fn without_redirects() -> Result<Self, crate::error::ConfigError> {
		let client =
			ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self::with_client(client))
	}

	/// Applies a per-request timeout; expiry surfaces as a transport error.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Per-request timeout, if one was configured.
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle { client: self.client.clone(), timeout: self.timeout }
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle {
	client: ReqwestClient,
	timeout: Option<Duration>,
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			let mut request: reqwest::Request = request.try_into().map_err(Box::new)?;

			if let Some(timeout) = self.timeout {
				*request.timeout_mut() = Some(timeout);
			}

			let response = self.client.execute(request).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut converted = HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*converted.status_mut() = status;
			*converted.headers_mut() = headers;

			Ok(converted)
		})
	}
}
