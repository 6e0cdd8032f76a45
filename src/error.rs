//! Client-level error types shared by validation, transport, and exchange code.

// self
use crate::{_prelude::*, client::ExchangeResponse};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected before any request was issued.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Authorization code argument was empty or whitespace-only.
	#[error("Authorization code must not be empty.")]
	EmptyCode,
	/// Refresh token argument was empty or whitespace-only.
	#[error("Refresh token must not be empty.")]
	EmptyRefreshToken,
	/// Transport failure (request construction, DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Endpoint answered with a status outside `200..300`.
	#[error("Endpoint returned unexpected HTTP status {status} (body: {}).", String::from_utf8_lossy(.body))]
	UnexpectedStatus {
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Raw response body kept for diagnostics.
		body: Vec<u8>,
	},
	/// Response body could not be decoded as JSON.
	#[error(transparent)]
	Decode(Box<DecodeError>),
}
impl Error {
	/// Stable, low-cardinality label for the error variant.
	pub fn class(&self) -> &'static str {
		match self {
			Self::Config(_) => "config",
			Self::EmptyCode => "empty_code",
			Self::EmptyRefreshToken => "empty_refresh_token",
			Self::Transport(_) => "transport",
			Self::UnexpectedStatus { .. } => "unexpected_status",
			Self::Decode(_) => "decode",
		}
	}

	/// HTTP status attached to the error, when the endpoint produced one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::UnexpectedStatus { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Raw response body attached to the error, when one was received.
	pub fn body(&self) -> Option<&[u8]> {
		match self {
			Self::UnexpectedStatus { body, .. } => Some(body),
			Self::Decode(e) => Some(e.body()),
			_ => None,
		}
	}

	/// Recovers the partially populated response (raw bytes only) behind a decode failure.
	pub fn into_partial_response(self) -> Option<ExchangeResponse> {
		match self {
			Self::Decode(e) => Some(e.into_partial_response()),
			_ => None,
		}
	}
}
impl From<DecodeError> for Error {
	fn from(e: DecodeError) -> Self {
		Self::Decode(Box::new(e))
	}
}

/// Configuration and validation failures raised before any network call.
///
/// The validation variants are listed in the order the validator checks them.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// No client instance was supplied.
	#[error("OAuth2 client instance is missing.")]
	MissingInstance,
	/// Client has no configuration attached.
	#[error("Client configuration is missing.")]
	MissingConfig,
	/// Client has no provider attached.
	#[error("Provider is missing.")]
	MissingProvider,
	/// Provider authorization endpoint is empty.
	#[error("Provider authorization endpoint is empty.")]
	EmptyAuthorizationEndpoint,
	/// Provider token endpoint is empty.
	#[error("Provider token endpoint is empty.")]
	EmptyTokenEndpoint,
	/// Configured client identifier is empty.
	#[error("Client ID is empty.")]
	EmptyClientId,
	/// Configured client secret is empty.
	#[error("Client secret is empty.")]
	EmptyClientSecret,
	/// Configured redirect URI is empty.
	#[error("Redirect URI is empty.")]
	EmptyRedirectUri,

	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures; none of them carry an HTTP status.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Outgoing request could not be constructed.
	#[error("Failed to build the HTTP request.")]
	Request(#[source] oauth2::http::Error),
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the endpoint.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure without a structured error value.
	#[error("HTTP client error occurred while calling the endpoint: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl<E> From<HttpClientError<E>> for TransportError
where
	E: 'static + Send + Sync + StdError,
{
	fn from(e: HttpClientError<E>) -> Self {
		match e {
			HttpClientError::Reqwest(inner) => Self::Network { source: inner },
			HttpClientError::Http(inner) => Self::Request(inner),
			HttpClientError::Io(inner) => Self::Io(inner),
			HttpClientError::Other(message) => Self::Other { message },
			other => Self::Other { message: other.to_string() },
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response body that could not be decoded, kept alongside the JSON failure.
#[derive(Debug, ThisError)]
#[error("Failed to decode the response body as JSON at `{path}`.")]
pub struct DecodeError {
	#[source]
	source: serde_json::Error,
	path: String,
	body: Vec<u8>,
}
impl DecodeError {
	pub(crate) fn new(source: serde_json::Error, path: String, body: Vec<u8>) -> Self {
		Self { source, path, body }
	}

	/// Raw bytes that failed to decode.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// JSON path at which decoding failed (`.` for the document root).
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Underlying `serde_json` failure.
	pub fn json_error(&self) -> &serde_json::Error {
		&self.source
	}

	/// Converts the failure into a response that keeps the raw bytes but no decoded map.
	pub fn into_partial_response(self) -> ExchangeResponse {
		ExchangeResponse::partial(self.body)
	}
}
