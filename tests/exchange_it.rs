// std
use std::{
	collections::BTreeMap,
	future::Future,
	io::Error as IoError,
	pin::Pin,
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
// self
use oauth2_lite::{
	client::{OAuth2Client, validate},
	config::Config,
	error::{ConfigError, Error, TransportError},
	http::{FORM_CONTENT_TYPE, TokenHttpClient},
	oauth2::{
		AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
		http::{Method, StatusCode, header::CONTENT_TYPE},
	},
	provider::{Provider, ProviderEndpoints},
	url::form_urlencoded,
};

const TOKEN_URL: &str = "https://example.com/token";

#[derive(Clone, Debug)]
struct RecordedRequest {
	method: Method,
	uri: String,
	content_type: Option<String>,
	form: BTreeMap<String, String>,
}

#[derive(Clone)]
enum Reply {
	Body { status: u16, body: Vec<u8> },
	Unreachable,
}

#[derive(Clone)]
struct RecordingHttpClient {
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
	reply: Reply,
}
impl RecordingHttpClient {
	fn replying(status: u16, body: &str) -> Self {
		Self {
			requests: Arc::default(),
			reply: Reply::Body { status, body: body.as_bytes().to_vec() },
		}
	}

	fn unreachable() -> Self {
		Self { requests: Arc::default(), reply: Reply::Unreachable }
	}

	fn recorded(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}
}
impl TokenHttpClient for RecordingHttpClient {
	type Handle = RecordingHandle;
	type TransportError = IoError;

	fn handle(&self) -> Self::Handle {
		RecordingHandle { requests: self.requests.clone(), reply: self.reply.clone() }
	}
}

struct RecordingHandle {
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
	reply: Reply,
}
impl<'c> AsyncHttpClient<'c> for RecordingHandle {
	type Error = HttpClientError<IoError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			let content_type = request
				.headers()
				.get(CONTENT_TYPE)
				.and_then(|value| value.to_str().ok())
				.map(ToOwned::to_owned);
			let form = form_urlencoded::parse(request.body()).into_owned().collect();

			self.requests.lock().push(RecordedRequest {
				method: request.method().clone(),
				uri: request.uri().to_string(),
				content_type,
				form,
			});

			match &self.reply {
				Reply::Body { status, body } => {
					let mut response = HttpResponse::new(body.clone());

					*response.status_mut() =
						StatusCode::from_u16(*status).expect("Mock status should be valid.");

					Ok(response)
				},
				Reply::Unreachable =>
					Err(HttpClientError::Reqwest(Box::new(IoError::other("connection refused")))),
			}
		})
	}
}

fn build_client(
	config: Config,
	http_client: &RecordingHttpClient,
) -> OAuth2Client<RecordingHttpClient> {
	let provider: Arc<dyn Provider> =
		Arc::new(ProviderEndpoints::new("https://example.com/auth", TOKEN_URL));

	OAuth2Client::with_http_client(provider, config, http_client.clone())
		.expect("Client should be valid.")
}

fn test_config() -> Config {
	Config::new("test-client-id", "test-client-secret", "https://example.com/callback")
}

fn form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
	pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

#[tokio::test]
async fn authorization_code_exchange_posts_protocol_form() {
	let http_client = RecordingHttpClient::replying(200, r#"{"access_token":"secret-token"}"#);
	let client =
		build_client(test_config().with_token_param("custom_param", "custom_value"), &http_client);
	let response = client
		.exchange_authorization_code("test-code")
		.await
		.expect("Exchange should succeed.");

	assert_eq!(response.get_str("access_token"), Some("secret-token"));
	assert_eq!(response.raw(), br#"{"access_token":"secret-token"}"#);

	let requests = http_client.recorded();

	assert_eq!(requests.len(), 1);

	let request = &requests[0];

	assert_eq!(request.method, Method::POST);
	assert_eq!(request.uri, TOKEN_URL);
	assert_eq!(request.content_type.as_deref(), Some(FORM_CONTENT_TYPE));
	assert_eq!(
		request.form,
		form(&[
			("client_id", "test-client-id"),
			("client_secret", "test-client-secret"),
			("code", "test-code"),
			("custom_param", "custom_value"),
			("grant_type", "authorization_code"),
			("redirect_uri", "https://example.com/callback"),
		])
	);
}

#[tokio::test]
async fn refresh_exchange_posts_protocol_form() {
	let http_client = RecordingHttpClient::replying(
		200,
		r#"{"access_token":"rotated","refresh_token":"next","expires_in":"3600"}"#,
	);
	let client = build_client(test_config(), &http_client);
	let response =
		client.exchange_refresh_token("test-refresh").await.expect("Refresh should succeed.");
	let token = response.token().expect("Response should decode as a token.");

	assert_eq!(token.access_token.expose(), "rotated");
	assert_eq!(token.refresh_token.as_ref().map(|secret| secret.expose()), Some("next"));
	assert_eq!(token.expires_in, Some(3600));
	assert_eq!(
		http_client.recorded()[0].form,
		form(&[
			("client_id", "test-client-id"),
			("client_secret", "test-client-secret"),
			("grant_type", "refresh_token"),
			("redirect_uri", "https://example.com/callback"),
			("refresh_token", "test-refresh"),
		])
	);
}

#[tokio::test]
async fn overlays_cannot_replace_credentials_or_grant_values() {
	let http_client = RecordingHttpClient::replying(200, "{}");
	let config = test_config()
		.with_token_param("client_id", "spoofed-id")
		.with_token_param("client_secret", "spoofed-secret")
		.with_token_param("redirect_uri", "https://evil.example.com")
		.with_token_param("code", "spoofed-code")
		.with_token_param("refresh_token", "spoofed-refresh")
		.with_token_param("grant_type", "password");
	let client = build_client(config, &http_client);

	client.exchange_refresh_token("real-refresh").await.expect("Refresh should succeed.");
	client.exchange_authorization_code("real-code").await.expect("Exchange should succeed.");

	let recorded = http_client.recorded();
	let refresh_form = &recorded[0].form;

	assert_eq!(refresh_form["client_id"], "test-client-id");
	assert_eq!(refresh_form["client_secret"], "test-client-secret");
	assert_eq!(refresh_form["redirect_uri"], "https://example.com/callback");
	assert_eq!(refresh_form["refresh_token"], "real-refresh");
	assert_eq!(refresh_form["grant_type"], "refresh_token");
	assert_eq!(refresh_form.get("code"), None);

	let code_form = &recorded[1].form;

	assert_eq!(code_form["client_id"], "test-client-id");
	assert_eq!(code_form["code"], "real-code");
	assert_eq!(code_form.get("refresh_token"), None);
	// `grant_type` is not reserved for authorization code exchanges.
	assert_eq!(code_form["grant_type"], "password");
}

#[tokio::test]
async fn blank_arguments_are_rejected_before_any_request() {
	let http_client = RecordingHttpClient::replying(200, "{}");
	let client = build_client(test_config(), &http_client);

	for code in ["", "   ", "\t\n"] {
		let err = client.exchange_authorization_code(code).await.expect_err("Blank code.");

		assert!(matches!(err, Error::EmptyCode));

		let err = client.exchange_refresh_token(code).await.expect_err("Blank refresh token.");

		assert!(matches!(err, Error::EmptyRefreshToken));
	}

	assert!(http_client.recorded().is_empty());
}

#[tokio::test]
async fn blank_arguments_win_over_invalid_clients() {
	let http_client = RecordingHttpClient::replying(200, "{}");
	let client = OAuth2Client {
		provider: None,
		config: None,
		http_client: Arc::new(http_client.clone()),
	};

	assert!(matches!(client.exchange_authorization_code(" ").await, Err(Error::EmptyCode)));
	assert!(matches!(
		client.exchange_authorization_code("code").await,
		Err(Error::Config(ConfigError::MissingConfig))
	));
	assert!(matches!(
		client.exchange_refresh_token("refresh").await,
		Err(Error::Config(ConfigError::MissingConfig))
	));
	assert!(http_client.recorded().is_empty());
}

#[tokio::test]
async fn hand_built_clients_are_validated_per_call() {
	let http_client = RecordingHttpClient::replying(200, "{}");
	let client = OAuth2Client {
		provider: Some(Arc::new(ProviderEndpoints::new("https://example.com/auth", TOKEN_URL))
			as Arc<dyn Provider>),
		config: Some(Arc::new(Config::new("id", " ", "https://example.com/callback"))),
		http_client: Arc::new(http_client.clone()),
	};
	let err = client.exchange_refresh_token("refresh").await.expect_err("Secret is blank.");

	assert!(matches!(err, Error::Config(ConfigError::EmptyClientSecret)));
	assert!(matches!(
		validate::<RecordingHttpClient>(None),
		Err(ConfigError::MissingInstance)
	));
	assert!(http_client.recorded().is_empty());
}

#[tokio::test]
async fn non_success_status_carries_body() {
	let http_client = RecordingHttpClient::replying(400, "bad request");
	let client = build_client(test_config(), &http_client);
	let err = client
		.exchange_authorization_code("expired-code")
		.await
		.expect_err("A 400 response should fail.");

	assert_eq!(err.status(), Some(400));
	assert_eq!(err.body(), Some(&b"bad request"[..]));
	assert!(matches!(err, Error::UnexpectedStatus { status: 400, .. }));
}

#[tokio::test]
async fn redirects_and_server_errors_are_not_success() {
	for status in [199, 302, 500] {
		let http_client = RecordingHttpClient::replying(status, "{}");
		let client = build_client(test_config(), &http_client);
		let err = client.exchange_refresh_token("refresh").await.expect_err("Not a 2xx status.");

		assert_eq!(err.status(), Some(status));
	}

	let http_client = RecordingHttpClient::replying(204, "{}");
	let client = build_client(test_config(), &http_client);

	client.exchange_refresh_token("refresh").await.expect("Any 2xx status should succeed.");
}

#[tokio::test]
async fn undecodable_body_keeps_raw_bytes() {
	let http_client = RecordingHttpClient::replying(200, "invalid json");
	let client = build_client(test_config(), &http_client);
	let err = client.exchange_authorization_code("code").await.expect_err("Body is not JSON.");

	assert_eq!(err.status(), None);
	assert_eq!(err.body(), Some(&b"invalid json"[..]));

	let partial = err.into_partial_response().expect("Decode failures keep the raw body.");

	assert_eq!(partial.raw(), b"invalid json");
	assert!(partial.data().is_none());
}

#[tokio::test]
async fn transport_failures_carry_no_status() {
	let http_client = RecordingHttpClient::unreachable();
	let client = build_client(test_config(), &http_client);
	let err = client.exchange_refresh_token("refresh").await.expect_err("Transport is down.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert_eq!(err.status(), None);
	assert_eq!(err.body(), None);
	assert_eq!(http_client.recorded().len(), 1);
}

#[tokio::test]
async fn concurrent_exchanges_share_one_client() {
	let http_client = RecordingHttpClient::replying(200, r#"{"access_token":"shared"}"#);
	let client = build_client(test_config(), &http_client);
	let cloned = client.clone();
	let (first, second) = tokio::join!(
		client.exchange_refresh_token("refresh-a"),
		cloned.exchange_authorization_code("code-b"),
	);

	assert_eq!(first.expect("Refresh should succeed.").get_str("access_token"), Some("shared"));
	assert_eq!(second.expect("Exchange should succeed.").get_str("access_token"), Some("shared"));

	let mut grants = http_client
		.recorded()
		.into_iter()
		.map(|request| request.form["grant_type"].clone())
		.collect::<Vec<_>>();

	grants.sort();

	assert_eq!(grants, ["authorization_code", "refresh_token"]);
}
