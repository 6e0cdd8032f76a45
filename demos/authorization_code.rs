//! Builds a GitHub authorization URL and, when a code from the redirect is supplied through
//! `OAUTH2_LITE_CODE`, redeems it at the token endpoint.
//!
//! Client credentials are read from `OAUTH2_LITE_CLIENT_ID` and `OAUTH2_LITE_CLIENT_SECRET`.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
// self
use oauth2_lite::{
	client::{ReqwestOAuth2Client, generate_state},
	config::Config,
	provider::ProviderEndpoints,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id = env::var("OAUTH2_LITE_CLIENT_ID").unwrap_or_else(|_| "demo-client".into());
	let client_secret =
		env::var("OAUTH2_LITE_CLIENT_SECRET").unwrap_or_else(|_| "demo-secret".into());
	let config = Config::new(client_id, client_secret, "http://localhost:8080/oauth/callback")
		.with_auth_url_param("scope", "read:user user:email")
		.with_auth_url_param("allow_signup", "false");
	let client = ReqwestOAuth2Client::new(Arc::new(ProviderEndpoints::github()), config)?;
	let state = generate_state();

	println!("Send your user to {}.", client.authorization_url(&state)?);
	println!("Keep `{state}` to compare against the `state` returned on the redirect.");

	let Ok(code) = env::var("OAUTH2_LITE_CODE") else {
		println!("Set OAUTH2_LITE_CODE to the `code` from the redirect to finish the exchange.");

		return Ok(());
	};
	let response = match client.exchange_authorization_code(&code).await {
		Ok(response) => response,
		Err(e) => {
			if let Some(body) = e.body() {
				eprintln!("Token endpoint body: {}.", String::from_utf8_lossy(body));
			}

			return Err(e.into());
		},
	};

	// GitHub reports grant errors inside a 200 response.
	if let Some(error) = response.get_str("error") {
		eprintln!("Exchange rejected: {error}.");

		return Ok(());
	}

	match response.token() {
		Ok(token) => println!(
			"Received a {} token (refresh token issued: {}).",
			token.token_type.as_deref().unwrap_or("bearer"),
			token.refresh_token.is_some()
		),
		Err(_) => println!("Raw response: {}.", String::from_utf8_lossy(response.raw())),
	}

	Ok(())
}
