//! Walks through the OAuth 1.0a three-legged dance against a mocked provider: fetch a request
//! token, send the user to the authorization URL, capture the verifier from the callback,
//! exchange it for an access token, and make a signed call.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use oauth1_broker::{
	auth::{Consumer, ProviderId},
	provider::ProviderConfig,
	request::Verb,
	service::ReqwestOAuthService,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token");
			then.status(200)
				.body("oauth_token=demo-request&oauth_token_secret=demo-request-secret&oauth_callback_confirmed=true");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token");
			then.status(200)
				.body("oauth_token=demo-access&oauth_token_secret=demo-access-secret&screen_name=ada");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/1/statuses/update.json").header_exists("authorization");
			then.status(200).header("content-type", "application/json").body("{\"id\":1}");
		})
		.await;

	let config = ProviderConfig::builder(ProviderId::new("demo-provider")?)
		.request_token_endpoint(Url::parse(&server.url("/oauth/request_token"))?)
		.access_token_endpoint(Url::parse(&server.url("/oauth/access_token"))?)
		.authorization_endpoint(Url::parse(&server.url("/oauth/authorize"))?)
		.callback("https://app.example.com/oauth/callback")
		.build()?;
	let service = ReqwestOAuthService::new(config, Consumer::new("demo-key", "demo-secret"))?;
	let authorize_url = service.authorization_url().await?;

	println!("Send your user to {authorize_url}.");

	// Simulate the provider redirecting back to the registered callback.
	let callback = "https://app.example.com/oauth/callback?oauth_token=demo-request&oauth_verifier=demo-verifier";

	service.set_verifier_from_callback(callback)?;

	let access = service.init_access_token().await?;

	println!(
		"Authorized as {} ({:?}).",
		access.response_param("screen_name").unwrap_or_default(),
		access
	);

	let response = service
		.send_signed_request_with_param(
			Verb::Post,
			&server.url("/1/statuses/update.json"),
			"status",
			"Hello from OAuth 1.0a!",
		)
		.await?;

	println!("Provider answered {} with {}.", response.status(), response.text());

	Ok(())
}
