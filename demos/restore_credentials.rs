//! Loads provider settings from JSON, restores a previously persisted access token, and signs a
//! request with query-string placement, skipping the authorization dance entirely.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oauth1_broker::{
	auth::{Consumer, Token},
	provider::{ProviderConfig, ProviderSettings},
	service::ReqwestOAuthService,
};

#[derive(Debug, serde::Deserialize)]
struct Profile {
	id: u64,
	name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/1/me.json").query_param_exists("oauth_signature");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":7,\"name\":\"Ada\"}");
		})
		.await;

	let settings: ProviderSettings = serde_json::from_value(serde_json::json!({
		"id": "restored-provider",
		"signature_place": "query_string",
		"endpoints": {
			"request_token": server.url("/oauth/request_token"),
			"access_token": server.url("/oauth/access_token"),
			"authorization": server.url("/oauth/authorize"),
		},
	}))?;
	let config = ProviderConfig::from_settings(settings)?;
	let service = ReqwestOAuthService::new(config, Consumer::new("demo-key", "demo-secret"))?;
	// Whatever the host persisted after a previous `init_access_token`.
	let persisted = r#"{"key":"demo-access","secret":"demo-access-secret"}"#;
	let token: Token = serde_json::from_str(persisted)?;

	service.set_access_token(token);

	let profile: Profile = service.get(&server.url("/1/me.json"), true).await?;

	println!("Restored session belongs to {} (#{}).", profile.name, profile.id);

	Ok(())
}
