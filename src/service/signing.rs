//! Signing pipeline shared by token-endpoint calls and protected-resource requests.

// crates.io
use oauth2::http::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	auth::Token,
	extract,
	http::{self, RestClient, RestResponse},
	provider::{SignaturePlace, TokenEndpoint},
	request::OAuthRequest,
	service::OAuthService,
};

/// Value of `oauth_version`; 1.0a did not change it.
const OAUTH_VERSION: &str = "1.0";

impl<C> OAuthService<C>
where
	C: ?Sized + RestClient,
{
	/// Adds the protocol parameters, signs the request with `token` (if any), and places the
	/// signature per the provider settings.
	pub(crate) fn sign(&self, request: &mut OAuthRequest, token: Option<&Token>) -> Result<()> {
		let config = self.config.as_ref();
		let clock = config.timestamp();
		let signature = config.signature();

		request.add_oauth_param("oauth_consumer_key", self.consumer.key.as_str());
		request.add_oauth_param("oauth_signature_method", signature.method());
		request.add_oauth_param("oauth_timestamp", clock.timestamp());
		request.add_oauth_param("oauth_nonce", clock.nonce());
		request.add_oauth_param("oauth_version", OAUTH_VERSION);

		if let Some(token) = token {
			request.add_oauth_param("oauth_token", token.key());
		}

		let base_string = config.base_string_extractor().extract(request)?;
		let value = signature.sign(
			&base_string,
			self.consumer.secret.expose(),
			token.map(|token| token.secret().expose()),
		)?;

		request.add_oauth_param("oauth_signature", value);

		match config.settings().signature_place {
			SignaturePlace::Header => {
				let header = config.header_extractor().extract(request)?;

				request.add_header(AUTHORIZATION.as_str(), header);
			},
			SignaturePlace::QueryString => request.move_oauth_params_to_query(),
		}

		Ok(())
	}

	/// Hands a signed request to the transport.
	pub(crate) async fn dispatch(&self, request: OAuthRequest) -> Result<RestResponse> {
		let request = request.into_http_request()?;
		let response = self.client.execute(request).await.map_err(http::map_transport_error)?;

		Ok(response.into())
	}

	/// Signs and sends a token-endpoint request, then extracts the issued token.
	pub(crate) async fn exchange(
		&self,
		endpoint: TokenEndpoint,
		mut request: OAuthRequest,
		token: Option<&Token>,
	) -> Result<Token> {
		self.config.strategy().augment_token_request(endpoint, &mut request);
		self.sign(&mut request, token)?;

		let response = self.dispatch(request).await?;
		let body = response.text();

		if !response.is_success() {
			return Err(Error::TokenExchangeFailed {
				endpoint,
				status: response.status(),
				body: extract::body_preview(&body),
			});
		}

		let extractor = match endpoint {
			TokenEndpoint::RequestToken => self.config.request_token_extractor(),
			TokenEndpoint::AccessToken => self.config.access_token_extractor(),
		};

		Ok(extractor.extract(&body)?)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::*,
		auth::{Consumer, ProviderId},
		extract::{BaseStringExtractor, Oauth10aBaseString},
		provider::ProviderConfig,
		request::Verb,
		sign::{HmacSha1Signature, SignatureService},
		timestamp::FixedTimestampService,
	};

	#[test]
	fn header_placement_reproduces_the_reference_signature() {
		let config = ProviderConfig::builder(
			ProviderId::new("photos").expect("Fixture id should be valid."),
		)
		.request_token_endpoint(
			Url::parse("https://photos.example.net/request_token")
				.expect("Fixture URL should parse."),
		)
		.access_token_endpoint(
			Url::parse("https://photos.example.net/access_token")
				.expect("Fixture URL should parse."),
		)
		.authorization_endpoint(
			Url::parse("http://photos.example.net/authorize").expect("Fixture URL should parse."),
		)
		.timestamp_service(Arc::new(FixedTimestampService::new("1191242096", "kllo9940pd9333jh")))
		.build()
		.expect("Config should build.");
		let service: OAuthService<ScriptedRestClient> = OAuthService::with_rest_client(
			config,
			Consumer::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44"),
			ScriptedRestClient::default(),
		);
		let token = Token::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00")
			.expect("Fixture token should be valid.");
		let mut request = OAuthRequest::parse(
			Verb::Get,
			"http://photos.example.net/photos?file=vacation.jpg&size=original",
		)
		.expect("Fixture URI should parse.");

		service.sign(&mut request, Some(&token)).expect("Signing should succeed.");

		assert_eq!(
			request.oauth_params().get("oauth_signature").map(String::as_str),
			Some("tR3+Ty81lMeYAr/Fid0kMTYa/WM=")
		);

		let header = request
			.headers()
			.iter()
			.find(|(name, _)| name == "authorization")
			.map(|(_, value)| value.as_str())
			.expect("Authorization header should be set.");

		assert!(header.starts_with("OAuth oauth_consumer_key=\"dpf43f3p2l4k3l03\""));
		assert!(header.contains("oauth_signature=\"tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D\""));
	}

	#[test]
	fn query_placement_moves_every_protocol_parameter() {
		let config = test_config_builder()
			.signature_place(SignaturePlace::QueryString)
			.build()
			.expect("Config should build.");
		let service: OAuthService<ScriptedRestClient> = OAuthService::with_rest_client(
			config,
			Consumer::new(CONSUMER_KEY, CONSUMER_SECRET),
			ScriptedRestClient::default(),
		);
		let token = Token::new("AT", "ATS").expect("Fixture token should be valid.");
		let mut request = OAuthRequest::parse(Verb::Get, "https://api.example.com/me")
			.expect("Fixture URI should parse.");

		service.sign(&mut request, Some(&token)).expect("Signing should succeed.");

		assert!(request.headers().is_empty());
		assert!(request.oauth_params().is_empty());

		let query: BTreeMap<_, _> = request.query_params().into_iter().collect();

		for key in [
			"oauth_consumer_key",
			"oauth_nonce",
			"oauth_signature",
			"oauth_signature_method",
			"oauth_timestamp",
			"oauth_token",
			"oauth_version",
		] {
			assert!(query.contains_key(key), "missing {key}");
		}

		let signature = query["oauth_signature"].clone();
		let mut unsigned = OAuthRequest::parse(Verb::Get, "https://api.example.com/me")
			.expect("Fixture URI should parse.");

		for (key, value) in query.iter().filter(|(key, _)| key.as_str() != "oauth_signature") {
			unsigned.add_query_param(key, value);
		}

		let base = Oauth10aBaseString.extract(&unsigned).expect("Base string should build.");
		let expected = HmacSha1Signature
			.sign(&base, CONSUMER_SECRET, Some("ATS"))
			.expect("Signing should succeed.");

		assert_eq!(signature, expected);
	}
}
