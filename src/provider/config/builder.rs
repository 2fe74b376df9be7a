// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	extract::{
		BaseStringExtractor, FormTokenExtractor, HeaderExtractor, OAuthHeaderExtractor,
		Oauth10aBaseString, TokenExtractor,
	},
	provider::{
		DefaultProviderStrategy, OAuthVersion, ProviderConfig, ProviderEndpoints, ProviderSettings,
		ProviderStrategy, SignaturePlace,
	},
	request::Verb,
	sign::{SignatureService, SignatureType},
	timestamp::{SystemTimestampService, TimestampService},
};

/// Errors raised while constructing or validating provider configurations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderConfigError {
	/// Request-token endpoint is mandatory.
	#[error("Missing request token endpoint.")]
	MissingRequestTokenEndpoint,
	/// Access-token endpoint is mandatory.
	#[error("Missing access token endpoint.")]
	MissingAccessTokenEndpoint,
	/// Authorization endpoint is mandatory.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Endpoints must use HTTP or HTTPS.
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Verifier parameter name must be a non-empty token without whitespace.
	#[error("Verifier parameter name `{name}` is invalid.")]
	InvalidVerifierParamName {
		/// Rejected name.
		name: String,
	},
}

/// Builder for [`ProviderConfig`] values.
///
/// Components left unset fall back to the crate defaults: form token extractors, the OAuth 1.0a
/// base string, the `OAuth` header, the signature method from the settings, the system clock, and
/// [`DefaultProviderStrategy`].
pub struct ProviderConfigBuilder {
	id: ProviderId,
	version: OAuthVersion,
	signature_place: SignaturePlace,
	signature_method: SignatureType,
	request_token_endpoint: Option<Url>,
	access_token_endpoint: Option<Url>,
	authorization_endpoint: Option<Url>,
	request_token_verb: Verb,
	access_token_verb: Verb,
	verifier_param_name: Option<String>,
	callback: Option<String>,
	scope: Option<String>,
	request_token_extractor: Option<Arc<dyn TokenExtractor>>,
	access_token_extractor: Option<Arc<dyn TokenExtractor>>,
	base_string_extractor: Option<Arc<dyn BaseStringExtractor>>,
	header_extractor: Option<Arc<dyn HeaderExtractor>>,
	signature: Option<Arc<dyn SignatureService>>,
	timestamp: Option<Arc<dyn TimestampService>>,
	strategy: Option<Arc<dyn ProviderStrategy>>,
}
impl ProviderConfigBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			version: OAuthVersion::default(),
			signature_place: SignaturePlace::default(),
			signature_method: SignatureType::default(),
			request_token_endpoint: None,
			access_token_endpoint: None,
			authorization_endpoint: None,
			request_token_verb: Verb::Post,
			access_token_verb: Verb::Post,
			verifier_param_name: None,
			callback: None,
			scope: None,
			request_token_extractor: None,
			access_token_extractor: None,
			base_string_extractor: None,
			header_extractor: None,
			signature: None,
			timestamp: None,
			strategy: None,
		}
	}

	/// Seeds a builder from loaded settings so components can still be overridden.
	pub fn from_settings(settings: ProviderSettings) -> Self {
		let ProviderSettings {
			id,
			version,
			signature_place,
			signature_method,
			endpoints,
			request_token_verb,
			access_token_verb,
			verifier_param_name,
			callback,
			scope,
		} = settings;
		let mut builder = Self::new(id);

		builder.version = version;
		builder.signature_place = signature_place;
		builder.signature_method = signature_method;
		builder.request_token_endpoint = Some(endpoints.request_token);
		builder.access_token_endpoint = Some(endpoints.access_token);
		builder.authorization_endpoint = Some(endpoints.authorization);
		builder.request_token_verb = request_token_verb;
		builder.access_token_verb = access_token_verb;
		builder.verifier_param_name = Some(verifier_param_name);
		builder.callback = Some(callback);
		builder.scope = scope;

		builder
	}

	/// Sets the protocol revision.
	pub fn version(mut self, version: OAuthVersion) -> Self {
		self.version = version;

		self
	}

	/// Sets where signed parameters travel.
	pub fn signature_place(mut self, place: SignaturePlace) -> Self {
		self.signature_place = place;

		self
	}

	/// Selects one of the bundled signature methods.
	pub fn signature_type(mut self, method: SignatureType) -> Self {
		self.signature_method = method;

		self
	}

	/// Installs a custom signature service, taking precedence over
	/// [`signature_type`](Self::signature_type).
	pub fn signature_service(mut self, service: Arc<dyn SignatureService>) -> Self {
		self.signature = Some(service);

		self
	}

	/// Sets the request-token endpoint.
	pub fn request_token_endpoint(mut self, url: Url) -> Self {
		self.request_token_endpoint = Some(url);

		self
	}

	/// Sets the access-token endpoint.
	pub fn access_token_endpoint(mut self, url: Url) -> Self {
		self.access_token_endpoint = Some(url);

		self
	}

	/// Sets the user authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Overrides the request-token verb (default `POST`).
	pub fn request_token_verb(mut self, verb: Verb) -> Self {
		self.request_token_verb = verb;

		self
	}

	/// Overrides the access-token verb (default `POST`).
	pub fn access_token_verb(mut self, verb: Verb) -> Self {
		self.access_token_verb = verb;

		self
	}

	/// Overrides the callback parameter carrying the verifier.
	pub fn verifier_param_name(mut self, name: impl Into<String>) -> Self {
		self.verifier_param_name = Some(name.into());

		self
	}

	/// Overrides the `oauth_callback` value (default `oob`).
	pub fn callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());

		self
	}

	/// Sets the `scope` sent with the request-token call.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Overrides the request-token response extractor.
	pub fn request_token_extractor(mut self, extractor: Arc<dyn TokenExtractor>) -> Self {
		self.request_token_extractor = Some(extractor);

		self
	}

	/// Overrides the access-token response extractor.
	pub fn access_token_extractor(mut self, extractor: Arc<dyn TokenExtractor>) -> Self {
		self.access_token_extractor = Some(extractor);

		self
	}

	/// Overrides the base-string extractor.
	pub fn base_string_extractor(mut self, extractor: Arc<dyn BaseStringExtractor>) -> Self {
		self.base_string_extractor = Some(extractor);

		self
	}

	/// Overrides the `Authorization` header extractor.
	pub fn header_extractor(mut self, extractor: Arc<dyn HeaderExtractor>) -> Self {
		self.header_extractor = Some(extractor);

		self
	}

	/// Overrides the timestamp and nonce source.
	pub fn timestamp_service(mut self, service: Arc<dyn TimestampService>) -> Self {
		self.timestamp = Some(service);

		self
	}

	/// Overrides the provider strategy.
	pub fn strategy(mut self, strategy: Arc<dyn ProviderStrategy>) -> Self {
		self.strategy = Some(strategy);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ProviderConfig, ProviderConfigError> {
		let request_token = self
			.request_token_endpoint
			.ok_or(ProviderConfigError::MissingRequestTokenEndpoint)?;
		let access_token =
			self.access_token_endpoint.ok_or(ProviderConfigError::MissingAccessTokenEndpoint)?;
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderConfigError::MissingAuthorizationEndpoint)?;
		let mut settings = ProviderSettings::new(
			self.id,
			ProviderEndpoints { request_token, access_token, authorization },
		);

		settings.version = self.version;
		settings.signature_place = self.signature_place;
		settings.signature_method = self.signature_method;
		settings.request_token_verb = self.request_token_verb;
		settings.access_token_verb = self.access_token_verb;
		settings.scope = self.scope;

		if let Some(name) = self.verifier_param_name {
			settings.verifier_param_name = name;
		}
		if let Some(callback) = self.callback {
			settings.callback = callback;
		}

		settings.validate()?;

		Ok(ProviderConfig {
			request_token_extractor: self
				.request_token_extractor
				.unwrap_or_else(|| Arc::new(FormTokenExtractor::default())),
			access_token_extractor: self
				.access_token_extractor
				.unwrap_or_else(|| Arc::new(FormTokenExtractor::default())),
			base_string_extractor: self
				.base_string_extractor
				.unwrap_or_else(|| Arc::new(Oauth10aBaseString)),
			header_extractor: self
				.header_extractor
				.unwrap_or_else(|| Arc::new(OAuthHeaderExtractor)),
			signature: self.signature.unwrap_or_else(|| settings.signature_method.service()),
			timestamp: self.timestamp.unwrap_or_else(|| Arc::new(SystemTimestampService)),
			strategy: self.strategy.unwrap_or_else(|| Arc::new(DefaultProviderStrategy)),
			settings,
		})
	}
}
impl Debug for ProviderConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderConfigBuilder")
			.field("id", &self.id)
			.field("version", &self.version)
			.field("signature_place", &self.signature_place)
			.field("signature_method", &self.signature_method)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::sign::PlaintextSignature;

	fn url(path: &str) -> Url {
		Url::parse(&format!("https://provider.example.com/{path}"))
			.expect("Fixture URL should parse.")
	}

	fn builder() -> ProviderConfigBuilder {
		ProviderConfig::builder(ProviderId::new("demo").expect("Fixture id should be valid."))
	}

	#[test]
	fn missing_endpoints_are_reported_in_order() {
		assert_eq!(
			builder().build().expect_err("Build should fail."),
			ProviderConfigError::MissingRequestTokenEndpoint
		);
		assert_eq!(
			builder().request_token_endpoint(url("rt")).build().expect_err("Build should fail."),
			ProviderConfigError::MissingAccessTokenEndpoint
		);
		assert_eq!(
			builder()
				.request_token_endpoint(url("rt"))
				.access_token_endpoint(url("at"))
				.build()
				.expect_err("Build should fail."),
			ProviderConfigError::MissingAuthorizationEndpoint
		);
	}

	#[test]
	fn defaults_are_wired() {
		let config = builder()
			.request_token_endpoint(url("rt"))
			.access_token_endpoint(url("at"))
			.authorization_endpoint(url("auth"))
			.build()
			.expect("Config should build.");

		assert_eq!(config.signature().method(), "HMAC-SHA1");
		assert_eq!(config.settings().verifier_param_name, "oauth_verifier");
		assert_eq!(config.settings().callback, "oob");
		assert_eq!(config.settings().signature_place, SignaturePlace::Header);
		assert_eq!(config.id().to_string(), "demo");
	}

	#[test]
	fn custom_signature_service_wins() {
		let config = builder()
			.request_token_endpoint(url("rt"))
			.access_token_endpoint(url("at"))
			.authorization_endpoint(url("auth"))
			.signature_type(SignatureType::HmacSha256)
			.signature_service(Arc::new(PlaintextSignature))
			.build()
			.expect("Config should build.");

		assert_eq!(config.signature().method(), "PLAINTEXT");
	}

	#[test]
	fn from_settings_preserves_every_knob() {
		let mut settings = ProviderSettings::new(
			ProviderId::new("demo").expect("Fixture id should be valid."),
			ProviderEndpoints {
				request_token: url("rt"),
				access_token: url("at"),
				authorization: url("auth"),
			},
		);

		settings.version = OAuthVersion::V1_0;
		settings.signature_place = SignaturePlace::QueryString;
		settings.signature_method = SignatureType::HmacSha256;
		settings.request_token_verb = Verb::Get;
		settings.verifier_param_name = "verifier".into();
		settings.callback = "https://app.example.com/cb".into();
		settings.scope = Some("photos".into());

		let config =
			ProviderConfig::from_settings(settings.clone()).expect("Config should build.");

		assert_eq!(config.settings(), &settings);
		assert_eq!(config.signature().method(), "HMAC-SHA256");
	}

	#[test]
	fn invalid_verifier_name_is_rejected() {
		let err = builder()
			.request_token_endpoint(url("rt"))
			.access_token_endpoint(url("at"))
			.authorization_endpoint(url("auth"))
			.verifier_param_name("")
			.build()
			.expect_err("Build should fail.");

		assert_eq!(err, ProviderConfigError::InvalidVerifierParamName { name: String::new() });
	}
}
