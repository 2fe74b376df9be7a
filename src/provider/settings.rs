//! Plain provider description that hosts can load from JSON or TOML.

// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	provider::ProviderConfigError,
	request::Verb,
	sign::SignatureType,
};

/// Default name of the callback parameter carrying the verifier.
pub const DEFAULT_VERIFIER_PARAM: &str = "oauth_verifier";
/// Callback value signalling an out-of-band (manually copied) verifier.
pub const OUT_OF_BAND_CALLBACK: &str = "oob";

/// Protocol revision spoken by the provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuthVersion {
	/// OAuth 1.0a: callback sent with the request token, verifier required for the exchange.
	#[default]
	#[serde(rename = "1.0a")]
	V1_0a,
	/// OAuth 1.0: callback sent with the authorization URL, no verifier.
	#[serde(rename = "1.0")]
	V1_0,
}
impl OAuthVersion {
	/// Whether the access-token exchange must carry a verifier.
	pub const fn requires_verifier(self) -> bool {
		matches!(self, OAuthVersion::V1_0a)
	}
}

/// Where the signed `oauth_*` parameters travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignaturePlace {
	/// `Authorization: OAuth ...` header.
	#[default]
	Header,
	/// Query-string parameters.
	QueryString,
}

/// Token endpoints reached during the authorization dance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEndpoint {
	/// Issues the temporary request token.
	RequestToken,
	/// Exchanges request token + verifier for the access token.
	AccessToken,
}
impl TokenEndpoint {
	/// Stable label used in errors and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenEndpoint::RequestToken => "request_token",
			TokenEndpoint::AccessToken => "access_token",
		}
	}
}
impl Display for TokenEndpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Endpoint set declared by a provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Request-token (temporary credential) endpoint.
	pub request_token: Url,
	/// Access-token (token credential) endpoint.
	pub access_token: Url,
	/// User authorization endpoint the resource owner is redirected to.
	pub authorization: Url,
}
impl ProviderEndpoints {
	/// Returns the URL for a token endpoint.
	pub fn token_endpoint(&self, endpoint: TokenEndpoint) -> &Url {
		match endpoint {
			TokenEndpoint::RequestToken => &self.request_token,
			TokenEndpoint::AccessToken => &self.access_token,
		}
	}
}

/// Serializable provider description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
	/// Provider identifier.
	pub id: ProviderId,
	/// Protocol revision.
	#[serde(default)]
	pub version: OAuthVersion,
	/// Placement of the signed parameters.
	#[serde(default)]
	pub signature_place: SignaturePlace,
	/// Signature method used unless a custom signature service is installed.
	#[serde(default)]
	pub signature_method: SignatureType,
	/// Endpoint URLs.
	pub endpoints: ProviderEndpoints,
	/// Verb used against the request-token endpoint.
	#[serde(default = "default_token_verb")]
	pub request_token_verb: Verb,
	/// Verb used against the access-token endpoint.
	#[serde(default = "default_token_verb")]
	pub access_token_verb: Verb,
	/// Callback parameter carrying the verifier.
	#[serde(default = "default_verifier_param")]
	pub verifier_param_name: String,
	/// `oauth_callback` value.
	#[serde(default = "default_callback")]
	pub callback: String,
	/// Optional `scope` parameter sent with the request-token call.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
}
impl ProviderSettings {
	/// Creates settings with every optional knob at its default.
	pub fn new(id: ProviderId, endpoints: ProviderEndpoints) -> Self {
		Self {
			id,
			version: OAuthVersion::default(),
			signature_place: SignaturePlace::default(),
			signature_method: SignatureType::default(),
			endpoints,
			request_token_verb: default_token_verb(),
			access_token_verb: default_token_verb(),
			verifier_param_name: default_verifier_param(),
			callback: default_callback(),
			scope: None,
		}
	}

	/// Verb configured for a token endpoint.
	pub fn token_verb(&self, endpoint: TokenEndpoint) -> Verb {
		match endpoint {
			TokenEndpoint::RequestToken => self.request_token_verb,
			TokenEndpoint::AccessToken => self.access_token_verb,
		}
	}

	/// Validates endpoint schemes and the verifier parameter name.
	pub fn validate(&self) -> Result<(), ProviderConfigError> {
		validate_endpoint("request token", &self.endpoints.request_token)?;
		validate_endpoint("access token", &self.endpoints.access_token)?;
		validate_endpoint("authorization", &self.endpoints.authorization)?;

		if self.verifier_param_name.is_empty()
			|| self.verifier_param_name.chars().any(|c| c.is_whitespace() || c.is_control())
		{
			return Err(ProviderConfigError::InvalidVerifierParamName {
				name: self.verifier_param_name.clone(),
			});
		}

		Ok(())
	}
}

fn default_token_verb() -> Verb {
	Verb::Post
}

fn default_verifier_param() -> String {
	DEFAULT_VERIFIER_PARAM.into()
}

fn default_callback() -> String {
	OUT_OF_BAND_CALLBACK.into()
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ProviderConfigError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}
