//! Provider strategy hooks that customize the authorization dance.
//!
//! Implementations build the user authorization URL and decorate token-endpoint requests
//! without tying the service to any particular provider.

// self
use crate::{
	_prelude::*,
	auth::Token,
	provider::{OAuthVersion, ProviderSettings, TokenEndpoint},
	request::OAuthRequest,
};

/// Strategy hook for provider-specific behavior.
///
/// Both hooks have defaults; override only what the provider deviates on.
pub trait ProviderStrategy: Send + Sync {
	/// Builds the URL the resource owner visits to authorize `request_token`.
	fn authorization_url(&self, settings: &ProviderSettings, request_token: &Token) -> Url {
		default_authorization_url(settings, request_token)
	}

	/// Adds provider-specific parameters to a token-endpoint request before it is signed.
	fn augment_token_request(&self, _endpoint: TokenEndpoint, _request: &mut OAuthRequest) {}
}

/// Strategy that keeps every default hook.
#[derive(Debug, Default)]
pub struct DefaultProviderStrategy;
impl Display for DefaultProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-provider-strategy")
	}
}
impl ProviderStrategy for DefaultProviderStrategy {}

/// Authorization endpoint plus `oauth_token`; OAuth 1.0 providers also receive
/// `oauth_callback` here because their request-token call does not carry it.
pub fn default_authorization_url(settings: &ProviderSettings, request_token: &Token) -> Url {
	let mut url = settings.endpoints.authorization.clone();

	{
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("oauth_token", request_token.key());

		if settings.version == OAuthVersion::V1_0 {
			pairs.append_pair("oauth_callback", &settings.callback);
		}
	}

	url
}
