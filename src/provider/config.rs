//! Immutable provider configuration consumed by [`OAuthService`](crate::service::OAuthService).

/// Builder API for assembling provider configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::{ProviderId, Token},
	extract::{BaseStringExtractor, HeaderExtractor, TokenExtractor},
	provider::{ProviderSettings, ProviderStrategy},
	sign::SignatureService,
	timestamp::TimestampService,
};

/// Provider settings plus the components implementing each protocol step.
///
/// The service never branches on provider identity; every provider-specific behavior is
/// expressed through the settings or one of the components below.
#[derive(Clone)]
pub struct ProviderConfig {
	settings: ProviderSettings,
	request_token_extractor: Arc<dyn TokenExtractor>,
	access_token_extractor: Arc<dyn TokenExtractor>,
	base_string_extractor: Arc<dyn BaseStringExtractor>,
	header_extractor: Arc<dyn HeaderExtractor>,
	signature: Arc<dyn SignatureService>,
	timestamp: Arc<dyn TimestampService>,
	strategy: Arc<dyn ProviderStrategy>,
}
impl ProviderConfig {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderConfigBuilder {
		ProviderConfigBuilder::new(id)
	}

	/// Validates `settings` and wires the default components for them.
	pub fn from_settings(settings: ProviderSettings) -> Result<Self, ProviderConfigError> {
		ProviderConfigBuilder::from_settings(settings).build()
	}

	/// Provider identifier.
	pub fn id(&self) -> &ProviderId {
		&self.settings.id
	}

	/// Underlying settings.
	pub fn settings(&self) -> &ProviderSettings {
		&self.settings
	}

	/// Extractor for request-token responses.
	pub fn request_token_extractor(&self) -> &dyn TokenExtractor {
		self.request_token_extractor.as_ref()
	}

	/// Extractor for access-token responses.
	pub fn access_token_extractor(&self) -> &dyn TokenExtractor {
		self.access_token_extractor.as_ref()
	}

	/// Base-string extractor.
	pub fn base_string_extractor(&self) -> &dyn BaseStringExtractor {
		self.base_string_extractor.as_ref()
	}

	/// `Authorization` header extractor.
	pub fn header_extractor(&self) -> &dyn HeaderExtractor {
		self.header_extractor.as_ref()
	}

	/// Signature service.
	pub fn signature(&self) -> &dyn SignatureService {
		self.signature.as_ref()
	}

	/// Timestamp and nonce source.
	pub fn timestamp(&self) -> &dyn TimestampService {
		self.timestamp.as_ref()
	}

	/// Provider strategy.
	pub fn strategy(&self) -> &dyn ProviderStrategy {
		self.strategy.as_ref()
	}

	/// Builds the user authorization URL for `request_token` through the strategy.
	pub fn authorization_url(&self, request_token: &Token) -> Url {
		self.strategy.authorization_url(&self.settings, request_token)
	}
}
impl Debug for ProviderConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderConfig")
			.field("settings", &self.settings)
			.field("signature_method", &self.signature.method())
			.finish_non_exhaustive()
	}
}
