//! The OAuth 1.0a orchestrator: authorization URL generation, access-token exchange, signed
//! request dispatch, and session management for one consumer against one provider.

mod authorize;
mod signed;
mod signing;

// self
use crate::{
	_prelude::*,
	auth::{Consumer, OAuthSession, Token},
	http::RestClient,
	provider::ProviderConfig,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestRestClient;

#[cfg(feature = "reqwest")]
/// Service specialized for the crate's default reqwest transport.
pub type ReqwestOAuthService = OAuthService<ReqwestRestClient>;

/// Coordinates the three-legged dance and signs requests for a single session.
///
/// The session moves `NoToken` → `RequestTokenObtained` → `AccessTokenObtained`;
/// [`reset_session`](Self::reset_session) returns it to `NoToken`. Session reads and writes
/// never span an `.await`, and token-endpoint flows are serialized so concurrent callers share
/// one request-token fetch. The session is only written after a provider call succeeds, and a
/// flow never writes over a reset or a restored access token that happened while it was waiting.
pub struct OAuthService<C>
where
	C: ?Sized + RestClient,
{
	config: Arc<ProviderConfig>,
	consumer: Consumer,
	client: Arc<C>,
	session: RwLock<OAuthSession>,
	flow_guard: AsyncMutex<()>,
}
impl<C> OAuthService<C>
where
	C: ?Sized + RestClient,
{
	/// Creates a service that reuses the caller-provided transport.
	pub fn with_rest_client(
		config: impl Into<Arc<ProviderConfig>>,
		consumer: Consumer,
		client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			config: config.into(),
			consumer,
			client: client.into(),
			session: Default::default(),
			flow_guard: AsyncMutex::new(()),
		}
	}

	/// Provider configuration.
	pub fn config(&self) -> &ProviderConfig {
		&self.config
	}

	/// Consumer credentials.
	pub fn consumer(&self) -> &Consumer {
		&self.consumer
	}

	/// Snapshot of the current session.
	pub fn session(&self) -> OAuthSession {
		self.session.read().clone()
	}

	/// Current access token, if the dance completed or one was restored.
	pub fn access_token(&self) -> Option<Token> {
		self.session.read().current_token().cloned()
	}

	/// Installs a previously obtained access token, bypassing the dance.
	pub fn set_access_token(&self, token: Token) {
		self.session.write().set_access_token(token);
	}

	/// Builds an access token from its parts and installs it; invalid parts leave the session
	/// untouched.
	pub fn set_access_token_parts(
		&self,
		key: impl Into<String>,
		secret: impl Into<String>,
	) -> Result<Token> {
		let token = Token::new(key, secret.into())?;

		self.set_access_token(token.clone());

		Ok(token)
	}

	/// Stores the verifier the user brought back from the provider.
	pub fn set_verifier(&self, verifier: impl Into<String>) {
		self.session.write().set_verifier(verifier);
	}

	/// Verifier held by the session.
	pub fn verifier(&self) -> Option<String> {
		self.session.read().verifier().map(str::to_owned)
	}

	/// Callback parameter carrying the verifier.
	pub fn verifier_param_name(&self) -> &str {
		&self.config.settings().verifier_param_name
	}

	/// Clears every credential held by the session.
	pub fn reset_session(&self) {
		self.session.write().reset();
	}
}
#[cfg(feature = "reqwest")]
impl OAuthService<ReqwestRestClient> {
	/// Creates a service backed by a reqwest transport that does not follow redirects.
	pub fn new(config: impl Into<Arc<ProviderConfig>>, consumer: Consumer) -> Result<Self> {
		Ok(Self::with_rest_client(config, consumer, ReqwestRestClient::new()?))
	}
}
impl<C> Debug for OAuthService<C>
where
	C: ?Sized + RestClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthService")
			.field("config", &self.config)
			.field("consumer_key", &self.consumer.key)
			.field("session_state", &self.session.read().state())
			.finish()
	}
}
