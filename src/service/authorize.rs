//! Three-legged authorization: request token, user authorization URL, verifier capture, and
//! the access-token exchange.

// self
use crate::{
	_prelude::*,
	auth::Token,
	error::ConfigError,
	http::RestClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{OAuthVersion, TokenEndpoint},
	request::OAuthRequest,
	service::OAuthService,
};

impl<C> OAuthService<C>
where
	C: ?Sized + RestClient,
{
	/// Returns the URL the user visits to authorize this application.
	///
	/// A request token already held by the session is reused; otherwise one is fetched from the
	/// provider and stored, unless the session was reset meanwhile. Concurrent callers share a
	/// single fetch.
	pub async fn authorization_url(&self) -> Result<Url> {
		const KIND: FlowKind = FlowKind::RequestToken;

		let span = FlowSpan::new(KIND, "authorization_url");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async {
				let pending = self.session.read().request_token().cloned();

				if let Some(token) = pending {
					return Ok(self.config.authorization_url(&token));
				}

				let _flow = self.flow_guard.lock().await;
				let (pending, epoch) = {
					let session = self.session.read();

					(session.request_token().cloned(), session.epoch())
				};

				if let Some(token) = pending {
					return Ok(self.config.authorization_url(&token));
				}

				let token = self.fetch_request_token().await?;
				let url = self.config.authorization_url(&token);
				let state = {
					let mut session = self.session.write();

					// A reset or restored access token while the fetch was in flight wins.
					if session.epoch() == epoch {
						session.set_request_token(token);
					} else {
						#[cfg(feature = "tracing")]
						tracing::debug!("Session changed mid-fetch; request token not stored.");
					}

					session.state()
				};

				span.record_session(state);

				Ok(url)
			})
			.await;

		obs::record_flow_result(KIND, result)
	}

	/// Reads the verifier out of the provider callback URL and stores it.
	pub fn set_verifier_from_callback(&self, callback: &str) -> Result<String> {
		let span = FlowSpan::new(FlowKind::AccessToken, "verifier_callback");

		span.record_session(self.session.read().state());

		let _entered = span.entered();
		let url = Url::parse(callback)
			.map_err(|source| ConfigError::InvalidUri { uri: callback.to_owned(), source })?;
		let name = self.verifier_param_name();
		let verifier = url
			.query_pairs()
			.find(|(key, value)| key == name && !value.is_empty())
			.map(|(_, value)| value.into_owned())
			.ok_or(Error::VerifierRequired)?;

		self.set_verifier(verifier.clone());

		Ok(verifier)
	}

	/// Exchanges the pending request token (and verifier) for an access token.
	///
	/// On success the access token becomes the session's current token and the consumed request
	/// token and verifier are cleared. On failure the session is left as it was. When the session
	/// was reset or given another access token while the exchange was in flight, the token is
	/// returned without being installed.
	pub async fn init_access_token(&self) -> Result<Token> {
		const KIND: FlowKind = FlowKind::AccessToken;

		let span = FlowSpan::new(KIND, "init_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async {
				let _flow = self.flow_guard.lock().await;
				let (request_token, verifier, epoch) = {
					let session = self.session.read();

					(
						session.request_token().cloned(),
						session.verifier().map(str::to_owned),
						session.epoch(),
					)
				};
				let request_token = request_token.ok_or(Error::RequestTokenMissing)?;
				let settings = self.config.settings();
				let verifier = match verifier {
					Some(verifier) => Some(verifier),
					None if settings.version.requires_verifier() =>
						return Err(Error::VerifierRequired),
					None => None,
				};
				let endpoint = TokenEndpoint::AccessToken;
				let mut request = OAuthRequest::new(
					settings.token_verb(endpoint),
					settings.endpoints.token_endpoint(endpoint).clone(),
				);

				if let Some(verifier) = verifier {
					request.add_oauth_param("oauth_verifier", verifier);
				}

				let access_token = self.exchange(endpoint, request, Some(&request_token)).await?;
				let state = {
					let mut session = self.session.write();

					if session.epoch() == epoch {
						session.complete_exchange(access_token.clone());
					} else {
						#[cfg(feature = "tracing")]
						tracing::debug!("Session changed mid-exchange; access token not stored.");
					}

					session.state()
				};

				span.record_session(state);

				Ok(access_token)
			})
			.await;

		obs::record_flow_result(KIND, result)
	}

	async fn fetch_request_token(&self) -> Result<Token> {
		let settings = self.config.settings();
		let endpoint = TokenEndpoint::RequestToken;
		let mut request = OAuthRequest::new(
			settings.token_verb(endpoint),
			settings.endpoints.token_endpoint(endpoint).clone(),
		);

		// 1.0 providers receive the callback on the authorization URL instead.
		if settings.version == OAuthVersion::V1_0a {
			request.add_oauth_param("oauth_callback", settings.callback.as_str());
		}
		if let Some(scope) = settings.scope.as_deref() {
			request.add_param("scope", scope);
		}

		self.exchange(endpoint, request, None).await
	}
}
