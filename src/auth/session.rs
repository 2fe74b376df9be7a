//! Mutable per-conversation credential container.

// self
use crate::{_prelude::*, auth::Token};

/// Progress of the three-legged authorization dance for one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionState {
	/// Nothing has been obtained yet (or the session was reset).
	NoToken,
	/// A request token is held and awaits user authorization.
	RequestTokenObtained,
	/// An access token is held; signed requests are possible.
	AccessTokenObtained,
}
impl SessionState {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionState::NoToken => "no_token",
			SessionState::RequestTokenObtained => "request_token_obtained",
			SessionState::AccessTokenObtained => "access_token_obtained",
		}
	}
}
impl Display for SessionState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Session holding the current access token, the pending request token, and the verifier.
///
/// [`OAuthService`](crate::service::OAuthService) keeps exactly one session behind a lock and
/// hands out clones via [`OAuthService::session`](crate::service::OAuthService::session), so a
/// snapshot never observes a half-applied update.
///
/// The epoch advances whenever the caller discards or replaces credentials out of band
/// ([`reset`](Self::reset), [`set_access_token`](Self::set_access_token)). Flows that awaited the
/// provider compare it against their snapshot before committing. Equality ignores it.
#[derive(Clone, Debug, Default)]
pub struct OAuthSession {
	current_token: Option<Token>,
	request_token: Option<Token>,
	verifier: Option<String>,
	epoch: u64,
}
impl OAuthSession {
	/// Access token, once established.
	pub fn current_token(&self) -> Option<&Token> {
		self.current_token.as_ref()
	}

	/// Request token awaiting authorization.
	pub fn request_token(&self) -> Option<&Token> {
		self.request_token.as_ref()
	}

	/// Verifier captured from the provider callback.
	pub fn verifier(&self) -> Option<&str> {
		self.verifier.as_deref()
	}

	/// Counter of out-of-band credential changes.
	pub fn epoch(&self) -> u64 {
		self.epoch
	}

	/// Derives the dance progress from the held credentials.
	pub fn state(&self) -> SessionState {
		if self.current_token.is_some() {
			SessionState::AccessTokenObtained
		} else if self.request_token.is_some() {
			SessionState::RequestTokenObtained
		} else {
			SessionState::NoToken
		}
	}

	/// Replaces the access token.
	pub fn set_access_token(&mut self, token: Token) {
		self.current_token = Some(token);
		self.epoch += 1;
	}

	/// Stores a freshly obtained request token.
	pub fn set_request_token(&mut self, token: Token) {
		self.request_token = Some(token);
	}

	/// Stores the verifier returned by the provider.
	pub fn set_verifier(&mut self, verifier: impl Into<String>) {
		self.verifier = Some(verifier.into());
	}

	/// Installs the exchanged access token and drops the consumed request token + verifier.
	pub fn complete_exchange(&mut self, access_token: Token) {
		self.current_token = Some(access_token);
		self.request_token = None;
		self.verifier = None;
	}

	/// Clears every credential; calling it repeatedly leaves the same empty session.
	pub fn reset(&mut self) {
		*self = Self { epoch: self.epoch + 1, ..Default::default() };
	}
}
impl PartialEq for OAuthSession {
	fn eq(&self, other: &Self) -> bool {
		self.current_token == other.current_token
			&& self.request_token == other.request_token
			&& self.verifier == other.verifier
	}
}
impl Eq for OAuthSession {}
