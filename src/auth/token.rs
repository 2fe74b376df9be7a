//! Immutable OAuth 1.0a credential (`oauth_token` + `oauth_token_secret`).

pub mod secret;

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Errors produced when constructing a [`Token`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum TokenError {
	/// Token identifiers must not be empty.
	#[error("Token key cannot be empty.")]
	EmptyKey,
}

/// Token/secret pair issued by a provider.
///
/// A token plays one of two roles depending on where the session stores it: a temporary
/// *request token* before user authorization, or a long-lived *access token* afterwards.
/// Equality and hashing only consider the key and secret; the raw provider response is kept
/// for diagnostics and provider-specific extra fields.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "TokenRepr")]
pub struct Token {
	key: String,
	secret: TokenSecret,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	raw_response: Option<String>,
}
impl Token {
	/// Creates a token from its public key and secret.
	pub fn new(key: impl Into<String>, secret: impl Into<TokenSecret>) -> Result<Self, TokenError> {
		let key = key.into();

		if key.is_empty() {
			return Err(TokenError::EmptyKey);
		}

		Ok(Self { key, secret: secret.into(), raw_response: None })
	}

	/// Attaches the raw response body the token was extracted from.
	pub fn with_raw_response(mut self, raw: impl Into<String>) -> Self {
		self.raw_response = Some(raw.into());

		self
	}

	/// Public token identifier (`oauth_token`).
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Token secret (`oauth_token_secret`).
	pub fn secret(&self) -> &TokenSecret {
		&self.secret
	}

	/// Raw provider response, when the token was extracted from one.
	pub fn raw_response(&self) -> Option<&str> {
		self.raw_response.as_deref()
	}

	/// Looks up an extra form field (e.g. `user_id`, `screen_name`) in the raw response.
	pub fn response_param(&self, name: &str) -> Option<String> {
		let raw = self.raw_response.as_deref()?;

		url::form_urlencoded::parse(raw.as_bytes())
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.into_owned())
	}
}
impl TryFrom<TokenRepr> for Token {
	type Error = TokenError;

	fn try_from(repr: TokenRepr) -> Result<Self, Self::Error> {
		let token = Token::new(repr.key, repr.secret)?;

		Ok(match repr.raw_response {
			Some(raw) => token.with_raw_response(raw),
			None => token,
		})
	}
}
impl PartialEq for Token {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key && self.secret == other.secret
	}
}
impl Eq for Token {}
impl Hash for Token {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key.hash(state);
		self.secret.hash(state);
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("key", &self.key)
			.field("secret", &self.secret)
			.field("raw_response", &self.raw_response.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenRepr {
	key: String,
	secret: TokenSecret,
	#[serde(default)]
	raw_response: Option<String>,
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashSet;
	// self
	use super::*;

	#[test]
	fn empty_key_is_rejected() {
		assert_eq!(Token::new("", "secret"), Err(TokenError::EmptyKey));
		assert!(Token::new("key", "").is_ok(), "Empty secrets are legal.");
	}

	#[test]
	fn deserialization_enforces_non_empty_key() {
		let err = serde_json::from_str::<Token>(r#"{"key":"","secret":"s"}"#)
			.expect_err("Empty keys should be rejected when restoring a token.");

		assert!(err.to_string().contains("Token key cannot be empty."));

		let token = serde_json::from_str::<Token>(
			r#"{"key":"AT","secret":"ATS","raw_response":"oauth_token=AT&user_id=7"}"#,
		)
		.expect("Persisted token should restore.");

		assert_eq!(token, Token::new("AT", "ATS").expect("Token fixture should be valid."));
		assert_eq!(token.response_param("user_id").as_deref(), Some("7"));
	}

	#[test]
	fn equality_ignores_raw_response() {
		let plain = Token::new("K", "S").expect("Token fixture should be valid.");
		let with_raw = Token::new("K", "S")
			.expect("Token fixture should be valid.")
			.with_raw_response("oauth_token=K&oauth_token_secret=S&user_id=42");

		assert_eq!(plain, with_raw);
		assert_ne!(plain, Token::new("K", "S2").expect("Token fixture should be valid."));

		let set: HashSet<_> = [plain, with_raw].into_iter().collect();

		assert_eq!(set.len(), 1);
	}

	#[test]
	fn extra_response_params_are_decoded() {
		let token = Token::new("K", "S")
			.expect("Token fixture should be valid.")
			.with_raw_response("oauth_token=K&oauth_token_secret=S&screen_name=jane+doe");

		assert_eq!(token.response_param("screen_name").as_deref(), Some("jane doe"));
		assert_eq!(token.response_param("missing"), None);
	}

	#[test]
	fn debug_redacts_secret_material() {
		let token = Token::new("K", "hunter2")
			.expect("Token fixture should be valid.")
			.with_raw_response("oauth_token=K&oauth_token_secret=hunter2");
		let rendered = format!("{token:?}");

		assert!(rendered.contains("\"K\""));
		assert!(!rendered.contains("hunter2"));
	}
}
