//! Token extraction from `application/x-www-form-urlencoded` provider responses.

// self
use crate::{
	_prelude::*,
	auth::Token,
	extract::{self, ExtractError},
};

/// Parses a token-endpoint response body into a [`Token`].
pub trait TokenExtractor: Send + Sync {
	/// Extracts the token, keeping `body` as the token's raw response.
	fn extract(&self, body: &str) -> Result<Token, ExtractError>;
}

/// Form-encoded extractor reading configurable key/secret fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormTokenExtractor {
	key_field: String,
	secret_field: String,
}
impl FormTokenExtractor {
	/// Default field carrying the token identifier.
	pub const TOKEN_FIELD: &'static str = "oauth_token";
	/// Default field carrying the token secret.
	pub const SECRET_FIELD: &'static str = "oauth_token_secret";

	/// Creates an extractor for providers that rename the token fields.
	pub fn with_fields(key_field: impl Into<String>, secret_field: impl Into<String>) -> Self {
		Self { key_field: key_field.into(), secret_field: secret_field.into() }
	}

	fn missing(&self, field: &str, body: &str) -> ExtractError {
		ExtractError::MissingField { field: field.to_owned(), preview: extract::body_preview(body) }
	}
}
impl Default for FormTokenExtractor {
	fn default() -> Self {
		Self::with_fields(Self::TOKEN_FIELD, Self::SECRET_FIELD)
	}
}
impl TokenExtractor for FormTokenExtractor {
	fn extract(&self, body: &str) -> Result<Token, ExtractError> {
		let trimmed = body.trim();

		if trimmed.is_empty() {
			return Err(ExtractError::EmptyResponse);
		}

		let mut key = None;
		let mut secret = None;

		for (name, value) in url::form_urlencoded::parse(trimmed.as_bytes()) {
			// Fields are matched independently; one field may serve as both key and secret.
			if key.is_none() && name == self.key_field.as_str() {
				key = Some(value.to_string());
			}
			if secret.is_none() && name == self.secret_field.as_str() {
				secret = Some(value.into_owned());
			}
		}

		let key = key.ok_or_else(|| self.missing(&self.key_field, trimmed))?;
		let secret = secret.ok_or_else(|| self.missing(&self.secret_field, trimmed))?;
		let token = Token::new(key, secret)
			.map_err(|_| ExtractError::EmptyTokenKey { field: self.key_field.clone() })?;

		Ok(token.with_raw_response(trimmed))
	}
}
