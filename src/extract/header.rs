//! `Authorization` header rendering.

// self
use crate::{
	_prelude::*,
	extract::{ExtractError, encode},
	request::OAuthRequest,
};

/// Renders the `Authorization` header value for a signed request.
pub trait HeaderExtractor: Send + Sync {
	/// Builds the header value from the request's `oauth_*` parameters.
	fn extract(&self, request: &OAuthRequest) -> Result<String, ExtractError>;
}

/// Standard `OAuth k="v", k="v"` rendering with keys sorted and values percent-encoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct OAuthHeaderExtractor;
impl HeaderExtractor for OAuthHeaderExtractor {
	fn extract(&self, request: &OAuthRequest) -> Result<String, ExtractError> {
		let params = request.oauth_params();

		if params.is_empty() {
			return Err(ExtractError::MissingOAuthParams);
		}

		let mut header = String::from("OAuth ");

		for (idx, (key, value)) in params.iter().enumerate() {
			if idx > 0 {
				header.push_str(", ");
			}

			header.push_str(&encode::percent_encode(key));
			header.push_str("=\"");
			header.push_str(&encode::percent_encode(value));
			header.push('"');
		}

		Ok(header)
	}
}
