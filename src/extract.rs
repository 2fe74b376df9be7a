//! Extractor pipeline: pure mappings from provider responses and outbound requests to the
//! values the signer and the session need.
//!
//! - [`TokenExtractor`] parses token-endpoint bodies into [`Token`](crate::auth::Token)s.
//! - [`BaseStringExtractor`] renders the canonical signature base string.
//! - [`HeaderExtractor`] renders the `Authorization: OAuth …` header value.
//!
//! Every extractor is stateless and `Send + Sync`; failures are never retried because malformed
//! input does not become well-formed on a second attempt.

pub mod base_string;
pub mod encode;
pub mod header;
pub mod token;

pub use base_string::*;
pub use encode::*;
pub use header::*;
pub use token::*;

// self
use crate::_prelude::*;

const BODY_PREVIEW_LIMIT: usize = 256;

/// Failures raised by extractors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ExtractError {
	/// Provider returned an empty body where a token was expected.
	#[error("Provider response body is empty.")]
	EmptyResponse,
	/// A required form field is absent.
	#[error("Provider response is missing `{field}`: {preview}")]
	MissingField {
		/// Name of the absent field.
		field: String,
		/// Truncated response body.
		preview: String,
	},
	/// The token identifier field is present but empty.
	#[error("Provider response carries an empty `{field}`.")]
	EmptyTokenKey {
		/// Name of the empty field.
		field: String,
	},
	/// A header was requested for a request that carries no `oauth_*` parameters.
	#[error("Request carries no oauth_* parameters to render.")]
	MissingOAuthParams,
}

/// Truncates a response body for error messages.
pub(crate) fn body_preview(body: &str) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}
