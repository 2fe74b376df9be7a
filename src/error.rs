//! Crate-level error types shared across extractors, signing, providers, and the service facade.

// self
use crate::{
	_prelude::*,
	auth::TokenError,
	extract::ExtractError,
	provider::{ProviderConfigError, TokenEndpoint},
	sign::SignatureError,
};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Credential could not be constructed from the supplied parts.
	#[error("Invalid token: {0}")]
	InvalidToken(#[from] TokenError),
	/// Provider response (or outbound request) could not be parsed by an extractor.
	#[error("Malformed token response: {0}")]
	MalformedTokenResponse(#[from] ExtractError),
	/// Signature computation failed.
	#[error(transparent)]
	Signature(#[from] SignatureError),
	/// Transport failure (DNS, TCP, TLS) while talking to the provider.
	#[error("Provider is unreachable.")]
	ProviderUnreachable(#[from] TransportError),

	/// A signed request was attempted before an access token was established.
	#[error("No access token is available; complete the authorization flow first.")]
	NoAccessToken,
	/// The access-token exchange was attempted without a request token.
	#[error("No request token is available; fetch the authorization URL first.")]
	RequestTokenMissing,
	/// The access-token exchange was attempted without a verifier.
	#[error("A verifier is required before exchanging the request token.")]
	VerifierRequired,
	/// Provider rejected a token-endpoint call.
	#[error("The {endpoint} endpoint rejected the exchange with HTTP {status}.")]
	TokenExchangeFailed {
		/// Endpoint that rejected the call.
		endpoint: TokenEndpoint,
		/// HTTP status code returned by the provider.
		status: u16,
		/// Response body preview, useful for provider-specific diagnostics.
		body: String,
	},
	/// Response body could not be decoded into the requested shape.
	#[error("Response body could not be decoded.")]
	ResponseDecoding {
		/// Structured decoding failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the decoded response.
		status: u16,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Request URI cannot be parsed.
	#[error("Request URI `{uri}` is invalid.")]
	InvalidUri {
		/// URI supplied by the caller.
		uri: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider configuration failed validation.
	#[error(transparent)]
	Provider(#[from] ProviderConfigError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure without a structured source.
	#[error("HTTP client error occurred while calling the provider: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
impl From<ProviderConfigError> for Error {
	fn from(e: ProviderConfigError) -> Self {
		ConfigError::from(e).into()
	}
}
