//! Signature services computing `oauth_signature` over a base string.
//!
//! The signing key is always `ENCODE(consumer_secret) & ENCODE(token_secret)` (the token half is
//! empty while fetching a request token). Services are stateless, so one instance can sign
//! concurrent requests.

mod mac;
mod plaintext;

pub use mac::*;
pub use plaintext::*;

// self
use crate::{_prelude::*, extract::encode};

/// Failures raised by signature services.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SignatureError {
	/// The MAC implementation rejected the derived key.
	#[error("Signing key was rejected by the {method} implementation.")]
	InvalidKey {
		/// Signature method that rejected the key.
		method: &'static str,
	},
}

/// Computes the `oauth_signature` for a base string.
pub trait SignatureService: Send + Sync {
	/// Value sent as `oauth_signature_method`.
	fn method(&self) -> &'static str;

	/// Signs `base_string` with the key derived from both secrets.
	fn sign(
		&self,
		base_string: &str,
		consumer_secret: &str,
		token_secret: Option<&str>,
	) -> Result<String, SignatureError>;
}

/// Signature methods shipped with the crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureType {
	/// `HMAC-SHA1`, the OAuth 1.0a default.
	#[default]
	#[serde(rename = "HMAC-SHA1")]
	HmacSha1,
	/// `HMAC-SHA256`.
	#[serde(rename = "HMAC-SHA256")]
	HmacSha256,
	/// `PLAINTEXT`; only safe over TLS.
	#[serde(rename = "PLAINTEXT")]
	Plaintext,
}
impl SignatureType {
	/// Returns the `oauth_signature_method` identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureType::HmacSha1 => HmacSha1Signature::METHOD,
			SignatureType::HmacSha256 => HmacSha256Signature::METHOD,
			SignatureType::Plaintext => PlaintextSignature::METHOD,
		}
	}

	/// Instantiates the matching service.
	pub fn service(self) -> Arc<dyn SignatureService> {
		match self {
			SignatureType::HmacSha1 => Arc::new(HmacSha1Signature),
			SignatureType::HmacSha256 => Arc::new(HmacSha256Signature),
			SignatureType::Plaintext => Arc::new(PlaintextSignature),
		}
	}
}
impl Display for SignatureType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Derives the signing key `ENCODE(consumer_secret)&ENCODE(token_secret)`.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
	format!(
		"{}&{}",
		encode::percent_encode(consumer_secret),
		encode::percent_encode(token_secret.unwrap_or_default())
	)
}
