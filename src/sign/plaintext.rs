// self
use crate::sign::{SignatureError, SignatureService, signing_key};

/// `PLAINTEXT` signer: the signature is the signing key itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaintextSignature;
impl PlaintextSignature {
	/// `oauth_signature_method` value.
	pub const METHOD: &'static str = "PLAINTEXT";
}
impl SignatureService for PlaintextSignature {
	fn method(&self) -> &'static str {
		Self::METHOD
	}

	fn sign(
		&self,
		_base_string: &str,
		consumer_secret: &str,
		token_secret: Option<&str>,
	) -> Result<String, SignatureError> {
		Ok(signing_key(consumer_secret, token_secret))
	}
}
