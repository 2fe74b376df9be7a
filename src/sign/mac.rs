// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
// self
use crate::sign::{SignatureError, SignatureService, signing_key};

/// `HMAC-SHA1` signer; base64 (standard alphabet, padded) digest output.
#[derive(Clone, Copy, Debug, Default)]
pub struct HmacSha1Signature;
impl HmacSha1Signature {
	/// `oauth_signature_method` value.
	pub const METHOD: &'static str = "HMAC-SHA1";
}
impl SignatureService for HmacSha1Signature {
	fn method(&self) -> &'static str {
		Self::METHOD
	}

	fn sign(
		&self,
		base_string: &str,
		consumer_secret: &str,
		token_secret: Option<&str>,
	) -> Result<String, SignatureError> {
		let key = signing_key(consumer_secret, token_secret);
		let mut mac = <Hmac<Sha1>>::new_from_slice(key.as_bytes())
			.map_err(|_| SignatureError::InvalidKey { method: Self::METHOD })?;

		mac.update(base_string.as_bytes());

		Ok(STANDARD.encode(mac.finalize().into_bytes()))
	}
}

/// `HMAC-SHA256` signer for providers that moved off SHA-1.
#[derive(Clone, Copy, Debug, Default)]
pub struct HmacSha256Signature;
impl HmacSha256Signature {
	/// `oauth_signature_method` value.
	pub const METHOD: &'static str = "HMAC-SHA256";
}
impl SignatureService for HmacSha256Signature {
	fn method(&self) -> &'static str {
		Self::METHOD
	}

	fn sign(
		&self,
		base_string: &str,
		consumer_secret: &str,
		token_secret: Option<&str>,
	) -> Result<String, SignatureError> {
		let key = signing_key(consumer_secret, token_secret);
		let mut mac = <Hmac<Sha256>>::new_from_slice(key.as_bytes())
			.map_err(|_| SignatureError::InvalidKey { method: Self::METHOD })?;

		mac.update(base_string.as_bytes());

		Ok(STANDARD.encode(mac.finalize().into_bytes()))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const PHOTOS_BASE_STRING: &str = "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal";

	#[test]
	fn hmac_sha1_matches_the_reference_signature() {
		let signature = HmacSha1Signature
			.sign(PHOTOS_BASE_STRING, "kd94hf93k423kf44", Some("pfkkdhi9sl3r4s00"))
			.expect("Signing should succeed.");

		assert_eq!(signature, "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
	}

	#[test]
	fn signatures_are_deterministic() {
		for service in [&HmacSha1Signature as &dyn SignatureService, &HmacSha256Signature] {
			let first = service.sign("GET&x&y", "cs", Some("ts"));
			let second = service.sign("GET&x&y", "cs", Some("ts"));

			assert!(first.is_ok());
			assert_eq!(first, second);
		}
	}

	#[test]
	fn single_character_perturbations_change_the_signature() {
		let base =
			HmacSha1Signature.sign("GET&x&y", "cs", Some("ts")).expect("Signing should succeed.");
		let perturbed = [
			HmacSha1Signature.sign("GET&x&z", "cs", Some("ts")),
			HmacSha1Signature.sign("GET&x&y", "cS", Some("ts")),
			HmacSha1Signature.sign("GET&x&y", "cs", Some("tS")),
			HmacSha1Signature.sign("GET&x&y", "cs", None),
		];

		for candidate in perturbed {
			assert_ne!(candidate.expect("Signing should succeed."), base);
		}
	}

	#[test]
	fn sha256_differs_from_sha1() {
		let sha1 = HmacSha1Signature.sign("base", "cs", None).expect("Signing should succeed.");
		let sha256 = HmacSha256Signature.sign("base", "cs", None).expect("Signing should succeed.");

		assert_ne!(sha1, sha256);
		// 32-byte digest -> 44 base64 characters.
		assert_eq!(sha256.len(), 44);
	}
}
