//! Application (consumer) credentials registered with the provider.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Consumer key + secret identifying the application itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumer {
	/// Consumer key sent as `oauth_consumer_key`.
	pub key: String,
	/// Consumer secret; first half of every signing key.
	pub secret: TokenSecret,
}
impl Consumer {
	/// Creates consumer credentials from their parts.
	pub fn new(key: impl Into<String>, secret: impl Into<TokenSecret>) -> Self {
		Self { key: key.into(), secret: secret.into() }
	}
}
