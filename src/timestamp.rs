//! Timestamp and nonce sources for `oauth_timestamp` / `oauth_nonce`.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

const NONCE_LEN: usize = 32;

/// Produces the per-request freshness values.
pub trait TimestampService: Send + Sync {
	/// Seconds since the Unix epoch, rendered in decimal.
	fn timestamp(&self) -> String;

	/// Value unique per request for a given timestamp.
	fn nonce(&self) -> String;
}

/// Wall clock plus a random alphanumeric nonce.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimestampService;
impl TimestampService for SystemTimestampService {
	fn timestamp(&self) -> String {
		OffsetDateTime::now_utc().unix_timestamp().to_string()
	}

	fn nonce(&self) -> String {
		rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
	}
}

/// Returns the same timestamp and nonce on every call; used for reproducible signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedTimestampService {
	timestamp: String,
	nonce: String,
}
impl FixedTimestampService {
	/// Pins both values.
	pub fn new(timestamp: impl Into<String>, nonce: impl Into<String>) -> Self {
		Self { timestamp: timestamp.into(), nonce: nonce.into() }
	}
}
impl TimestampService for FixedTimestampService {
	fn timestamp(&self) -> String {
		self.timestamp.clone()
	}

	fn nonce(&self) -> String {
		self.nonce.clone()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn system_timestamp_is_decimal_seconds() {
		let service = SystemTimestampService;
		let before = OffsetDateTime::now_utc().unix_timestamp();
		let stamp: i64 = service.timestamp().parse().expect("Timestamp should be decimal.");
		let after = OffsetDateTime::now_utc().unix_timestamp();

		assert!((before..=after).contains(&stamp));
	}

	#[test]
	fn system_nonces_are_alphanumeric_and_distinct() {
		let service = SystemTimestampService;
		let first = service.nonce();
		let second = service.nonce();

		assert_eq!(first.len(), NONCE_LEN);
		assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first, second);
	}

	#[test]
	fn fixed_service_repeats_its_values() {
		let service = FixedTimestampService::new("1191242096", "kllo9940pd9333jh");

		assert_eq!(service.timestamp(), "1191242096");
		assert_eq!(service.nonce(), service.nonce());
	}
}
