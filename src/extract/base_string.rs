//! Signature base string construction.

// self
use crate::{
	_prelude::*,
	extract::{ExtractError, encode},
	request::OAuthRequest,
};

/// Renders the string a [`SignatureService`](crate::sign::SignatureService) signs.
pub trait BaseStringExtractor: Send + Sync {
	/// Builds the base string for `request`.
	fn extract(&self, request: &OAuthRequest) -> Result<String, ExtractError>;
}

/// OAuth 1.0a base string: `VERB&ENCODE(base URI)&ENCODE(normalized parameters)`.
///
/// Parameters are the URL query, the form body, and every `oauth_*` parameter except
/// `oauth_signature`. Raw payloads (XML, JSON) are not part of the base string.
#[derive(Clone, Copy, Debug, Default)]
pub struct Oauth10aBaseString;
impl BaseStringExtractor for Oauth10aBaseString {
	fn extract(&self, request: &OAuthRequest) -> Result<String, ExtractError> {
		let query = request.query_params();
		let params = query
			.iter()
			.chain(request.body_params())
			.map(|(key, value)| (key.as_str(), value.as_str()))
			.chain(
				request
					.oauth_params()
					.iter()
					.filter(|(key, _)| key.as_str() != "oauth_signature")
					.map(|(key, value)| (key.as_str(), value.as_str())),
			);
		let normalized = encode::normalize_parameters(params);

		Ok(format!(
			"{}&{}&{}",
			encode::percent_encode(request.verb().as_str()),
			encode::percent_encode(&base_uri(request.url())),
			encode::percent_encode(&normalized),
		))
	}
}

/// Normalizes `url` to `scheme://host[:port]/path`: lowercase scheme and host, default ports
/// dropped, query and fragment stripped.
pub fn base_uri(url: &Url) -> String {
	let mut base = format!("{}://", url.scheme().to_ascii_lowercase());

	if let Some(host) = url.host_str() {
		base.push_str(&host.to_ascii_lowercase());
	}
	// `Url::port` already omits the scheme's default port.
	if let Some(port) = url.port() {
		base.push(':');
		base.push_str(&port.to_string());
	}

	base.push_str(url.path());

	base
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::request::Verb;

	fn photos_request() -> OAuthRequest {
		let mut request = OAuthRequest::parse(
			Verb::Get,
			"http://photos.example.net/photos?file=vacation.jpg&size=original",
		)
		.expect("Fixture URI should parse.");

		request.add_oauth_param("oauth_consumer_key", "dpf43f3p2l4k3l03");
		request.add_oauth_param("oauth_token", "nnch734d00sl2jdk");
		request.add_oauth_param("oauth_signature_method", "HMAC-SHA1");
		request.add_oauth_param("oauth_timestamp", "1191242096");
		request.add_oauth_param("oauth_nonce", "kllo9940pd9333jh");
		request.add_oauth_param("oauth_version", "1.0");

		request
	}

	#[test]
	fn matches_the_reference_base_string() {
		let base =
			Oauth10aBaseString.extract(&photos_request()).expect("Base string should build.");

		assert_eq!(
			base,
			"GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
		);
	}

	#[test]
	fn signature_param_is_excluded() {
		let unsigned =
			Oauth10aBaseString.extract(&photos_request()).expect("Base string should build.");
		let mut signed = photos_request();

		signed.add_oauth_param("oauth_signature", "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");

		assert_eq!(
			Oauth10aBaseString.extract(&signed).expect("Base string should build."),
			unsigned
		);
	}

	#[test]
	fn base_uri_normalizes_scheme_host_and_port() {
		let url = Url::parse("HTTP://Example.COM:80/r%20v/X?id=123#frag")
			.expect("Fixture URI should parse.");

		assert_eq!(base_uri(&url), "http://example.com/r%20v/X");

		let url =
			Url::parse("https://www.example.net:8080/?q=1").expect("Fixture URI should parse.");

		assert_eq!(base_uri(&url), "https://www.example.net:8080/");
	}

	#[test]
	fn parameter_order_does_not_change_the_base_string() {
		let mut first = OAuthRequest::parse(Verb::Post, "https://api.example.com/statuses?b=2&a=1")
			.expect("Fixture URI should parse.");

		first.add_body_param("status", "Hello Ladies + Gentlemen, a signed OAuth request!");
		first.add_body_param("include_entities", "true");
		first.add_oauth_param("oauth_nonce", "n");
		first.add_oauth_param("oauth_consumer_key", "ck");

		let mut second = OAuthRequest::parse(Verb::Post, "https://api.example.com/statuses?a=1&b=2")
			.expect("Fixture URI should parse.");

		second.add_oauth_param("oauth_consumer_key", "ck");
		second.add_body_param("include_entities", "true");
		second.add_oauth_param("oauth_nonce", "n");
		second.add_body_param("status", "Hello Ladies + Gentlemen, a signed OAuth request!");

		assert_eq!(
			Oauth10aBaseString.extract(&first).expect("Base string should build."),
			Oauth10aBaseString.extract(&second).expect("Base string should build."),
		);
	}

	#[test]
	fn reserved_characters_are_double_encoded_in_parameters() {
		let mut request = OAuthRequest::parse(Verb::Get, "https://api.example.com/q")
			.expect("Fixture URI should parse.");

		request.add_query_param("expr", "a&b=c d");

		let base = Oauth10aBaseString.extract(&request).expect("Base string should build.");

		assert_eq!(base, "GET&https%3A%2F%2Fapi.example.com%2Fq&expr%3Da%2526b%253Dc%2520d");
	}
}
