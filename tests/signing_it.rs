// self
use oauth1_broker::{
	auth::Token,
	extract::{
		BaseStringExtractor, HeaderExtractor, OAuthHeaderExtractor, Oauth10aBaseString,
		encode::{normalize_parameters, percent_encode},
	},
	request::{OAuthRequest, Verb},
	sign::{
		HmacSha1Signature, HmacSha256Signature, PlaintextSignature, SignatureService,
		SignatureType, signing_key,
	},
};

const CONSUMER_KEY: &str = "dpf43f3p2l4k3l03";
const CONSUMER_SECRET: &str = "kd94hf93k423kf44";
const TOKEN: &str = "nnch734d00sl2jdk";
const TOKEN_SECRET: &str = "pfkkdhi9sl3r4s00";
const NONCE: &str = "kllo9940pd9333jh";
const TIMESTAMP: &str = "1191242096";
const SIGNATURE: &str = "tR3+Ty81lMeYAr/Fid0kMTYa/WM=";

fn photos_request(oauth_order: &[(&str, &str)]) -> OAuthRequest {
	let mut request =
		OAuthRequest::parse(Verb::Get, "http://photos.example.net/photos?file=vacation.jpg")
			.expect("Photos URI should parse.");

	request.add_query_param("size", "original");

	for (key, value) in oauth_order {
		request.add_oauth_param(*key, *value);
	}

	request
}

fn protocol_params() -> Vec<(&'static str, &'static str)> {
	vec![
		("oauth_consumer_key", CONSUMER_KEY),
		("oauth_token", TOKEN),
		("oauth_signature_method", "HMAC-SHA1"),
		("oauth_timestamp", TIMESTAMP),
		("oauth_nonce", NONCE),
		("oauth_version", "1.0"),
	]
}

#[test]
fn reference_request_signs_to_the_published_value() {
	let request = photos_request(&protocol_params());
	let base = Oauth10aBaseString.extract(&request).expect("Base string should build.");

	assert!(base.starts_with("GET&http%3A%2F%2Fphotos.example.net%2Fphotos&"));
	assert!(base.contains("oauth_nonce%3Dkllo9940pd9333jh"));

	let signature = HmacSha1Signature
		.sign(&base, CONSUMER_SECRET, Some(TOKEN_SECRET))
		.expect("Signing should succeed.");

	assert_eq!(signature, SIGNATURE);
}

#[test]
fn parameter_insertion_order_does_not_matter() {
	let mut reversed = protocol_params();

	reversed.reverse();

	let forward = Oauth10aBaseString
		.extract(&photos_request(&protocol_params()))
		.expect("Base string should build.");
	let backward =
		Oauth10aBaseString.extract(&photos_request(&reversed)).expect("Base string should build.");

	assert_eq!(forward, backward);
}

#[test]
fn header_lists_sorted_encoded_parameters() {
	let mut request = photos_request(&protocol_params());

	request.add_oauth_param("oauth_signature", SIGNATURE);

	let header = OAuthHeaderExtractor.extract(&request).expect("Header should render.");

	assert_eq!(
		header,
		"OAuth oauth_consumer_key=\"dpf43f3p2l4k3l03\", oauth_nonce=\"kllo9940pd9333jh\", \
		 oauth_signature=\"tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D\", \
		 oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1191242096\", \
		 oauth_token=\"nnch734d00sl2jdk\", oauth_version=\"1.0\""
	);
}

#[test]
fn every_input_perturbation_changes_the_signature() {
	let sign = |consumer_secret: &str, token_secret: &str, nonce: &str| {
		let mut params: Vec<(&str, &str)> = protocol_params();

		params.retain(|(key, _)| *key != "oauth_nonce");
		params.push(("oauth_nonce", nonce));

		let base = Oauth10aBaseString
			.extract(&photos_request(&params))
			.expect("Base string should build.");

		HmacSha1Signature
			.sign(&base, consumer_secret, Some(token_secret))
			.expect("Signing should succeed.")
	};
	let reference = sign(CONSUMER_SECRET, TOKEN_SECRET, NONCE);

	assert_eq!(reference, SIGNATURE);
	assert_ne!(sign("kd94hf93k423kf45", TOKEN_SECRET, NONCE), reference);
	assert_ne!(sign(CONSUMER_SECRET, "pfkkdhi9sl3r4s01", NONCE), reference);
	assert_ne!(sign(CONSUMER_SECRET, TOKEN_SECRET, "kllo9940pd9333ji"), reference);
}

#[test]
fn reserved_characters_are_percent_encoded() {
	assert_eq!(percent_encode("a&b=c d"), "a%26b%3Dc%20d");
	assert_eq!(percent_encode("-._~"), "-._~");
	assert_eq!(percent_encode("ü"), "%C3%BC");
	assert_eq!(
		normalize_parameters([("b", "2"), ("a", "x y"), ("a", "1")]),
		"a=1&a=x%20y&b=2"
	);
}

#[test]
fn signature_methods_share_the_signing_key() {
	let key = signing_key("c&s", Some("t s"));

	assert_eq!(key, "c%26s&t%20s");
	assert_eq!(
		PlaintextSignature.sign("unused", "c&s", Some("t s")).expect("Signing should succeed."),
		key
	);

	let sha256 =
		HmacSha256Signature.sign("base", "c&s", Some("t s")).expect("Signing should succeed.");
	let via_type = SignatureType::HmacSha256
		.service()
		.sign("base", "c&s", Some("t s"))
		.expect("Signing should succeed.");

	assert_eq!(sha256, via_type);
}

#[test]
fn request_token_signatures_use_an_empty_token_secret() {
	let with_none = HmacSha1Signature.sign("base", "cs", None).expect("Signing should succeed.");
	let with_empty =
		HmacSha1Signature.sign("base", "cs", Some("")).expect("Signing should succeed.");

	assert_eq!(with_none, with_empty);

	let token = Token::new("RT", "").expect("Empty secrets are allowed.");

	assert!(token.secret().is_empty());
}
