//! Outbound request model shared by the extractors, the signer, and the transport.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method, Request,
		header::{CONTENT_TYPE, HeaderValue},
	},
};
// self
use crate::{_prelude::*, error::ConfigError};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP verbs understood by the signing pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `DELETE`.
	Delete,
	/// `PATCH`.
	Patch,
	/// `HEAD`.
	Head,
	/// `OPTIONS`.
	Options,
}
impl Verb {
	/// Returns the canonical (uppercase) method name used in base strings.
	pub const fn as_str(self) -> &'static str {
		match self {
			Verb::Get => "GET",
			Verb::Post => "POST",
			Verb::Put => "PUT",
			Verb::Delete => "DELETE",
			Verb::Patch => "PATCH",
			Verb::Head => "HEAD",
			Verb::Options => "OPTIONS",
		}
	}

	/// Returns `true` when request parameters travel in a form body rather than the query.
	pub const fn carries_body(self) -> bool {
		matches!(self, Verb::Post | Verb::Put | Verb::Patch)
	}

	fn method(self) -> Method {
		match self {
			Verb::Get => Method::GET,
			Verb::Post => Method::POST,
			Verb::Put => Method::PUT,
			Verb::Delete => Method::DELETE,
			Verb::Patch => Method::PATCH,
			Verb::Head => Method::HEAD,
			Verb::Options => Method::OPTIONS,
		}
	}
}
impl Display for Verb {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Raw request body that bypasses form encoding (and therefore the base string).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
	/// `Content-Type` sent with the body.
	pub content_type: String,
	/// Body bytes.
	pub body: Vec<u8>,
}

/// One outbound call before transport: verb, URL (with query), form parameters, `oauth_*`
/// parameters, extra headers, and an optional raw payload.
///
/// Requests are built per call and consumed by [`OAuthRequest::into_http_request`]; the nonce
/// and timestamp added during signing make them single-use.
#[derive(Clone, Debug)]
pub struct OAuthRequest {
	verb: Verb,
	url: Url,
	body_params: Vec<(String, String)>,
	oauth_params: BTreeMap<String, String>,
	headers: Vec<(String, String)>,
	payload: Option<Payload>,
}
impl OAuthRequest {
	/// Creates a request for an already parsed URL.
	pub fn new(verb: Verb, url: Url) -> Self {
		Self {
			verb,
			url,
			body_params: Vec::new(),
			oauth_params: BTreeMap::new(),
			headers: Vec::new(),
			payload: None,
		}
	}

	/// Parses `uri` and creates a request for it.
	pub fn parse(verb: Verb, uri: &str) -> Result<Self> {
		let url = Url::parse(uri)
			.map_err(|source| ConfigError::InvalidUri { uri: uri.to_owned(), source })?;

		Ok(Self::new(verb, url))
	}

	/// HTTP verb.
	pub fn verb(&self) -> Verb {
		self.verb
	}

	/// Target URL including the query string.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Decoded query parameters in URL order.
	pub fn query_params(&self) -> Vec<(String, String)> {
		self.url.query_pairs().into_owned().collect()
	}

	/// Form body parameters in insertion order.
	pub fn body_params(&self) -> &[(String, String)] {
		&self.body_params
	}

	/// `oauth_*` protocol parameters, ordered by name.
	pub fn oauth_params(&self) -> &BTreeMap<String, String> {
		&self.oauth_params
	}

	/// Extra headers in insertion order.
	pub fn headers(&self) -> &[(String, String)] {
		&self.headers
	}

	/// Raw payload, if one was set.
	pub fn payload(&self) -> Option<&Payload> {
		self.payload.as_ref()
	}

	/// Appends a query-string parameter.
	pub fn add_query_param(&mut self, key: impl AsRef<str>, value: impl AsRef<str>) {
		self.url.query_pairs_mut().append_pair(key.as_ref(), value.as_ref());
	}

	/// Appends a form body parameter.
	pub fn add_body_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.body_params.push((key.into(), value.into()));
	}

	/// Appends a request parameter where the verb expects it: the form body for
	/// `POST`/`PUT`/`PATCH`, the query string otherwise.
	pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let (key, value) = (key.into(), value.into());

		if self.verb.carries_body() && self.payload.is_none() {
			self.add_body_param(key, value);
		} else {
			self.add_query_param(key, value);
		}
	}

	/// Sets (or replaces) an `oauth_*` protocol parameter.
	pub fn add_oauth_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.oauth_params.insert(key.into(), value.into());
	}

	/// Appends an extra header.
	pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.headers.push((name.into(), value.into()));
	}

	/// Sets a raw payload; any form parameters move to the query string so they stay signed.
	pub fn set_payload(&mut self, content_type: impl Into<String>, body: impl Into<Vec<u8>>) {
		for (key, value) in std::mem::take(&mut self.body_params) {
			self.add_query_param(key, value);
		}

		self.payload = Some(Payload { content_type: content_type.into(), body: body.into() });
	}

	/// Moves every `oauth_*` parameter into the query string.
	pub fn move_oauth_params_to_query(&mut self) {
		let params = std::mem::take(&mut self.oauth_params);

		if params.is_empty() {
			return;
		}

		let mut pairs = self.url.query_pairs_mut();

		for (key, value) in &params {
			pairs.append_pair(key, value);
		}

		drop(pairs);
	}

	/// Converts the request into the transport representation.
	pub fn into_http_request(self) -> Result<HttpRequest, ConfigError> {
		let OAuthRequest { verb, url, body_params, headers, payload, .. } = self;
		let mut builder = Request::builder().method(verb.method()).uri(url.as_str());

		for (name, value) in &headers {
			builder = builder.header(name.as_str(), value.as_str());
		}

		let body = match payload {
			Some(payload) => {
				builder = builder.header(CONTENT_TYPE, payload.content_type.as_str());

				payload.body
			},
			None if !body_params.is_empty() => {
				builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

				url::form_urlencoded::Serializer::new(String::new())
					.extend_pairs(body_params.iter())
					.finish()
					.into_bytes()
			},
			None => Vec::new(),
		};

		Ok(builder.body(body)?)
	}
}
