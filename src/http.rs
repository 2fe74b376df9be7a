//! Transport seam for signed requests.
//!
//! [`RestClient`] is the service's only dependency on an HTTP stack. It speaks the `oauth2`
//! crate's [`HttpRequest`]/[`HttpResponse`] types so any client can be adapted without pulling
//! in reqwest. [`RestResponse`] is what callers get back: status, headers, and body exactly as
//! the provider sent them.

// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::HeaderMap,
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`RestClient::execute`].
pub type RestFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of dispatching signed requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back several services,
/// and the returned future must be `Send` so service futures can hop executors. Redirects should
/// not be followed: token endpoints answer directly and a redirected signed request would carry
/// a signature computed for another URL.
pub trait RestClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves to the raw provider response.
	fn execute(&self, request: HttpRequest) -> RestFuture<'_, Self::TransportError>;
}

/// Provider response handed back unmodified.
#[derive(Clone, Debug)]
pub struct RestResponse {
	status: u16,
	headers: HeaderMap,
	body: Vec<u8>,
}
impl RestResponse {
	/// HTTP status code.
	pub fn status(&self) -> u16 {
		self.status
	}

	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Response headers.
	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Raw body bytes.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Consumes the response and returns the body bytes.
	pub fn into_body(self) -> Vec<u8> {
		self.body
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Decodes the JSON body into `T`, reporting the failing path on error.
	pub fn decode<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::ResponseDecoding { source, status: self.status })
	}
}
impl From<HttpResponse> for RestResponse {
	fn from(response: HttpResponse) -> Self {
		let (parts, body) = response.into_parts();

		Self { status: parts.status.as_u16(), headers: parts.headers, body }
	}
}

/// Thin wrapper around [`ReqwestClient`] implementing [`RestClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestRestClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestRestClient {
	/// Builds a client that never follows redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`]; configure it to disable redirects.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestRestClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl RestClient for ReqwestRestClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> RestFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Maps a transport failure into the crate taxonomy.
pub(crate) fn map_transport_error<E>(e: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match e {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::HttpRequest(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		other => TransportError::Other { message: other.to_string() }.into(),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::{HeaderValue, StatusCode};
	// self
	use super::*;

	fn response(status: u16, body: &str) -> RestResponse {
		let mut http = HttpResponse::new(body.as_bytes().to_vec());

		*http.status_mut() = StatusCode::from_u16(status).expect("Fixture status should be valid.");

		http.into()
	}

	#[test]
	fn headers_and_status_pass_through_untouched() {
		let mut http = HttpResponse::new(b"rate limited".to_vec());

		*http.status_mut() = StatusCode::TOO_MANY_REQUESTS;
		http.headers_mut().insert("retry-after", HeaderValue::from_static("120"));

		let response = RestResponse::from(http);

		assert_eq!(response.status(), 429);
		assert!(!response.is_success());
		assert_eq!(
			response.headers().get("retry-after").and_then(|v| v.to_str().ok()),
			Some("120")
		);
		assert_eq!(response.text(), "rate limited");
	}

	#[test]
	fn decode_reports_the_failing_path() {
		#[derive(Debug, Deserialize)]
		struct Photo {
			#[allow(dead_code)]
			id: u64,
		}
		#[derive(Debug, Deserialize)]
		struct Album {
			#[allow(dead_code)]
			photos: Vec<Photo>,
		}

		let ok = response(200, r#"{"photos":[{"id":1}]}"#);

		assert!(ok.decode::<Album>().is_ok());

		let bad = response(200, r#"{"photos":[{"id":"one"}]}"#);
		let err = bad.decode::<Album>().expect_err("Decoding should fail.");

		match err {
			Error::ResponseDecoding { source, status } => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "photos[0].id");
			},
			other => panic!("Unexpected error: {other:?}"),
		}
	}

	#[test]
	fn transport_errors_map_into_the_taxonomy() {
		let io = std::io::Error::other("reset");

		assert!(matches!(
			map_transport_error::<std::io::Error>(HttpClientError::Io(io)),
			Error::ProviderUnreachable(TransportError::Io(_))
		));
		assert!(matches!(
			map_transport_error::<std::io::Error>(HttpClientError::Other("boom".into())),
			Error::ProviderUnreachable(TransportError::Other { .. })
		));
		assert!(matches!(
			map_transport_error(HttpClientError::Reqwest(Box::new(std::io::Error::other("dns")))),
			Error::ProviderUnreachable(TransportError::Network { .. })
		));
	}
}
