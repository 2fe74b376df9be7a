//! Signed calls to protected resources.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	http::{RestClient, RestResponse},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	request::{OAuthRequest, Verb},
	service::OAuthService,
};

const XML_CONTENT_TYPE: &str = "application/xml";

impl<C> OAuthService<C>
where
	C: ?Sized + RestClient,
{
	/// Signs `request` with the session's access token and sends it.
	///
	/// Fails with [`Error::NoAccessToken`] before touching the network when no access token is
	/// held. The provider response is returned unmodified, whatever its status.
	pub async fn send_signed(&self, mut request: OAuthRequest) -> Result<RestResponse> {
		const KIND: FlowKind = FlowKind::SignedRequest;

		let span = FlowSpan::new(KIND, "send_signed");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token =
					self.session.read().current_token().cloned().ok_or(Error::NoAccessToken)?;

				self.sign(&mut request, Some(&token))?;
				self.dispatch(request).await
			})
			.await;

		obs::record_flow_result(KIND, result)
	}

	/// Sends a signed request without extra parameters.
	pub async fn send_signed_request(&self, verb: Verb, uri: &str) -> Result<RestResponse> {
		self.send_signed(OAuthRequest::parse(verb, uri)?).await
	}

	/// Sends a signed request carrying `params` in the query (`GET`, `DELETE`, `HEAD`,
	/// `OPTIONS`) or a form body (`POST`, `PUT`, `PATCH`).
	pub async fn send_signed_request_with_params<I, K, V>(
		&self,
		verb: Verb,
		uri: &str,
		params: I,
	) -> Result<RestResponse>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut request = OAuthRequest::parse(verb, uri)?;

		for (key, value) in params {
			request.add_param(key, value);
		}

		self.send_signed(request).await
	}

	/// Sends a signed request carrying one parameter.
	pub async fn send_signed_request_with_param(
		&self,
		verb: Verb,
		uri: &str,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> Result<RestResponse> {
		self.send_signed_request_with_params(verb, uri, [(key, value)]).await
	}

	/// Sends a signed request with an XML body; the body is not part of the signature.
	pub async fn send_signed_xml_request(
		&self,
		verb: Verb,
		uri: &str,
		payload: impl Into<String>,
	) -> Result<RestResponse> {
		let mut request = OAuthRequest::parse(verb, uri)?;

		request.set_payload(XML_CONTENT_TYPE, payload.into());

		self.send_signed(request).await
	}

	/// Issues a `GET` (signed or not) and decodes the JSON body into `T`.
	pub async fn get<T>(&self, uri: &str, signed: bool) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let request = OAuthRequest::parse(Verb::Get, uri)?;
		let response =
			if signed { self.send_signed(request).await? } else { self.dispatch(request).await? };

		response.decode()
	}
}
