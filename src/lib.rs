//! OAuth 1.0a client engine that runs the request-token dance for a session-scoped credential and
//! signs outbound requests with deterministic base strings and pluggable signature methods.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod extract;
pub mod http;
pub mod obs;
pub mod provider;
pub mod request;
pub mod service;
pub mod sign;
pub mod timestamp;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// crates.io
	use oauth2::{
		HttpClientError, HttpRequest, HttpResponse,
		http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	};
	// self
	use crate::{
		auth::{Consumer, ProviderId},
		http::{RestClient, RestFuture},
		provider::{ProviderConfig, ProviderConfigBuilder},
		service::OAuthService,
		timestamp::FixedTimestampService,
	};

	/// Consumer key used by the canned fixtures.
	pub const CONSUMER_KEY: &str = "CK";
	/// Consumer secret used by the canned fixtures.
	pub const CONSUMER_SECRET: &str = "CS";

	/// Transport failure emitted by [`ScriptedRestClient`] when its script runs dry.
	#[derive(Debug, ThisError)]
	#[error("Scripted transport has no response left.")]
	pub struct ScriptExhausted;

	/// Request captured by [`ScriptedRestClient`].
	#[derive(Clone, Debug)]
	pub struct RecordedRequest {
		/// HTTP method.
		pub method: String,
		/// Full request URI, including any query string.
		pub uri: String,
		/// Request headers.
		pub headers: HeaderMap,
		/// Request body decoded as UTF-8 (lossy).
		pub body: String,
	}
	impl RecordedRequest {
		fn capture(request: &HttpRequest) -> Self {
			Self {
				method: request.method().as_str().to_owned(),
				uri: request.uri().to_string(),
				headers: request.headers().clone(),
				body: String::from_utf8_lossy(request.body()).into_owned(),
			}
		}

		/// Returns the `Authorization` header value, if present.
		pub fn authorization(&self) -> Option<&str> {
			self.headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
		}
	}

	/// Scripted transport that replays canned responses and records every request it receives.
	#[derive(Clone, Debug, Default)]
	pub struct ScriptedRestClient {
		responses: Arc<Mutex<VecDeque<(u16, String)>>>,
		requests: Arc<Mutex<Vec<RecordedRequest>>>,
	}
	impl ScriptedRestClient {
		/// Queues a response with the given status and body.
		pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
			self.responses.lock().push_back((status, body.into()));

			self
		}

		/// Returns a copy of every request dispatched so far.
		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().clone()
		}
	}
	impl RestClient for ScriptedRestClient {
		type TransportError = ScriptExhausted;

		fn execute(&self, request: HttpRequest) -> RestFuture<'_, Self::TransportError> {
			self.requests.lock().push(RecordedRequest::capture(&request));

			let next = self.responses.lock().pop_front();

			Box::pin(async move {
				let (status, body) =
					next.ok_or_else(|| HttpClientError::Reqwest(Box::new(ScriptExhausted)))?;
				let mut response = HttpResponse::new(body.into_bytes());

				*response.status_mut() = StatusCode::from_u16(status)
					.map_err(|e| HttpClientError::Other(e.to_string()))?;

				Ok(response)
			})
		}
	}

	/// Returns a builder pointing at `https://provider.example.com` with a fixed clock.
	pub fn test_config_builder() -> ProviderConfigBuilder {
		let id = ProviderId::new("test-provider").expect("Provider fixture should be valid.");

		ProviderConfig::builder(id)
			.request_token_endpoint(
				Url::parse("https://provider.example.com/oauth/request_token")
					.expect("Request token endpoint fixture should parse."),
			)
			.access_token_endpoint(
				Url::parse("https://provider.example.com/oauth/access_token")
					.expect("Access token endpoint fixture should parse."),
			)
			.authorization_endpoint(
				Url::parse("https://provider.example.com/oauth/authorize")
					.expect("Authorization endpoint fixture should parse."),
			)
			.timestamp_service(Arc::new(FixedTimestampService::new("1700000000", "fixednonce")))
	}

	/// Builds an [`OAuthService`] over the scripted transport using the canned consumer.
	pub fn build_test_service(client: ScriptedRestClient) -> OAuthService<ScriptedRestClient> {
		let config = test_config_builder().build().expect("Test provider config should build.");

		OAuthService::with_rest_client(config, Consumer::new(CONSUMER_KEY, CONSUMER_SECRET), client)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		hash::{Hash, Hasher},
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
