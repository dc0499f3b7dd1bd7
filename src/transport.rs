//! Transport primitives for outbound service exchanges.
//!
//! [`HttpTransport`] is the SDK's only dependency on an HTTP stack. The transport
//! client hands it a fully built [`HttpRequest`] (absolute URL, merged headers,
//! serialized body) and receives the raw [`HttpResponse`]. Status classification,
//! scoping, and token handling all happen above this seam, so custom transports only
//! need to move bytes.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Outbound request with a serialized body.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Raw response as received from the network; the body is never parsed here.
pub type HttpResponse = http::Response<Vec<u8>>;
/// Future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of performing a single HTTPS exchange.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by
/// every client of a process, and the returned future must be `Send` so requests can hop
/// executors. Implementations must not follow redirects, retry, or cache: the transport
/// client classifies every status itself and surfaces transport failures unchanged.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Performs the exchange. Only DNS/TCP/TLS/IO failures are errors; any HTTP status,
	/// including 3xx-5xx, is a successful exchange.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Service responses must never be followed across redirects, so clients built by
/// [`ReqwestTransport::new`] use [`reqwest::redirect::Policy::none`]. Configure any custom
/// [`ReqwestClient`] passed to [`ReqwestTransport::with_client`] the same way. Reqwest
/// keeps connections alive and pools them across calls.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport whose client never follows redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	// self
	use super::*;
	use crate::_preludet::test_reqwest_transport;

	#[tokio::test]
	async fn reqwest_transport_returns_redirects_unfollowed() {
		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(GET).path("/moved");
				then.status(302).header("location", "/elsewhere").body("moved");
			})
			.await;
		let transport = test_reqwest_transport();
		let request = http::Request::get(server.url("/moved"))
			.body(Vec::new())
			.expect("Request fixture should build.");
		let response = transport.execute(request).await.expect("Exchange should complete.");

		assert_eq!(response.status().as_u16(), 302);
		assert_eq!(response.body().as_slice(), b"moved");

		mock.assert_async().await;
	}

	#[tokio::test]
	async fn reqwest_transport_surfaces_connection_failures() {
		let transport = ReqwestTransport::new().expect("Default transport should build.");
		let request = http::Request::get("http://127.0.0.1:1/unreachable")
			.body(Vec::new())
			.expect("Request fixture should build.");
		let err = transport.execute(request).await.expect_err("Port 1 should refuse connections.");

		assert!(matches!(err, TransportError::Network { .. }));
	}
}
