//! Transport client bound to one versioned service instance.
//!
//! [`BaseClient`] turns a [`RequestOptions`] into a fully qualified HTTPS request under
//! `services/{name}/{version}/{instance}/…`, merges headers with a fixed precedence, runs
//! the exchange on its [`HttpTransport`], and classifies the outcome via [`classify`].
//! It never retries, follows redirects, or caches.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

// crates.io
use http::{
	HeaderMap, HeaderName, HeaderValue,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	path,
	sdk::SdkInfo,
	transport::{HttpRequest, HttpTransport},
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Transport client specialized for the crate's default reqwest transport.
pub type ReqwestBaseClient = BaseClient<ReqwestTransport>;

/// Address of a specific deployed version of a platform service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceAddress {
	/// Cluster host, e.g. `us1.elements.example`.
	pub host: String,
	/// Optional port; the scheme default (443) otherwise.
	pub port: Option<u16>,
	/// Service name.
	pub service_name: String,
	/// Service version.
	pub service_version: String,
	/// Service instance identifier.
	pub instance_id: String,
}
impl ServiceAddress {
	/// Service-relative prefix every request path is nested under.
	pub fn prefix(&self) -> String {
		format!("services/{}/{}/{}", self.service_name, self.service_version, self.instance_id)
	}

	/// Parses `https://{host}[:{port}]`.
	///
	/// The host must be a bare host name or address; ports belong in [`Self::port`].
	pub fn base_url(&self) -> Result<Url, ConfigError> {
		let raw = format!("https://{}", self.host);
		let mut url = Url::parse(&raw)
			.map_err(|source| ConfigError::InvalidUrl { address: raw.clone(), source })?;

		if url.path() != "/"
			|| url.query().is_some()
			|| url.port().is_some()
			|| !url.username().is_empty()
			|| url.set_port(self.port).is_err()
		{
			return Err(ConfigError::InvalidHost { host: self.host.clone() });
		}

		Ok(url)
	}
}

/// Executes requests against one [`ServiceAddress`].
///
/// The address and SDK headers are immutable after construction; clones share the same
/// transport (and therefore its connection pool).
pub struct BaseClient<T>
where
	T: ?Sized + HttpTransport,
{
	address: ServiceAddress,
	base_url: Url,
	sdk_info: SdkInfo,
	transport: Arc<T>,
}

impl<T> BaseClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client; fails when the host/port do not form a valid HTTPS origin.
	pub fn new(
		address: ServiceAddress,
		sdk_info: SdkInfo,
		transport: impl Into<Arc<T>>,
	) -> Result<Self> {
		let base_url = address.base_url()?;

		Ok(Self { address, base_url, sdk_info, transport: transport.into() })
	}

	/// Service instance this client targets.
	pub fn address(&self) -> &ServiceAddress {
		&self.address
	}

	/// Shared transport handle.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}

	/// Builds the outbound request without performing I/O.
	///
	/// Paths containing `.` or `..` segments (in any spelling a URL parser resolves) fail
	/// with [`ConfigError::InvalidPath`] instead of being resolved out of the instance prefix.
	///
	/// Header precedence, lowest to highest: SDK headers (plus `Content-Type` when a body is
	/// present), caller headers, then `Authorization: Bearer {jwt}` when a token is supplied.
	/// Header names compare case-insensitively, so a caller `authorization` header never
	/// survives next to a supplied token.
	pub fn build_request(&self, options: &RequestOptions) -> Result<HttpRequest> {
		let scoped = path::sanitize(&format!("{}/{}", self.address.prefix(), options.path));

		if let Some(segment) = path::find_dot_segment(&scoped) {
			return Err(ConfigError::InvalidPath {
				path: options.path.clone(),
				segment: segment.to_owned(),
			}
			.into());
		}

		let mut url = self.base_url.clone();

		url.set_path(&scoped);

		if !options.query.is_empty() {
			url.query_pairs_mut().extend_pairs(options.query.iter());
		}

		let body = options
			.body
			.as_ref()
			.map(serde_json::to_vec)
			.transpose()
			.map_err(ConfigError::BodySerialize)?;
		let headers = self.merge_headers(options, body.is_some())?;
		let mut request = http::Request::builder()
			.method(options.method.clone())
			.uri(url.as_str())
			.body(body.unwrap_or_default())
			.map_err(ConfigError::from)?;

		*request.headers_mut() = headers;

		Ok(request)
	}

	/// Sends the request and classifies the response.
	pub async fn request(&self, options: RequestOptions) -> Result<Response> {
		let request = self.build_request(&options)?;
		let response = self.transport.execute(request).await?;

		#[cfg(feature = "tracing")]
		tracing::debug!(
			status = response.status().as_u16(),
			service = %self.address.service_name,
			"service responded"
		);

		classify(response)
	}

	fn merge_headers(&self, options: &RequestOptions, has_body: bool) -> Result<HeaderMap> {
		let mut headers = HeaderMap::new();

		for (name, value) in &self.sdk_info.headers() {
			headers.insert(header_name(name)?, header_value(name, value)?);
		}
		if has_body {
			headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		}
		for (name, value) in &options.headers {
			headers.insert(header_name(name)?, header_value(name, value)?);
		}
		if let Some(jwt) = options.jwt.as_deref() {
			headers.insert(AUTHORIZATION, header_value("Authorization", &format!("Bearer {jwt}"))?);
		}

		Ok(headers)
	}
}
impl<T> Clone for BaseClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			address: self.address.clone(),
			base_url: self.base_url.clone(),
			sdk_info: self.sdk_info.clone(),
			transport: self.transport.clone(),
		}
	}
}
impl<T> Debug for BaseClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BaseClient")
			.field("address", &self.address)
			.field("sdk_info", &self.sdk_info)
			.finish()
	}
}

fn header_name(name: &str) -> Result<HeaderName, ConfigError> {
	HeaderName::from_bytes(name.as_bytes())
		.map_err(|_| ConfigError::InvalidHeader { name: name.to_owned() })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
	HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeader { name: name.to_owned() })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{error::TransportError, transport::TransportFuture};

	struct UnreachableTransport;
	impl HttpTransport for UnreachableTransport {
		fn execute(&self, _request: HttpRequest) -> TransportFuture<'_> {
			Box::pin(async {
				Err(TransportError::Io(std::io::Error::other("Request building must not perform I/O.")))
			})
		}
	}

	fn address(port: Option<u16>) -> ServiceAddress {
		ServiceAddress {
			host: "cluster.elements.test".into(),
			port,
			service_name: "chatkit".into(),
			service_version: "v2".into(),
			instance_id: "inst-9".into(),
		}
	}

	fn client() -> BaseClient<UnreachableTransport> {
		BaseClient::new(address(Some(8443)), SdkInfo::new("chatkit", "1.0.0"), UnreachableTransport)
			.expect("Client fixture should build.")
	}

	#[test]
	fn url_nests_sanitized_path_under_service_instance() {
		let request = client()
			.build_request(
				&RequestOptions::get("//apps/A1/ rooms//42/").with_query("limit", "5 items"),
			)
			.expect("Request should build.");

		assert_eq!(
			request.uri().to_string(),
			"https://cluster.elements.test:8443/services/chatkit/v2/inst-9/apps/A1/rooms/42?limit=5+items"
		);
		assert_eq!(request.method(), http::Method::GET);
		assert!(request.body().is_empty());
		assert!(request.headers().get(CONTENT_TYPE).is_none());
	}

	#[test]
	fn default_port_is_omitted() {
		let client =
			BaseClient::new(address(None), SdkInfo::default(), UnreachableTransport)
				.expect("Client fixture should build.");
		let request =
			client.build_request(&RequestOptions::get("ping")).expect("Request should build.");

		assert_eq!(
			request.uri().to_string(),
			"https://cluster.elements.test/services/chatkit/v2/inst-9/ping"
		);
	}

	#[test]
	fn headers_merge_with_fixed_precedence() {
		let options = RequestOptions::post("rooms")
			.with_header("x-sdk-version", "override")
			.with_header("authorization", "Basic caller")
			.with_header("X-Trace", "t-1")
			.with_jwt("jwt-1")
			.with_body(serde_json::json!({ "name": "lobby" }));
		let request = client().build_request(&options).expect("Request should build.");
		let headers = request.headers();

		assert_eq!(headers.get("X-SDK-Product").and_then(|v| v.to_str().ok()), Some("chatkit"));
		assert_eq!(headers.get("X-SDK-Version").and_then(|v| v.to_str().ok()), Some("override"));
		assert_eq!(headers.get("x-trace").and_then(|v| v.to_str().ok()), Some("t-1"));
		assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
		assert_eq!(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()), Some("Bearer jwt-1"));
		assert_eq!(
			headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
			Some("application/json")
		);
		assert_eq!(request.body().as_slice(), b"{\"name\":\"lobby\"}");
	}

	#[test]
	fn caller_authorization_survives_without_jwt() {
		let options = RequestOptions::get("rooms").with_header("Authorization", "Bearer mine");
		let request = client().build_request(&options).expect("Request should build.");

		assert_eq!(
			request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
			Some("Bearer mine")
		);
	}

	#[test]
	fn invalid_headers_fail_before_io() {
		let err = client()
			.build_request(&RequestOptions::get("rooms").with_header("bad header", "x"))
			.expect_err("Header names with spaces must be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidHeader { name }) if name == "bad header"));
	}

	#[test]
	fn relative_segments_never_reach_the_wire() {
		for raw in ["../other", "rooms/../../../../other-svc/v9/x", "rooms/%2E%2e/x", "rooms\\..\\x", "./rooms"] {
			let err = client()
				.build_request(&RequestOptions::get(raw))
				.expect_err("Relative segments must be rejected.");

			assert!(
				matches!(&err, Error::Config(ConfigError::InvalidPath { path, .. }) if path == raw),
				"`{raw}` produced {err:?}."
			);
		}

		client()
			.build_request(&RequestOptions::get("rooms/..42/v1.2"))
			.expect("Dots inside a segment are ordinary characters.");
	}

	#[test]
	fn hosts_must_be_bare() {
		for host in ["cluster.test/path", "cluster.test:8080", "user@cluster.test", "cluster.test?x=1"] {
			let mut address = address(None);

			address.host = host.into();

			assert!(
				matches!(address.base_url(), Err(ConfigError::InvalidHost { .. })),
				"`{host}` must be rejected."
			);
		}

		let mut address = address(None);

		address.host = String::new();

		assert!(matches!(address.base_url(), Err(ConfigError::InvalidUrl { .. })));
	}
}
