//! Caller-facing request description.

// crates.io
use http::Method;
// self
use crate::{_prelude::*, error::ConfigError};

/// Describes one request to a service instance.
///
/// `path` is relative to the service instance (and, through the app facade, to the
/// app); it is always rewritten before sending, never assumed to be pre-scoped.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestOptions {
	/// HTTP method.
	pub method: Method,
	/// Service-relative path.
	pub path: String,
	/// Bearer token; when set it always wins over any caller `Authorization` header.
	pub jwt: Option<String>,
	/// Caller headers; override SDK headers.
	pub headers: BTreeMap<String, String>,
	/// Query pairs appended unchanged, in order.
	pub query: Vec<(String, String)>,
	/// JSON body serialized at send time.
	pub body: Option<serde_json::Value>,
}
impl RequestOptions {
	/// Creates a request with no token, headers, query, or body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			jwt: None,
			headers: BTreeMap::new(),
			query: Vec::new(),
			body: None,
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// Shorthand for a `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// Shorthand for a `PUT` request.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::PUT, path)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Attaches a bearer token.
	pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
		self.jwt = Some(jwt.into());

		self
	}

	/// Adds or replaces a caller header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}

	/// Appends a query pair.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Sets a raw JSON body.
	pub fn with_body(mut self, body: serde_json::Value) -> Self {
		self.body = Some(body);

		self
	}

	/// Serializes `body` to JSON and attaches it.
	pub fn with_json<T>(self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		let value = serde_json::to_value(body).map_err(ConfigError::BodySerialize)?;

		Ok(self.with_body(value))
	}
}
