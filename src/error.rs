//! SDK-level error types shared across the app facade, transport client, and authenticator.

// crates.io
use http::HeaderMap;
// self
use crate::_prelude::*;

/// SDK-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message used when a 4xx/5xx body cannot be parsed as a structured error.
pub const UNPARSABLE_ERROR_MESSAGE: &str =
	"Something went wrong, but could not parse the response";

/// Canonical SDK error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Service answered with a 4xx/5xx status.
	#[error(transparent)]
	Response(Box<ErrorResponse>),
	/// Token could not be minted from the requested claims.
	#[error(transparent)]
	InvalidClaims(#[from] ClaimsError),
	/// Token signing or verification failed.
	#[error(transparent)]
	Token(#[from] TokenError),
	/// Inbound authentication payload was rejected.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),

	/// App key is not formatted as `id:secret`.
	#[error("App key must be formatted as `id:secret`.")]
	InvalidAppKey,
	/// Service answered with a 3xx status; redirects are never followed.
	#[error("Unsupported redirect response: {status}.")]
	UnsupportedRedirect {
		/// HTTP status code returned by the service.
		status: u16,
	},
	/// Service answered with a status outside the 2xx-5xx ranges.
	#[error("Unsupported response code: {status}.")]
	UnsupportedStatusCode {
		/// HTTP status code returned by the service.
		status: u16,
	},
	/// Successful response body did not match the requested type.
	#[error("Response body could not be decoded.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// HTTP status carried by the error, when the service produced one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Response(response) => Some(response.status_code),
			Self::UnsupportedRedirect { status } | Self::UnsupportedStatusCode { status } =>
				Some(*status),
			_ => None,
		}
	}
}

impl From<ErrorResponse> for Error {
	fn from(response: ErrorResponse) -> Self {
		Self::Response(Box::new(response))
	}
}

/// Configuration and validation failures raised before any network I/O.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Service host or port cannot form a valid URL.
	#[error("Service address `{address}` is not a valid URL.")]
	InvalidUrl {
		/// Address that failed to parse.
		address: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Service host carries a path, query, port, or credentials.
	#[error("Service host `{host}` must be a bare host name.")]
	InvalidHost {
		/// Offending host.
		host: String,
	},
	/// Request path contains a `.`/`..` step that would leave its service or app scope.
	#[error("Request path `{path}` contains the relative segment `{segment}`.")]
	InvalidPath {
		/// Path as supplied by the caller.
		path: String,
		/// Offending segment.
		segment: String,
	},
	/// Header name or value is not valid HTTP.
	#[error("Header `{name}` is invalid.")]
	InvalidHeader {
		/// Offending header name.
		name: String,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	BodySerialize(#[source] serde_json::Error),
	/// Identifier validation failed.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Required option was not supplied.
	#[error("Missing required option `{field}`.")]
	MissingField {
		/// Option name.
		field: &'static str,
	},
	/// Token lifetime must be positive.
	#[error("Token expiry must be positive.")]
	NonPositiveExpiry,
	/// Token lifetime pushes `exp` past the representable date range.
	#[error("Token expiry of {expiry} is out of range.")]
	ExpiryOutOfRange {
		/// Requested lifetime.
		expiry: Duration,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Structured failure returned by a service for any 4xx/5xx response.
#[derive(Clone, Debug, ThisError)]
#[error("Service responded with {status_code}: {error}.")]
pub struct ErrorResponse {
	/// HTTP status code.
	pub status_code: u16,
	/// Response headers as received.
	pub headers: HeaderMap,
	/// Machine-readable error code.
	pub error: String,
	/// Human-readable description, when supplied.
	pub error_description: Option<String>,
	/// Link to further documentation, when supplied.
	pub error_uri: Option<String>,
}
impl ErrorResponse {
	/// Builds a response from a parsed error body.
	pub fn from_body(status_code: u16, headers: HeaderMap, body: ErrorBody) -> Self {
		Self {
			status_code,
			headers,
			error: body.error,
			error_description: body.error_description,
			error_uri: body.error_uri,
		}
	}

	/// Builds the fallback response used when the body is not a structured error.
	pub fn unparsable(status_code: u16, headers: HeaderMap) -> Self {
		Self {
			status_code,
			headers,
			error: UNPARSABLE_ERROR_MESSAGE.into(),
			error_description: Some(String::new()),
			error_uri: None,
		}
	}
}

/// Wire shape of a structured error body (`{error, error_description?, error_uri?}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Machine-readable error code.
	pub error: String,
	/// Human-readable description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
	/// Link to further documentation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_uri: Option<String>,
}

/// Reasons a token cannot be built from the requested claims.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ClaimsError {
	/// Non-superuser tokens must name a user.
	#[error("A user id is required unless the token is a superuser token.")]
	MissingSubject,
	/// Service claims must not shadow identity or validity claims.
	#[error("Service claim `{claim}` collides with a reserved claim.")]
	ReservedClaim {
		/// Offending claim name.
		claim: String,
	},
}

/// Token signing and verification failures.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// Claims could not be signed.
	#[error("Token could not be signed.")]
	Sign(#[source] jsonwebtoken::errors::Error),
	/// Signature does not match the secret.
	#[error("Token signature is invalid.")]
	InvalidSignature,
	/// Token is past its expiry.
	#[error("Token has expired.")]
	Expired,
	/// Token is not a well-formed signed token.
	#[error("Token is malformed.")]
	Malformed(#[source] jsonwebtoken::errors::Error),
}

/// Failures raised while validating an inbound authentication payload.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Grant type is unknown or disabled by the strategy.
	#[error("The grant_type provided, {grant_type}, is unsupported.")]
	UnsupportedGrantType {
		/// Grant type as supplied by the caller.
		grant_type: String,
	},
	/// Refresh grant without a refresh token.
	#[error("The refresh_token grant requires a refresh_token.")]
	MissingRefreshToken,
	/// Refresh token failed verification or does not belong to this app/user.
	#[error("The refresh token is invalid: {reason}.")]
	InvalidRefreshToken {
		/// Why the token was refused.
		reason: String,
		/// Verification failure, when the signature check itself failed.
		#[source]
		source: Option<TokenError>,
	},
	/// Authentication strategy refused the payload.
	#[error("Authentication was rejected: {reason}.")]
	Rejected {
		/// Strategy-supplied reason string.
		reason: String,
	},
}
impl AuthenticationError {
	/// HTTP status a token endpoint should answer with.
	pub fn status(&self) -> u16 {
		match self {
			Self::UnsupportedGrantType { .. } | Self::MissingRefreshToken => 400,
			Self::InvalidRefreshToken { .. } | Self::Rejected { .. } => 401,
		}
	}

	/// Stable error code for the response body.
	pub fn code(&self) -> &'static str {
		match self {
			Self::UnsupportedGrantType { .. } => "token_provider/invalid_grant_type",
			Self::MissingRefreshToken => "token_provider/missing_refresh_token",
			Self::InvalidRefreshToken { .. } => "token_provider/invalid_refresh_token",
			Self::Rejected { .. } => "token_provider/unauthorized",
		}
	}

	/// Error body a token endpoint can serialize back to the caller.
	pub fn error_body(&self) -> ErrorBody {
		ErrorBody {
			error: self.code().into(),
			error_description: Some(self.to_string()),
			error_uri: None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_is_exposed_for_response_classes() {
		let response = ErrorResponse::unparsable(503, HeaderMap::new());

		assert_eq!(Error::from(response).status(), Some(503));
		assert_eq!(Error::UnsupportedRedirect { status: 302 }.status(), Some(302));
		assert_eq!(Error::UnsupportedStatusCode { status: 600 }.status(), Some(600));
		assert_eq!(Error::InvalidAppKey.status(), None);
	}

	#[test]
	fn unparsable_response_uses_fallback_message() {
		let response = ErrorResponse::unparsable(500, HeaderMap::new());

		assert_eq!(response.error, UNPARSABLE_ERROR_MESSAGE);
		assert_eq!(response.error_description.as_deref(), Some(""));
		assert!(response.error_uri.is_none());
	}

	#[test]
	fn authentication_errors_render_token_provider_bodies() {
		let err = AuthenticationError::UnsupportedGrantType { grant_type: "password".into() };
		let body = err.error_body();

		assert_eq!(err.status(), 400);
		assert_eq!(body.error, "token_provider/invalid_grant_type");
		assert_eq!(
			body.error_description.as_deref(),
			Some("The grant_type provided, password, is unsupported.")
		);
		assert_eq!(
			serde_json::to_string(&body).expect("Error body should serialize."),
			"{\"error\":\"token_provider/invalid_grant_type\",\"error_description\":\"The grant_type provided, password, is unsupported.\"}"
		);
	}
}
