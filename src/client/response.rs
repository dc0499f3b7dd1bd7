//! Success payloads and status classification.

// crates.io
use http::{HeaderMap, StatusCode};
// self
use crate::{
	_prelude::*,
	error::{ErrorBody, ErrorResponse},
	transport::HttpResponse,
};

/// Successful (2xx) service response; the body is kept verbatim.
#[derive(Clone, Debug)]
pub struct Response {
	/// HTTP status.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl Response {
	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Body parsed as JSON; failures report the offending path.
	pub fn json<T>(&self) -> Result<T>
	where
		T: for<'de> Deserialize<'de>,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { source })
	}
}

/// Classifies a completed exchange.
///
/// Total over every status code:
/// - 2xx: success, body untouched.
/// - 3xx: [`Error::UnsupportedRedirect`].
/// - 4xx/5xx: [`Error::Response`], parsed from `{error, error_description?, error_uri?}` or the
///   fallback message when the body is not such an object. Valid JSON whose `error` is missing
///   or not a string also takes the fallback rather than surfacing a partial body.
/// - anything else: [`Error::UnsupportedStatusCode`].
pub fn classify(response: HttpResponse) -> Result<Response> {
	let (parts, body) = response.into_parts();
	let status = parts.status.as_u16();

	match status {
		200..=299 => Ok(Response { status: parts.status, headers: parts.headers, body }),
		300..=399 => Err(Error::UnsupportedRedirect { status }),
		400..=599 => {
			let response = match serde_json::from_slice::<ErrorBody>(&body) {
				Ok(parsed) => ErrorResponse::from_body(status, parts.headers, parsed),
				Err(_) => ErrorResponse::unparsable(status, parts.headers),
			};

			Err(response.into())
		},
		_ => Err(Error::UnsupportedStatusCode { status }),
	}
}
