//! Inbound payloads, per-call options, and the token-endpoint response body.

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, UserId},
};

/// Body a client posts to an app's token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatePayload {
	/// Requested grant, e.g. `client_credentials` or `refresh_token`.
	pub grant_type: String,
	/// Refresh token for the `refresh_token` grant.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
}
impl AuthenticatePayload {
	/// Payload for the `client_credentials` grant.
	pub fn client_credentials() -> Self {
		Self { grant_type: "client_credentials".into(), refresh_token: None }
	}

	/// Payload for the `refresh_token` grant.
	pub fn refresh_token(token: impl Into<String>) -> Self {
		Self { grant_type: "refresh_token".into(), refresh_token: Some(TokenSecret::new(token)) }
	}
}

/// Per-call options describing the token to mint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthenticateOptions {
	/// Subject user; required unless `su` is set.
	pub user_id: Option<UserId>,
	/// Mints a superuser token.
	pub su: bool,
	/// Extra claims for downstream services; must not reuse reserved names.
	pub service_claims: BTreeMap<String, serde_json::Value>,
	/// Token lifetime; defaults to 24 hours.
	pub token_expiry: Option<Duration>,
}
impl AuthenticateOptions {
	/// Options for a token bound to `user_id`.
	pub fn for_user(user_id: UserId) -> Self {
		Self { user_id: Some(user_id), ..Self::default() }
	}

	/// Options for an app-wide superuser token.
	pub fn superuser() -> Self {
		Self { su: true, ..Self::default() }
	}

	/// Sets or clears the superuser flag.
	pub fn with_su(mut self, su: bool) -> Self {
		self.su = su;

		self
	}

	/// Adds a service claim.
	pub fn with_service_claim(
		mut self,
		name: impl Into<String>,
		value: impl Into<serde_json::Value>,
	) -> Self {
		self.service_claims.insert(name.into(), value.into());

		self
	}

	/// Overrides the token lifetime.
	pub fn with_token_expiry(mut self, expiry: Duration) -> Self {
		self.token_expiry = Some(expiry);

		self
	}
}

/// Signed token paired with its lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
	/// Compact signed token.
	pub token: TokenSecret,
	/// Lifetime from issuance.
	pub expires_in: Duration,
}

/// Successful token-endpoint response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResponse {
	/// Access token.
	pub access_token: TokenSecret,
	/// Always `bearer`.
	pub token_type: String,
	/// Access token lifetime in seconds.
	pub expires_in: i64,
	/// Refresh token, for user-scoped grants.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
}
impl AuthenticationResponse {
	/// HTTP status a token endpoint answers with on success.
	pub const STATUS: u16 = 200;

	/// Builds a bearer response from a minted access token.
	pub fn bearer(access: AccessToken, refresh_token: Option<TokenSecret>) -> Self {
		Self {
			access_token: access.token,
			token_type: "bearer".into(),
			expires_in: access.expires_in.whole_seconds(),
			refresh_token,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn payload_deserializes_from_token_endpoint_body() {
		let payload: AuthenticatePayload =
			serde_json::from_str("{\"grant_type\":\"refresh_token\",\"refresh_token\":\"r.t.k\"}")
				.expect("Payload should deserialize.");

		assert_eq!(payload, AuthenticatePayload::refresh_token("r.t.k"));
		assert!(!format!("{payload:?}").contains("r.t.k"), "Debug must redact the refresh token.");
	}

	#[test]
	fn bearer_response_serializes_seconds() {
		let access = AccessToken { token: TokenSecret::new("a.b.c"), expires_in: Duration::hours(1) };
		let response = AuthenticationResponse::bearer(access, None);

		assert_eq!(
			serde_json::to_value(&response).expect("Response should serialize."),
			serde_json::json!({
				"access_token": "a.b.c",
				"token_type": "bearer",
				"expires_in": 3600,
			})
		);
	}
}
