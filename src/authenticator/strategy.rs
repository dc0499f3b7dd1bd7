//! Authentication strategy hooks that decide which inbound payloads are honored.
//!
//! The authenticator owns token minting and refresh-token verification; strategies only
//! gate which grants are enabled and whether a given payload may proceed. Override
//! them to plug in whatever assertion or credential check the platform requires.

// self
use crate::{
	_prelude::*,
	authenticator::{AuthenticateOptions, AuthenticatePayload},
	error::AuthenticationError,
};

/// Grant types understood by the authenticator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Mint a fresh access token for the options supplied by the app.
	ClientCredentials,
	/// Exchange a refresh token for a new access token.
	RefreshToken,
}
impl GrantType {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::ClientCredentials => "client_credentials",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for GrantType {
	type Err = AuthenticationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"client_credentials" => Ok(GrantType::ClientCredentials),
			"refresh_token" => Ok(GrantType::RefreshToken),
			other => Err(AuthenticationError::UnsupportedGrantType { grant_type: other.into() }),
		}
	}
}

/// Strategy hook consulted before any token is minted.
///
/// Implementors are required to be `Send + Sync` so one strategy can back every clone of an
/// app. `supports` defaults to enabling every [`GrantType`].
pub trait AuthenticationStrategy: Send + Sync {
	/// Accepts or rejects a payload for the resolved grant.
	fn authorize(
		&self,
		grant: GrantType,
		payload: &AuthenticatePayload,
		options: &AuthenticateOptions,
	) -> Result<(), AuthenticationError>;

	/// Whether `grant` is enabled at all; disabled grants fail as unsupported.
	fn supports(&self, _grant: GrantType) -> bool {
		true
	}
}

/// Strategy that enables every grant and accepts every well-formed payload.
///
/// Suitable when the app has already authenticated the end user through its own session
/// before calling into the SDK.
#[derive(Debug, Default)]
pub struct DefaultAuthenticationStrategy;
impl Display for DefaultAuthenticationStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-authentication-strategy")
	}
}
impl AuthenticationStrategy for DefaultAuthenticationStrategy {
	fn authorize(
		&self,
		_grant: GrantType,
		_payload: &AuthenticatePayload,
		_options: &AuthenticateOptions,
	) -> Result<(), AuthenticationError> {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn grant_types_parse_from_wire_labels() {
		assert_eq!("client_credentials".parse::<GrantType>().ok(), Some(GrantType::ClientCredentials));
		assert_eq!("refresh_token".parse::<GrantType>().ok(), Some(GrantType::RefreshToken));

		let err = "password".parse::<GrantType>().expect_err("Unknown grants must be rejected.");

		assert!(matches!(
			err,
			AuthenticationError::UnsupportedGrantType { grant_type } if grant_type == "password"
		));
	}

	#[test]
	fn default_strategy_accepts_everything() {
		let strategy = DefaultAuthenticationStrategy;
		let payload = AuthenticatePayload::client_credentials();

		assert!(strategy.supports(GrantType::RefreshToken));
		assert!(
			strategy
				.authorize(GrantType::ClientCredentials, &payload, &AuthenticateOptions::default())
				.is_ok()
		);
	}
}
