//! Signing seam for compact tokens.
//!
//! The SDK never touches signature math directly. Everything goes through
//! [`TokenSigner`], whose default implementation [`HmacSigner`] delegates to
//! `jsonwebtoken` with HS256.

// crates.io
use jsonwebtoken::{
	Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind,
};
// self
use crate::{
	_prelude::*,
	auth::{Claims, KeySecret},
	error::TokenError,
};

/// Signs and verifies compact tokens for a claim set and secret.
pub trait TokenSigner: Send + Sync {
	/// Signs `claims` with `secret` and returns the compact token.
	fn sign(&self, claims: &Claims, secret: &KeySecret) -> Result<String, TokenError>;

	/// Verifies `token` against `secret`, returning its claims.
	///
	/// Fails with [`TokenError::InvalidSignature`] under any other secret and with
	/// [`TokenError::Expired`] once `exp` has passed.
	fn verify(&self, token: &str, secret: &KeySecret) -> Result<Claims, TokenError>;
}

/// HS256 signer backed by `jsonwebtoken`.
#[derive(Clone, Debug, Default)]
pub struct HmacSigner {
	/// Clock-skew tolerance, in seconds, applied when checking `exp`.
	pub leeway: u64,
}
impl HmacSigner {
	/// Creates a signer that tolerates `leeway` seconds of clock skew during verification.
	pub fn with_leeway(leeway: u64) -> Self {
		Self { leeway }
	}

	fn validation(&self) -> Validation {
		let mut validation = Validation::new(Algorithm::HS256);

		validation.leeway = self.leeway;
		validation.validate_aud = false;

		validation
	}
}
impl TokenSigner for HmacSigner {
	fn sign(&self, claims: &Claims, secret: &KeySecret) -> Result<String, TokenError> {
		jsonwebtoken::encode(
			&Header::new(Algorithm::HS256),
			claims,
			&EncodingKey::from_secret(secret.expose().as_bytes()),
		)
		.map_err(TokenError::Sign)
	}

	fn verify(&self, token: &str, secret: &KeySecret) -> Result<Claims, TokenError> {
		let data = jsonwebtoken::decode::<Claims>(
			token,
			&DecodingKey::from_secret(secret.expose().as_bytes()),
			&self.validation(),
		)
		.map_err(|e| match e.kind() {
			ErrorKind::InvalidSignature => TokenError::InvalidSignature,
			ErrorKind::ExpiredSignature => TokenError::Expired,
			_ => TokenError::Malformed(e),
		})?;

		Ok(data.claims)
	}
}
