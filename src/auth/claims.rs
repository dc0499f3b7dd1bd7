//! Token claim sets for superuser, user access, and refresh tokens.

// self
use crate::{
	_prelude::*,
	auth::{AppId, AppKeyId, UserId},
};

/// Claim names owned by the SDK; service claims may not reuse them.
pub const RESERVED_CLAIMS: [&str; 7] = ["app", "iss", "sub", "su", "refresh", "iat", "exp"];

/// Named claims embedded in every token minted for an app.
///
/// `iat`/`exp` are epoch seconds. Additional service claims are flattened into the token
/// payload in key order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
	/// App (tenant) the token belongs to.
	pub app: String,
	/// Issuer; always the app key id.
	pub iss: String,
	/// Subject user, for user-scoped tokens.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sub: Option<String>,
	/// Superuser flag.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub su: Option<bool>,
	/// Marks refresh tokens.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh: Option<bool>,
	/// Issued-at, epoch seconds.
	pub iat: i64,
	/// Expiry, epoch seconds.
	pub exp: i64,
	/// Service-specific claims.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}
impl Claims {
	/// Backdating applied to superuser tokens to absorb server clock skew.
	pub const SUPERUSER_LEEWAY: Duration = Duration::seconds(30);
	/// Lifetime of a superuser token, measured from `now`.
	pub const SUPERUSER_TTL: Duration = Duration::minutes(5);

	/// Base claim set valid over `[issued_at, expires_at)`.
	pub fn new(
		app: &AppId,
		issuer: &AppKeyId,
		issued_at: OffsetDateTime,
		expires_at: OffsetDateTime,
	) -> Self {
		Self {
			app: app.to_string(),
			iss: issuer.to_string(),
			sub: None,
			su: None,
			refresh: None,
			iat: issued_at.unix_timestamp(),
			exp: expires_at.unix_timestamp(),
			extra: BTreeMap::new(),
		}
	}

	/// Superuser claims: backdated by [`Self::SUPERUSER_LEEWAY`], valid for
	/// [`Self::SUPERUSER_TTL`] after `now`.
	pub fn superuser(app: &AppId, issuer: &AppKeyId, now: OffsetDateTime) -> Self {
		let mut claims =
			Self::new(app, issuer, now - Self::SUPERUSER_LEEWAY, now + Self::SUPERUSER_TTL);

		claims.su = Some(true);

		claims
	}

	/// Sets the subject user.
	pub fn with_subject(mut self, user: &UserId) -> Self {
		self.sub = Some(user.to_string());

		self
	}

	/// Returns `true` when the superuser flag is set.
	pub fn is_superuser(&self) -> bool {
		self.su.unwrap_or(false)
	}

	/// Returns `true` when the token is a refresh token.
	pub fn is_refresh(&self) -> bool {
		self.refresh.unwrap_or(false)
	}

	/// Seconds between `iat` and `exp`.
	pub fn lifetime(&self) -> Duration {
		Duration::seconds(self.exp - self.iat)
	}
}
