//! Token issuance and inbound authentication for one app.
//!
//! [`Authenticator`] mints every token the SDK hands out: superuser tokens for the app
//! facade's own requests, user access tokens, and the refresh tokens that let end users
//! renew access without re-authenticating. All tokens are signed with the app key secret
//! through a [`TokenSigner`] and carry `app`/`iss` claims naming the app and key.

pub mod payload;
pub mod strategy;

pub use payload::*;
pub use strategy::*;

// self
use crate::{
	_prelude::*,
	auth::{AppId, AppKey, AppKeyId, Claims, HmacSigner, RESERVED_CLAIMS, TokenSecret, TokenSigner, UserId},
	error::{AuthenticationError, ClaimsError, ConfigError, TokenError},
};

/// Issues and validates tokens bound to one app identity.
#[derive(Clone)]
pub struct Authenticator {
	app_id: AppId,
	key: AppKey,
	signer: Arc<dyn TokenSigner>,
	strategy: Arc<dyn AuthenticationStrategy>,
	refresh_token_expiry: Duration,
}
impl Authenticator {
	/// Access token lifetime when [`AuthenticateOptions::token_expiry`] is unset.
	pub const DEFAULT_TOKEN_EXPIRY: Duration = Duration::hours(24);
	/// Refresh token lifetime unless overridden.
	pub const DEFAULT_REFRESH_TOKEN_EXPIRY: Duration = Duration::days(30);

	/// Creates an authenticator using HS256 signing and the default strategy.
	pub fn new(app_id: AppId, key: AppKey) -> Self {
		Self {
			app_id,
			key,
			signer: Arc::new(HmacSigner::default()),
			strategy: Arc::new(DefaultAuthenticationStrategy),
			refresh_token_expiry: Self::DEFAULT_REFRESH_TOKEN_EXPIRY,
		}
	}

	/// Replaces the token signer.
	pub fn with_signer(mut self, signer: Arc<dyn TokenSigner>) -> Self {
		self.signer = signer;

		self
	}

	/// Replaces the authentication strategy.
	pub fn with_strategy(mut self, strategy: Arc<dyn AuthenticationStrategy>) -> Self {
		self.strategy = strategy;

		self
	}

	/// Overrides the refresh token lifetime.
	pub fn with_refresh_token_expiry(mut self, expiry: Duration) -> Result<Self> {
		expires_at(OffsetDateTime::now_utc(), expiry)?;

		self.refresh_token_expiry = expiry;

		Ok(self)
	}

	/// App this authenticator issues tokens for.
	pub fn app_id(&self) -> &AppId {
		&self.app_id
	}

	/// Key id used as the token issuer.
	pub fn key_id(&self) -> &AppKeyId {
		&self.key.id
	}

	/// Validates an inbound payload and mints the tokens it asks for.
	pub fn authenticate(
		&self,
		payload: &AuthenticatePayload,
		options: &AuthenticateOptions,
	) -> Result<AuthenticationResponse> {
		self.authenticate_at(payload, options, OffsetDateTime::now_utc())
	}

	/// [`Self::authenticate`] with an explicit clock.
	pub fn authenticate_at(
		&self,
		payload: &AuthenticatePayload,
		options: &AuthenticateOptions,
		now: OffsetDateTime,
	) -> Result<AuthenticationResponse> {
		let grant = payload.grant_type.parse::<GrantType>()?;

		if !self.strategy.supports(grant) {
			return Err(AuthenticationError::UnsupportedGrantType {
				grant_type: payload.grant_type.clone(),
			}
			.into());
		}

		self.strategy.authorize(grant, payload, options)?;

		match grant {
			GrantType::ClientCredentials => {
				let access = self.generate_access_token_at(options, now)?;
				let refresh = match (&options.user_id, options.su) {
					(Some(user), false) => Some(self.generate_refresh_token_at(user, now)?),
					_ => None,
				};

				Ok(AuthenticationResponse::bearer(access, refresh))
			},
			GrantType::RefreshToken => {
				let presented = payload
					.refresh_token
					.as_ref()
					.ok_or(AuthenticationError::MissingRefreshToken)?;
				let user = self.verify_refresh_token(presented.expose(), options)?;
				let options = AuthenticateOptions { user_id: Some(user.clone()), ..options.clone() };
				let access = self.generate_access_token_at(&options, now)?;
				let refresh = self.generate_refresh_token_at(&user, now)?;

				Ok(AuthenticationResponse::bearer(access, Some(refresh)))
			},
		}
	}

	/// Mints an access token described by `options`.
	pub fn generate_access_token(&self, options: &AuthenticateOptions) -> Result<AccessToken> {
		self.generate_access_token_at(options, OffsetDateTime::now_utc())
	}

	/// [`Self::generate_access_token`] with an explicit clock: `iat = now`, `exp = now + ttl`.
	pub fn generate_access_token_at(
		&self,
		options: &AuthenticateOptions,
		now: OffsetDateTime,
	) -> Result<AccessToken> {
		let expires_in = options.token_expiry.unwrap_or(Self::DEFAULT_TOKEN_EXPIRY);
		let mut claims =
			Claims::new(&self.app_id, &self.key.id, now, expires_at(now, expires_in)?);

		match (&options.user_id, options.su) {
			(Some(user), _) => claims = claims.with_subject(user),
			(None, true) => {},
			(None, false) => return Err(ClaimsError::MissingSubject.into()),
		}
		if options.su {
			claims.su = Some(true);
		}
		if let Some(reserved) =
			options.service_claims.keys().find(|name| RESERVED_CLAIMS.contains(&name.as_str()))
		{
			return Err(ClaimsError::ReservedClaim { claim: reserved.clone() }.into());
		}

		claims.extra = options.service_claims.clone();

		Ok(AccessToken { token: self.sign(&claims)?, expires_in })
	}

	/// Mints a refresh token for `user`.
	pub fn generate_refresh_token(&self, user: &UserId) -> Result<TokenSecret> {
		self.generate_refresh_token_at(user, OffsetDateTime::now_utc())
	}

	/// [`Self::generate_refresh_token`] with an explicit clock.
	pub fn generate_refresh_token_at(
		&self,
		user: &UserId,
		now: OffsetDateTime,
	) -> Result<TokenSecret> {
		let mut claims =
			Claims::new(&self.app_id, &self.key.id, now, expires_at(now, self.refresh_token_expiry)?)
				.with_subject(user);

		claims.refresh = Some(true);

		self.sign(&claims)
	}

	/// Mints a superuser token: backdated 30 seconds, valid 5 minutes.
	pub fn generate_superuser_token(&self) -> Result<TokenSecret> {
		self.generate_superuser_token_at(OffsetDateTime::now_utc())
	}

	/// [`Self::generate_superuser_token`] with an explicit clock.
	pub fn generate_superuser_token_at(&self, now: OffsetDateTime) -> Result<TokenSecret> {
		self.sign(&Claims::superuser(&self.app_id, &self.key.id, now))
	}

	/// Verifies a token signed with this app's key.
	pub fn verify(&self, token: &str) -> Result<Claims> {
		Ok(self.signer.verify(token, &self.key.secret)?)
	}

	fn sign(&self, claims: &Claims) -> Result<TokenSecret> {
		Ok(TokenSecret::new(self.signer.sign(claims, &self.key.secret)?))
	}

	fn verify_refresh_token(
		&self,
		token: &str,
		options: &AuthenticateOptions,
	) -> Result<UserId, AuthenticationError> {
		let claims = self.signer.verify(token, &self.key.secret).map_err(|e| {
			let reason = match e {
				TokenError::Expired => "token has expired",
				_ => "token failed verification",
			};

			invalid_refresh(reason, Some(e))
		})?;

		if !claims.is_refresh() {
			return Err(invalid_refresh("token is not a refresh token", None));
		}
		if claims.app != self.app_id.as_ref() {
			return Err(invalid_refresh("token was issued for another app", None));
		}

		let user = claims
			.sub
			.as_deref()
			.and_then(|sub| UserId::new(sub).ok())
			.ok_or_else(|| invalid_refresh("token has no valid subject", None))?;

		if options.user_id.as_ref().is_some_and(|expected| expected != &user) {
			return Err(invalid_refresh("token subject does not match the requested user", None));
		}

		Ok(user)
	}
}
impl Debug for Authenticator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator")
			.field("app_id", &self.app_id)
			.field("key", &self.key)
			.field("refresh_token_expiry", &self.refresh_token_expiry)
			.finish()
	}
}

fn expires_at(now: OffsetDateTime, expiry: Duration) -> Result<OffsetDateTime, ConfigError> {
	if !expiry.is_positive() {
		return Err(ConfigError::NonPositiveExpiry);
	}

	now.checked_add(expiry).ok_or(ConfigError::ExpiryOutOfRange { expiry })
}

fn invalid_refresh(reason: &str, source: Option<TokenError>) -> AuthenticationError {
	AuthenticationError::InvalidRefreshToken { reason: reason.into(), source }
}
