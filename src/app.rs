//! App facade: the tenant-scoped entry point of the SDK.
//!
//! An [`App`] binds one app identity (id + key) to one service instance. Every request it
//! sends is nested under `apps/{app_id}/…` and, unless the caller brings its own token,
//! carries a freshly minted superuser token. Token issuance for end users is delegated to
//! the app's [`Authenticator`].

pub mod options;

pub use options::*;

// self
use crate::{
	_prelude::*,
	auth::{AppId, AppKey, Claims, TokenSecret, TokenSigner, UserId},
	authenticator::{
		AccessToken, AuthenticateOptions, AuthenticatePayload, AuthenticationResponse,
		AuthenticationStrategy, Authenticator,
	},
	client::{BaseClient, RequestOptions, Response},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	path,
	transport::HttpTransport,
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// App facade specialized for the crate's default reqwest transport.
pub type ReqwestApp = App<ReqwestTransport>;

/// Tenant-scoped facade over a [`BaseClient`] and an [`Authenticator`].
///
/// Immutable after construction; clones share the transport and signer.
pub struct App<T>
where
	T: ?Sized + HttpTransport,
{
	client: BaseClient<T>,
	authenticator: Authenticator,
}
impl<T> App<T>
where
	T: ?Sized + HttpTransport,
{
	/// Path segment tenant ids are nested under.
	pub const TENANT_PREFIX: &'static str = "apps";

	/// Builds an app on top of a caller-provided transport.
	///
	/// Fails with [`Error::InvalidAppKey`] when `options.app_key` is not `id:secret`, and
	/// with a config error when the cluster does not form a valid HTTPS origin.
	pub fn with_transport(options: AppOptions, transport: impl Into<Arc<T>>) -> Result<Self> {
		let key = AppKey::parse(&options.app_key)?;
		let client = BaseClient::new(options.service_address(), options.sdk_info, transport)?;

		Ok(Self { client, authenticator: Authenticator::new(options.app_id, key) })
	}

	/// Replaces the token signer.
	pub fn with_signer(mut self, signer: Arc<dyn TokenSigner>) -> Self {
		self.authenticator = self.authenticator.with_signer(signer);

		self
	}

	/// Replaces the authentication strategy.
	pub fn with_strategy(mut self, strategy: Arc<dyn AuthenticationStrategy>) -> Self {
		self.authenticator = self.authenticator.with_strategy(strategy);

		self
	}

	/// Overrides the refresh token lifetime.
	pub fn with_refresh_token_expiry(mut self, expiry: Duration) -> Result<Self> {
		self.authenticator = self.authenticator.with_refresh_token_expiry(expiry)?;

		Ok(self)
	}

	/// Tenant identifier.
	pub fn app_id(&self) -> &AppId {
		self.authenticator.app_id()
	}

	/// Underlying transport client.
	pub fn client(&self) -> &BaseClient<T> {
		&self.client
	}

	/// Token issuer for this app.
	pub fn authenticator(&self) -> &Authenticator {
		&self.authenticator
	}

	/// Sends a request scoped to this app.
	///
	/// The path is rewritten to `apps/{app_id}/{path}`. A superuser token is minted only
	/// when `options.jwt` is `None`; a caller token is always sent as given.
	pub async fn request(&self, options: RequestOptions) -> Result<Response> {
		let span = OperationSpan::new(OperationKind::Request, "app.request")
			.with_app(self.app_id())
			.with_service(self.client.address());

		obs::record_operation_outcome(OperationKind::Request, OperationOutcome::Attempt);

		let result = span.instrument(self.request_scoped(options)).await;

		obs::record_operation_outcome(OperationKind::Request, OperationOutcome::of(&result));

		result
	}

	/// Validates an inbound payload and mints the tokens it asks for.
	pub fn authenticate(
		&self,
		payload: &AuthenticatePayload,
		options: &AuthenticateOptions,
	) -> Result<AuthenticationResponse> {
		let _guard = OperationSpan::new(OperationKind::Authenticate, "app.authenticate")
			.with_app(self.app_id())
			.entered();

		obs::record_operation_outcome(OperationKind::Authenticate, OperationOutcome::Attempt);

		let result = self.authenticator.authenticate(payload, options);

		obs::record_operation_outcome(OperationKind::Authenticate, OperationOutcome::of(&result));

		result
	}

	/// Mints an access token described by `options`.
	pub fn generate_access_token(&self, options: &AuthenticateOptions) -> Result<AccessToken> {
		let _guard =
			OperationSpan::new(OperationKind::GenerateAccessToken, "app.generate_access_token")
				.with_app(self.app_id())
				.entered();

		obs::record_operation_outcome(OperationKind::GenerateAccessToken, OperationOutcome::Attempt);

		let result = self.authenticator.generate_access_token(options);

		obs::record_operation_outcome(
			OperationKind::GenerateAccessToken,
			OperationOutcome::of(&result),
		);

		result
	}

	/// Mints a refresh token for `user`.
	pub fn generate_refresh_token(&self, user: &UserId) -> Result<TokenSecret> {
		self.authenticator.generate_refresh_token(user)
	}

	/// Mints a superuser token for this app.
	pub fn generate_superuser_token(&self) -> Result<TokenSecret> {
		self.authenticator.generate_superuser_token()
	}

	/// Verifies a token signed with this app's key.
	pub fn verify(&self, token: &str) -> Result<Claims> {
		self.authenticator.verify(token)
	}

	async fn request_scoped(&self, mut options: RequestOptions) -> Result<Response> {
		options.path = path::scope(Self::TENANT_PREFIX, self.app_id(), &options.path);

		if options.jwt.is_none() {
			options.jwt = Some(self.generate_superuser_token()?.expose().to_owned());
		}

		self.client.request(options).await
	}
}
#[cfg(feature = "reqwest")]
impl App<ReqwestTransport> {
	/// Builds an app with a reqwest transport that never follows redirects.
	pub fn new(options: AppOptions) -> Result<Self> {
		Self::with_transport(options, ReqwestTransport::new()?)
	}
}
impl<T> Clone for App<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone(), authenticator: self.authenticator.clone() }
	}
}
impl<T> Debug for App<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("App")
			.field("client", &self.client)
			.field("authenticator", &self.authenticator)
			.finish()
	}
}
