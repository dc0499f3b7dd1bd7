//! Demonstrates an app-scoped request against a mock Elements cluster: the app facade nests the
//! path under `apps/{app_id}`, mints a superuser token, and surfaces service errors as typed
//! values.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use elements_sdk::{
	app::{App, AppOptions},
	auth::UserId,
	authenticator::{AuthenticateOptions, AuthenticatePayload},
	client::RequestOptions,
	error::Error,
	reqwest::{Client, redirect::Policy},
	transport::ReqwestTransport,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let users_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/services/chatkit/v1/demo-instance/apps/demo-app/users/alice")
				.header_exists("authorization");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"alice\",\"name\":\"Alice\"}");
		})
		.await;
	let missing_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/services/chatkit/v1/demo-instance/apps/demo-app/users/bob");
			then.status(404).body(
				"{\"error\":\"services/chatkit/not_found/user_not_found\",\"error_description\":\"The requested user does not exist\"}",
			);
		})
		.await;
	let options = AppOptions::builder()
		.cluster(server.host())
		.port(server.port())
		.app_id("demo-app")
		.app_key("demo-key:demo-secret")
		.service_name("chatkit")
		.service_version("v1")
		.instance_id("demo-instance")
		.build()?;
	let transport = ReqwestTransport::with_client(
		Client::builder()
			.redirect(Policy::none())
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let app = App::with_transport(options, transport)?;
	let user: serde_json::Value = app.request(RequestOptions::get("users/alice")).await?.json()?;

	println!("Fetched user: {user}.");

	match app.request(RequestOptions::get("users/bob")).await {
		Err(Error::Response(response)) => println!(
			"Service answered {} with `{}`: {}.",
			response.status_code,
			response.error,
			response.error_description.unwrap_or_default()
		),
		other => println!("Unexpected outcome: {other:?}."),
	}

	users_mock.assert_async().await;
	missing_mock.assert_async().await;

	let issued = app.authenticate(
		&AuthenticatePayload::client_credentials(),
		&AuthenticateOptions::for_user(UserId::new("alice")?),
	)?;

	println!(
		"Issued a {} token for alice, valid for {} seconds (refresh token included: {}).",
		issued.token_type,
		issued.expires_in,
		issued.refresh_token.is_some()
	);

	Ok(())
}
