//! Client SDK for the Elements platform: tenant-scoped service requests over HTTPS, a typed
//! error taxonomy for every response class, and superuser/user token minting for apps.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod app;
pub mod auth;
pub mod authenticator;
pub mod client;
pub mod error;
pub mod obs;
pub mod path;
pub mod sdk;
pub mod transport;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		app::{App, AppOptions},
		transport::ReqwestTransport,
	};

	/// App key used by the reqwest-backed integration fixtures.
	pub const TEST_APP_KEY: &str = "test-key:test-secret";

	/// Builds a reqwest transport that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestTransport::with_client(client)
	}

	/// Options pointing at a local mock server for the given app.
	pub fn test_app_options(host: &str, port: u16, app_id: &str) -> AppOptions {
		AppOptions::builder()
			.cluster(host)
			.port(port)
			.app_id(app_id)
			.app_key(TEST_APP_KEY)
			.service_name("chatkit")
			.service_version("v1")
			.instance_id("instance-1")
			.build()
			.expect("Test app options should be valid.")
	}

	/// Constructs an [`App`] backed by the insecure reqwest transport used across integration
	/// tests.
	pub fn build_reqwest_test_app(host: &str, port: u16, app_id: &str) -> App<ReqwestTransport> {
		App::with_transport(test_app_options(host, port, app_id), test_reqwest_transport())
			.expect("Test app should build.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
pub use jsonwebtoken;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _, tokio as _};
