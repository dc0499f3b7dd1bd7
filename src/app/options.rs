//! Construction-time configuration for [`App`](crate::app::App).

// self
use crate::{_prelude::*, auth::AppId, client::ServiceAddress, error::ConfigError, sdk::SdkInfo};

/// Everything an app needs to reach its service instance and sign tokens.
#[derive(Clone)]
pub struct AppOptions {
	/// Cluster host, e.g. `us1.elements.example`.
	pub cluster: String,
	/// Optional port; HTTPS default otherwise.
	pub port: Option<u16>,
	/// Tenant identifier every request is scoped under.
	pub app_id: AppId,
	/// Credential formatted as `id:secret`; parsed when the app is built.
	pub app_key: String,
	/// Service name.
	pub service_name: String,
	/// Service version.
	pub service_version: String,
	/// Service instance identifier.
	pub instance_id: String,
	/// Identity headers attached to every request.
	pub sdk_info: SdkInfo,
}
impl AppOptions {
	/// Starts an empty builder.
	pub fn builder() -> AppOptionsBuilder {
		AppOptionsBuilder::default()
	}

	/// Service address derived from the cluster and service coordinates.
	pub fn service_address(&self) -> ServiceAddress {
		ServiceAddress {
			host: self.cluster.clone(),
			port: self.port,
			service_name: self.service_name.clone(),
			service_version: self.service_version.clone(),
			instance_id: self.instance_id.clone(),
		}
	}
}
impl Debug for AppOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppOptions")
			.field("cluster", &self.cluster)
			.field("port", &self.port)
			.field("app_id", &self.app_id)
			.field("app_key", &"<redacted>")
			.field("service_name", &self.service_name)
			.field("service_version", &self.service_version)
			.field("instance_id", &self.instance_id)
			.field("sdk_info", &self.sdk_info)
			.finish()
	}
}

/// Builder for [`AppOptions`] values.
#[derive(Clone, Default)]
pub struct AppOptionsBuilder {
	cluster: Option<String>,
	port: Option<u16>,
	app_id: Option<String>,
	app_key: Option<String>,
	service_name: Option<String>,
	service_version: Option<String>,
	instance_id: Option<String>,
	sdk_info: Option<SdkInfo>,
}
impl AppOptionsBuilder {
	/// Sets the cluster host.
	pub fn cluster(mut self, cluster: impl Into<String>) -> Self {
		self.cluster = Some(cluster.into());

		self
	}

	/// Alias for [`Self::cluster`].
	pub fn host(self, host: impl Into<String>) -> Self {
		self.cluster(host)
	}

	/// Sets an explicit port.
	pub fn port(mut self, port: u16) -> Self {
		self.port = Some(port);

		self
	}

	/// Sets the tenant identifier.
	pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
		self.app_id = Some(app_id.into());

		self
	}

	/// Sets the `id:secret` credential.
	pub fn app_key(mut self, app_key: impl Into<String>) -> Self {
		self.app_key = Some(app_key.into());

		self
	}

	/// Sets the service name.
	pub fn service_name(mut self, name: impl Into<String>) -> Self {
		self.service_name = Some(name.into());

		self
	}

	/// Sets the service version.
	pub fn service_version(mut self, version: impl Into<String>) -> Self {
		self.service_version = Some(version.into());

		self
	}

	/// Sets the service instance identifier.
	pub fn instance_id(mut self, instance_id: impl Into<String>) -> Self {
		self.instance_id = Some(instance_id.into());

		self
	}

	/// Overrides the SDK identity headers.
	pub fn sdk_info(mut self, sdk_info: SdkInfo) -> Self {
		self.sdk_info = Some(sdk_info);

		self
	}

	/// Consumes the builder and validates required fields.
	pub fn build(self) -> Result<AppOptions, ConfigError> {
		let app_id = AppId::new(required("app_id", self.app_id)?)?;

		Ok(AppOptions {
			cluster: required("cluster", self.cluster)?,
			port: self.port,
			app_id,
			app_key: required("app_key", self.app_key)?,
			service_name: required("service_name", self.service_name)?,
			service_version: required("service_version", self.service_version)?,
			instance_id: required("instance_id", self.instance_id)?,
			sdk_info: self.sdk_info.unwrap_or_default(),
		})
	}
}
impl Debug for AppOptionsBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppOptionsBuilder")
			.field("cluster", &self.cluster)
			.field("app_id", &self.app_id)
			.field("app_key_set", &self.app_key.is_some())
			.finish_non_exhaustive()
	}
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ConfigError> {
	value.filter(|v| !v.is_empty()).ok_or(ConfigError::MissingField { field })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn complete() -> AppOptionsBuilder {
		AppOptions::builder()
			.host("cluster.test")
			.app_id("A1")
			.app_key("key:secret")
			.service_name("chatkit")
			.service_version("v1")
			.instance_id("i-1")
	}

	#[test]
	fn build_fills_defaults_and_derives_address() {
		let options = complete().build().expect("Complete options should build.");
		let address = options.service_address();

		assert_eq!(options.port, None);
		assert_eq!(options.sdk_info, SdkInfo::default());
		assert_eq!(address.host, "cluster.test");
		assert_eq!(address.prefix(), "services/chatkit/v1/i-1");
	}

	#[test]
	fn missing_fields_are_named() {
		let err = AppOptions::builder()
			.cluster("cluster.test")
			.app_id("A1")
			.service_name("chatkit")
			.build()
			.expect_err("Incomplete options must be rejected.");

		assert!(matches!(err, ConfigError::MissingField { field: "app_key" }));
		assert!(matches!(
			complete().instance_id("").build(),
			Err(ConfigError::MissingField { field: "instance_id" })
		));
	}

	#[test]
	fn app_id_must_be_a_valid_identifier() {
		for app_id in ["has space", "..", "A1/../B2", "%2E%2E"] {
			assert!(
				matches!(complete().app_id(app_id).build(), Err(ConfigError::InvalidIdentifier(_))),
				"`{app_id}` must be rejected."
			);
		}
	}

	#[test]
	fn debug_redacts_app_key() {
		let options = complete().app_key("key:hunter2").build().expect("Options should build.");

		assert!(!format!("{options:?}").contains("hunter2"));
		assert!(!format!("{:?}", complete().app_key("key:hunter2")).contains("hunter2"));
	}
}
