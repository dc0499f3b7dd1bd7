//! SDK identity headers merged (at lowest precedence) into every request.

// self
use crate::_prelude::*;

/// Product, version, language, and platform advertised to Elements services.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkInfo {
	/// SDK product name.
	pub product_name: String,
	/// SDK version.
	pub version: String,
	/// Implementation language.
	pub language: String,
	/// Host platform.
	pub platform: String,
}
impl SdkInfo {
	/// Header carrying [`SdkInfo::product_name`].
	pub const PRODUCT_HEADER: &'static str = "X-SDK-Product";
	/// Header carrying [`SdkInfo::version`].
	pub const VERSION_HEADER: &'static str = "X-SDK-Version";
	/// Header carrying [`SdkInfo::language`].
	pub const LANGUAGE_HEADER: &'static str = "X-SDK-Language";
	/// Header carrying [`SdkInfo::platform`].
	pub const PLATFORM_HEADER: &'static str = "X-SDK-Platform";

	/// Describes a product built on top of this SDK.
	pub fn new(product_name: impl Into<String>, version: impl Into<String>) -> Self {
		Self { product_name: product_name.into(), version: version.into(), ..Self::default() }
	}

	/// Returns the fixed header map identifying the SDK.
	pub fn headers(&self) -> BTreeMap<String, String> {
		BTreeMap::from_iter([
			(Self::PRODUCT_HEADER.into(), self.product_name.clone()),
			(Self::VERSION_HEADER.into(), self.version.clone()),
			(Self::LANGUAGE_HEADER.into(), self.language.clone()),
			(Self::PLATFORM_HEADER.into(), self.platform.clone()),
		])
	}
}
impl Default for SdkInfo {
	fn default() -> Self {
		Self {
			product_name: env!("CARGO_PKG_NAME").into(),
			version: env!("CARGO_PKG_VERSION").into(),
			language: "rust".into(),
			platform: std::env::consts::OS.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn headers_cover_every_field() {
		let info = SdkInfo::new("chatkit", "1.2.3");
		let headers = info.headers();

		assert_eq!(headers.len(), 4);
		assert_eq!(headers.get("X-SDK-Product").map(String::as_str), Some("chatkit"));
		assert_eq!(headers.get("X-SDK-Version").map(String::as_str), Some("1.2.3"));
		assert_eq!(headers.get("X-SDK-Language").map(String::as_str), Some("rust"));
		assert_eq!(headers.get("X-SDK-Platform").map(String::as_str), Some(std::env::consts::OS));
	}

	#[test]
	fn default_describes_this_crate() {
		let info = SdkInfo::default();

		assert_eq!(info.product_name, "elements-sdk");
		assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
	}
}
