//! App key parsing (`"id:secret"`).

// self
use crate::{
	_prelude::*,
	auth::{AppKeyId, KeySecret},
};

/// App credential split into its issuer id and signing secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AppKey {
	/// Key identifier; becomes the `iss` claim of every token.
	pub id: AppKeyId,
	/// Signing secret; never logged.
	pub secret: KeySecret,
}
impl AppKey {
	/// Parses `"id:secret"`, splitting on the first colon.
	///
	/// Both halves must be non-empty. The id is otherwise free-form and the secret may contain
	/// further colons.
	pub fn parse(value: &str) -> Result<Self> {
		let (id, secret) = value.split_once(':').ok_or(Error::InvalidAppKey)?;

		if id.is_empty() || secret.is_empty() {
			return Err(Error::InvalidAppKey);
		}

		let id = AppKeyId::new(id).map_err(|_| Error::InvalidAppKey)?;

		Ok(Self { id, secret: KeySecret::new(secret) })
	}
}
impl FromStr for AppKey {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}
impl Debug for AppKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppKey").field("id", &self.id).field("secret", &"<redacted>").finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parse_recovers_id_and_secret() {
		let key = AppKey::parse("key-1:s3cret").expect("Well-formed key should parse.");

		assert_eq!(key.id.as_ref(), "key-1");
		assert_eq!(key.secret.expose(), "s3cret");
	}

	#[test]
	fn parse_splits_on_first_colon_only() {
		let key: AppKey = "key-1:abc:def:".parse().expect("Secrets may contain colons.");

		assert_eq!(key.id.as_ref(), "key-1");
		assert_eq!(key.secret.expose(), "abc:def:");
	}

	#[test]
	fn parse_accepts_free_form_ids() {
		let spaced = AppKey::parse("key 1:secret").expect("Ids may contain spaces.");
		let long = AppKey::parse(&format!("{}:secret", "k".repeat(256)))
			.expect("Ids have no length limit.");

		assert_eq!(spaced.id.as_ref(), "key 1");
		assert_eq!(long.id.len(), 256);
	}

	#[test]
	fn parse_rejects_malformed_keys() {
		for raw in ["", "no-colon", ":secret", "key-1:", ":"] {
			assert!(
				matches!(AppKey::parse(raw), Err(Error::InvalidAppKey)),
				"`{raw}` must be rejected."
			);
		}
	}

	#[test]
	fn debug_redacts_secret() {
		let key = AppKey::parse("key-1:s3cret").expect("Well-formed key should parse.");
		let rendered = format!("{key:?}");

		assert!(rendered.contains("key-1"));
		assert!(!rendered.contains("s3cret"));
	}
}
