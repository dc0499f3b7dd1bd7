//! Identifiers for apps, app keys, and end users.
//!
//! Each kind enforces only what the platform relies on:
//! - [`AppId`] is interpolated into request paths, so it must be one clean path segment.
//! - [`AppKeyId`] is the part of `"id:secret"` before the first colon.
//! - [`UserId`] is opaque to the SDK and only has to be present.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $check:path) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Identifier kind reported in validation errors.
			pub const KIND: &'static str = $kind;

			/// Validates and wraps `value`.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				$check($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({:?})", $kind, self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

/// Reasons an identifier is refused.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// Identifier was empty.
	#[error("{kind} id cannot be empty.")]
	Empty {
		/// Identifier kind.
		kind: &'static str,
	},
	/// Identifier contains a character its kind forbids.
	#[error("{kind} id `{value}` must not contain {found:?}.")]
	ForbiddenCharacter {
		/// Identifier kind.
		kind: &'static str,
		/// Rejected input.
		value: String,
		/// First offending character.
		found: char,
	},
	/// Identifier would be read as a relative path step.
	#[error("{kind} id `{value}` cannot be a dot segment.")]
	DotSegment {
		/// Identifier kind.
		kind: &'static str,
		/// Rejected input.
		value: String,
	},
}

def_id! { AppId, "Registered app (tenant); scopes every request under `apps/{id}`.", "App", check_app_id }
def_id! { AppKeyId, "Key id half of an app key; becomes the `iss` claim.", "AppKey", check_key_id }
def_id! { UserId, "End user of an app; becomes the `sub` claim.", "User", check_user_id }

fn check_app_id(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	check_user_id(kind, value)?;

	if let Some(found) = value.chars().find(|c| matches!(c, '/' | '\\') || c.is_whitespace() || c.is_control()) {
		return Err(IdentifierError::ForbiddenCharacter { kind, value: value.into(), found });
	}
	if crate::path::is_dot_segment(value) {
		return Err(IdentifierError::DotSegment { kind, value: value.into() });
	}

	Ok(())
}

fn check_key_id(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	check_user_id(kind, value)?;

	if value.contains(':') {
		return Err(IdentifierError::ForbiddenCharacter { kind, value: value.into(), found: ':' });
	}

	Ok(())
}

fn check_user_id(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() { Err(IdentifierError::Empty { kind }) } else { Ok(()) }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn app_ids_must_be_a_single_clean_segment() {
		AppId::new("A1").expect("Plain app ids should be accepted.");

		for (raw, found) in [("A1/B2", '/'), ("A1\\B2", '\\'), ("A 1", ' '), ("A1\n", '\n')] {
			assert!(
				matches!(
					AppId::new(raw),
					Err(IdentifierError::ForbiddenCharacter { found: got, .. }) if got == found
				),
				"`{raw}` must be rejected."
			);
		}
		for raw in ["..", ".", "%2e%2E"] {
			assert!(
				matches!(AppId::new(raw), Err(IdentifierError::DotSegment { .. })),
				"`{raw}` must be rejected."
			);
		}

		assert_eq!(AppId::new(""), Err(IdentifierError::Empty { kind: "App" }));
	}

	#[test]
	fn key_ids_only_forbid_colons() {
		let spaced = AppKeyId::new("key 1").expect("Spaces are allowed in key ids.");
		let long = AppKeyId::new("k".repeat(512)).expect("Key ids have no length limit.");

		assert_eq!(spaced.as_ref(), "key 1");
		assert_eq!(long.len(), 512);
		assert!(matches!(
			AppKeyId::new("a:b"),
			Err(IdentifierError::ForbiddenCharacter { found: ':', .. })
		));
	}

	#[test]
	fn user_ids_are_opaque() {
		UserId::new("alice@example.com/team a").expect("User ids are opaque.");

		assert_eq!(UserId::new(""), Err(IdentifierError::Empty { kind: "User" }));
	}

	#[test]
	fn deserialization_applies_the_same_rules() {
		let app: AppId = serde_json::from_str("\"app-42\"").expect("App id should deserialize.");

		assert_eq!(serde_json::to_string(&app).expect("App id should serialize."), "\"app-42\"");
		assert!(serde_json::from_str::<AppId>("\"../other\"").is_err());
		assert_eq!(format!("{app:?}"), "App(\"app-42\")");
		assert_eq!(app.to_string(), "app-42");
	}
}
