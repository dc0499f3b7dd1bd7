//! Request path scoping and sanitization.
//!
//! Paths are normalized with plain string passes rather than pattern matching:
//! one trailing space is dropped, one leading space after every slash is dropped,
//! empty segments disappear, and the remainder is rejoined with single slashes.
//! The result therefore never starts or ends with `/` and never contains `//`.
//!
//! Sanitizing never resolves `.` or `..`; callers that turn a path into a URL must refuse
//! them with [`find_dot_segment`] so a scoped path cannot climb out of its prefix.

/// Normalizes a slash-delimited path.
pub fn sanitize(path: &str) -> String {
	let trimmed = path.strip_suffix(' ').unwrap_or(path);
	let mut out = String::with_capacity(trimmed.len());

	for (idx, segment) in trimmed.split('/').enumerate() {
		let segment = if idx == 0 { segment } else { segment.strip_prefix(' ').unwrap_or(segment) };

		if segment.is_empty() {
			continue;
		}
		if !out.is_empty() {
			out.push('/');
		}

		out.push_str(segment);
	}

	out
}

/// Scopes `path` under `{prefix}/{tenant_id}`.
///
/// Never fails; an empty result is possible only when every input is empty.
pub fn scope(prefix: &str, tenant_id: &str, path: &str) -> String {
	sanitize(&format!("{prefix}/{tenant_id}/{path}"))
}

/// Returns `true` for `.` and `..`, including the percent-encoded spellings URL parsing
/// also resolves. ASCII tabs and newlines are ignored, as URL parsing drops them.
pub fn is_dot_segment(segment: &str) -> bool {
	let normalized = segment
		.chars()
		.filter(|c| !matches!(c, '\t' | '\n' | '\r'))
		.collect::<String>()
		.to_ascii_lowercase();

	matches!(normalized.as_str(), "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e")
}

/// First dot segment in `path`. Backslashes separate segments too, matching how `https`
/// URLs are parsed.
pub fn find_dot_segment(path: &str) -> Option<&str> {
	path.split(['/', '\\']).find(|segment| is_dot_segment(segment))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn scope_collapses_and_trims_slashes() {
		assert_eq!(scope("apps", "A1", "users//42/"), "apps/A1/users/42");
		assert_eq!(scope("apps", "A1", "/users/42"), "apps/A1/users/42");
		assert_eq!(scope("/apps/", "/A1/", "///"), "apps/A1");
		assert_eq!(scope("", "", ""), "");
	}

	#[test]
	fn sanitize_strips_spaces_after_slashes_and_at_the_end() {
		assert_eq!(sanitize("services/ chat/v1/ rooms "), "services/chat/v1/rooms");
		assert_eq!(sanitize("a/ /b"), "a/b");
		assert_eq!(sanitize("a/ "), "a");
		assert_eq!(sanitize("a b/c"), "a b/c", "Interior spaces are preserved.");
	}

	#[test]
	fn sanitized_paths_never_contain_redundant_slashes() {
		let inputs = [
			("apps", "A1", "users/42"),
			("apps//", "A1", "//users///42//"),
			("services/svc/v1/", "i-1/", "/apps/A1/"),
			("/", "/", "/"),
			("x", "y", "z/ /w/ "),
		];

		for (prefix, tenant, path) in inputs {
			let scoped = scope(prefix, tenant, path);

			assert!(!scoped.contains("//"), "`{scoped}` contains a double slash.");
			assert!(!scoped.ends_with('/'), "`{scoped}` ends with a slash.");
			assert!(!scoped.starts_with('/'), "`{scoped}` starts with a slash.");
		}
	}

	#[test]
	fn dot_segments_are_detected_in_every_spelling() {
		for segment in [".", "..", "%2E", "%2e%2E", ".%2e", "%2E.", ".\t.", "\n.."] {
			assert!(is_dot_segment(segment), "`{segment:?}` is a dot segment.");
		}
		for segment in ["...", ".hidden", "a..b", "%2e%2e%2e", ""] {
			assert!(!is_dot_segment(segment), "`{segment:?}` is not a dot segment.");
		}

		assert_eq!(find_dot_segment(&scope("apps", "A1", "../B2/users")), Some(".."));
		assert_eq!(find_dot_segment("apps/A1/users\\..\\B2"), Some(".."));
		assert_eq!(find_dot_segment(&scope("apps", "A1", "users/..42/v1.2")), None);
	}
}
