use std::sync::LazyLock;

use regex::Regex;

static MARKUP: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Markup pattern must compile."));

/// Emphasis markers the index wraps around matched terms in highlight fragments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emphasis {
	pre: String,
	post: String,
}
impl Emphasis {
	pub fn new(pre: impl Into<String>, post: impl Into<String>) -> Self {
		Self { pre: pre.into(), post: post.into() }
	}

	pub fn pre(&self) -> &str {
		&self.pre
	}

	pub fn post(&self) -> &str {
		&self.post
	}

	/// Removes every emphasis marker.
	///
	/// Runs to a fixpoint so that a marker spliced together by a removal (`<<em>em>`) is
	/// removed too. Each round shrinks the string, so this terminates.
	pub fn strip(&self, fragment: &str) -> String {
		let mut current = fragment.to_string();

		loop {
			let next = self.strip_once(&current);

			if next == current {
				return current;
			}

			current = next;
		}
	}

	pub fn contains_marker(&self, text: &str) -> bool {
		(!self.pre.is_empty() && text.contains(&self.pre))
			|| (!self.post.is_empty() && text.contains(&self.post))
	}

	fn strip_once(&self, text: &str) -> String {
		let mut out = text.to_string();

		for marker in [&self.pre, &self.post] {
			if !marker.is_empty() {
				out = out.replace(marker.as_str(), "");
			}
		}

		out
	}
}
impl Default for Emphasis {
	fn default() -> Self {
		Self::new("<em>", "</em>")
	}
}

/// Removes every `<...>` span.
///
/// After one pass no `<` is followed by a `>`, so the result is already a fixpoint.
pub fn strip_markup(text: &str) -> String {
	MARKUP.replace_all(text, "").into_owned()
}

/// Flattens a cell into a plain comma-separated list for tabular export.
///
/// Strips markup, splits on commas, trims, and drops empty pieces. Idempotent.
pub fn flatten_for_export(text: &str) -> String {
	strip_markup(text)
		.split(',')
		.map(str::trim)
		.filter(|piece| !piece.is_empty())
		.collect::<Vec<_>>()
		.join(", ")
}
