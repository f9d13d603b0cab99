use std::hash::BuildHasher;
use std::hash::RandomState;

/// Marker appended by the trimming helpers when text was shortened.
pub const DEFAULT_TRIM_END: &str = "[...]";

/// Alphabet of [`generate_random_string`].
pub const RANDOM_STRING_CHARACTERS: &str =
	"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length used when a caller has no preference, e.g. for generated element
/// ids.
pub const DEFAULT_RANDOM_STRING_LENGTH: usize = 8;

/// Remove everything between `<` and `>` (tags and comments), keeping the
/// text content.
pub fn strip_tags(text: &str) -> String {
	let mut stripped = String::with_capacity(text.len());
	let mut in_tag = false;

	for ch in text.chars() {
		match ch {
			'<' => in_tag = true,
			'>' if in_tag => in_tag = false,
			_ if in_tag => {}
			other => stripped.push(other),
		}
	}

	stripped
}

/// Strip tags, trim, and keep at most `max_length` characters, appending
/// `end` when the text was cut.
pub fn trim_by_characters_count(text: &str, max_length: usize, end: &str) -> String {
	let stripped = strip_tags(text);
	let stripped = stripped.trim();
	let mut output: String = stripped.chars().take(max_length).collect();

	if stripped.chars().count() > max_length {
		output.push_str(end);
	}

	output
}

/// Strip tags, trim, and keep at most `max_words` space-separated words,
/// appending `end` as an extra word when the text was cut.
pub fn trim_by_words_count(text: &str, max_words: usize, end: &str) -> String {
	let stripped = strip_tags(text);
	let mut words: Vec<&str> = stripped.trim().split(' ').collect();

	if words.len() > max_words {
		words.truncate(max_words);
		words.push(end);
	}

	words.join(" ")
}

/// A string of `length` characters drawn from [`RANDOM_STRING_CHARACTERS`].
///
/// Suitable for unique ids in markup. Not suitable for secrets.
pub fn generate_random_string(length: usize) -> String {
	let alphabet = RANDOM_STRING_CHARACTERS.as_bytes();
	let state = RandomState::new();

	(0..length)
		.map(|index| {
			let pick = state.hash_one(index) % alphabet.len() as u64;
			char::from(alphabet[pick as usize])
		})
		.collect()
}
