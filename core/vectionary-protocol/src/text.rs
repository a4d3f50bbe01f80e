use alloc::string::String;

/// Sentence punctuation trimmed from word edges before lexicon lookup.
pub const SENTENCE_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Trims sentence punctuation from both ends, keeping inner characters
/// (so `"don't."` becomes `"don't"` and `"U.S.,"` becomes `"U.S"`).
pub fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| SENTENCE_PUNCTUATION.contains(&c))
}

/// Normalized lookup form: punctuation-stripped and lowercased.
pub fn lemma_of(word: &str) -> String {
    strip_punctuation(word).to_lowercase()
}

/// Whether the raw word opens with an uppercase letter.
pub fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
