//! Comment text cleanup applied before sequence encoding.
//!
//! The pretrained model was trained on lowercased text with URLs, mentions,
//! and symbols stripped, and was never trained on emoji-bearing text. The two
//! functions here enforce both conventions: [`normalize`] reproduces the
//! training-time cleanup exactly, and [`contains_emoji`] is the gate that
//! keeps emoji-bearing comments away from the model entirely.

use once_cell::sync::Lazy;
use regex::Regex;

static URLS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("hardcoded regex is valid"));
static MENTIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("hardcoded regex is valid"));
static SYMBOLS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("hardcoded regex is valid"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("hardcoded regex is valid"));

/// Cleans raw comment text into the canonical lowercase token stream the
/// model was trained on.
///
/// Applied in order: lowercase, strip URL tokens, strip `@mentions`, strip
/// everything that is neither a word character nor whitespace, collapse
/// whitespace runs, trim. Each removal is replaced by a single space so
/// neighboring tokens never fuse. Never fails; the result may be empty.
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = URLS.replace_all(&text, " ");
    let text = MENTIONS.replace_all(&text, " ");
    let text = SYMBOLS.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Returns true if the text contains at least one emoji code point.
///
/// Emoji-bearing comments must bypass normalization, encoding, and
/// classification: the model has never seen emoji input, so the pipeline
/// assigns them a fixed neutral, zero-confidence result instead of risking a
/// misleading high-confidence score.
pub fn contains_emoji(text: &str) -> bool {
    let mut buf = [0u8; 4];
    text.chars()
        .any(|c| emojis::get(c.encode_utf8(&mut buf)).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_input() {
        assert_eq!(normalize("GREAT Video"), "great video");
    }

    #[test]
    fn removes_urls() {
        assert_eq!(normalize("check http://a.b/c now"), "check now");
        assert_eq!(normalize("see www.example.com please"), "see please");
        assert_eq!(normalize("visit http://spam.com now!!"), "visit now");
    }

    #[test]
    fn removes_mentions() {
        assert_eq!(normalize("thanks @someuser for this"), "thanks for this");
    }

    #[test]
    fn strips_symbols() {
        assert_eq!(normalize("wow!!! so... good???"), "wow so good");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn empty_and_symbol_only_input_yield_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! ???"), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "Check HTTP://A.B/c now",
            "thanks @user!!",
            "  plain   text  ",
            "#httpx trailing",
            "",
            "mixed: www.x.y @a b.c",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn detects_emoji() {
        assert!(contains_emoji("I love this 😍"));
        assert!(contains_emoji("fire 🔥 take"));
    }

    #[test]
    fn plain_text_has_no_emoji() {
        assert!(!contains_emoji("just words, punctuation!! and @mentions"));
        assert!(!contains_emoji(""));
        assert!(!contains_emoji("digits 123 and symbols #*"));
    }
}
