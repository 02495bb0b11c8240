//! Slug generation for post URLs

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("slug filter is a valid regex"));

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("slug separator is a valid regex"));

pub const MAX_SLUG_LENGTH: usize = 255;

/// Convert a title into a URL slug
///
/// Accented letters are decomposed (NFKD) to their ASCII base, anything else
/// outside ASCII and punctuation is dropped, runs of whitespace and hyphens
/// become one hyphen, and leading/trailing hyphens and underscores are
/// stripped. The result never exceeds `MAX_SLUG_LENGTH` characters.
pub fn slugify(value: &str) -> String {
    let ascii: String = value.nfkd().filter(char::is_ascii).collect();
    let lowered = ascii.to_lowercase();
    let filtered = DISALLOWED.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(filtered.trim(), "-");

    // Truncate before trimming so a cut never leaves a dangling separator
    let truncated: String = joined.chars().take(MAX_SLUG_LENGTH).collect();

    truncated.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Rust in 2024"), "rust-in-2024");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  many   spaces -- and - dashes "), "many-spaces-and-dashes");
    }

    #[test]
    fn test_slugify_strips_edges() {
        assert_eq!(slugify("_-leading and trailing-_"), "leading-and-trailing");
        assert_eq!(slugify("keep_under_scores"), "keep_under_scores");
    }

    #[test]
    fn test_slugify_decomposes_accents() {
        assert_eq!(slugify("Café déjà vu"), "cafe-deja-vu");
        assert_eq!(slugify("Ｆｕｌｌｗｉｄｔｈ ﬁle"), "fullwidth-file");
    }

    #[test]
    fn test_slugify_drops_undecomposable_characters() {
        assert_eq!(slugify("日本語 blog ✓"), "blog");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_truncates() {
        let title = "a".repeat(300);
        assert_eq!(slugify(&title).len(), MAX_SLUG_LENGTH);
    }

    #[test]
    fn test_slugify_truncation_never_ends_with_separator() {
        // The separator lands exactly at the cut
        let title = format!("{} bcd", "a".repeat(MAX_SLUG_LENGTH - 1));

        let slug = slugify(&title);

        assert_eq!(slug, "a".repeat(MAX_SLUG_LENGTH - 1));
        assert!(!slug.ends_with('-'));
    }
}
