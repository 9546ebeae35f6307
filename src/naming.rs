//! Key normalization for document identifiers.
//!
//! The snapshot exposes `id` and `title` as normalized keys so templates can
//! drop them straight into `id="…"` attributes or anchor targets:
//!
//! - `"Hello World"` → `"hello-world"`
//! - `"example.com:8080"` → `"example-com-8080"`
//! - `"  --Top--  "` → `"top"`
//! - `"Ünïcode Title"` → `"ünïcode-title"`
//!
//! Letters and digits are kept (lowercased), everything else becomes the
//! separator, runs of separators collapse into one, and separators at either
//! end are stripped.

/// Separator used by [`normalize_key`].
pub const KEY_SEPARATOR: char = '-';

/// Normalize `value` into a lowercase, dash-separated key.
pub fn normalize_key(value: &str) -> String {
    normalize_key_with(value, KEY_SEPARATOR)
}

/// Normalize `value` into a lowercase key joined by `separator`.
pub fn normalize_key_with(value: &str, separator: char) -> String {
    let mut key = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars() {
        if c.is_alphanumeric() || c == '_' {
            // Only emit a separator between two kept runs
            if pending_separator && !key.is_empty() {
                key.push(separator);
            }
            pending_separator = false;
            key.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    key
}

/// Tag name for a dotted meta key: the part after the last dot.
///
/// - `"document.title"` → `"title"`
/// - `"theme.color"` → `"color"`
/// - `"robots"` → `"robots"`
pub fn meta_name(key: &str) -> &str {
    match key.rfind('.') {
        Some(pos) => &key[pos + 1..],
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_dashes() {
        assert_eq!(normalize_key("Hello World"), "hello-world");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalize_key("top"), "top");
        assert_eq!(normalize_key("about-us"), "about-us");
    }

    #[test]
    fn punctuation_runs_collapse() {
        assert_eq!(normalize_key("a -- b ,, c"), "a-b-c");
    }

    #[test]
    fn leading_and_trailing_separators_stripped() {
        assert_eq!(normalize_key("  --Top--  "), "top");
        assert_eq!(normalize_key("/about/"), "about");
    }

    #[test]
    fn host_with_port() {
        assert_eq!(normalize_key("example.com:8080"), "example-com-8080");
    }

    #[test]
    fn underscores_are_kept() {
        assert_eq!(normalize_key("snake_case Name"), "snake_case-name");
    }

    #[test]
    fn unicode_letters_are_lowercased_not_dropped() {
        assert_eq!(normalize_key("Ünïcode Title"), "ünïcode-title");
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key("!!!"), "");
    }

    #[test]
    fn custom_separator() {
        assert_eq!(normalize_key_with("Hello World", '_'), "hello_world");
    }

    #[test]
    fn meta_name_takes_last_segment() {
        assert_eq!(meta_name("document.title"), "title");
        assert_eq!(meta_name("og.image.alt"), "alt");
        assert_eq!(meta_name("robots"), "robots");
        assert_eq!(meta_name("trailing."), "");
    }
}
