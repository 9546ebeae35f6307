//! Crawler directives for `<meta name="robots">` and per-bot variants.
//!
//! Rules arrive as comma-separated strings (`"noindex, nofollow"`) and are
//! stored as ordered tokens. When rules come from configuration they may not
//! be strings at all; those are logged and dropped rather than failing the
//! request.

use tracing::warn;

/// Bot key for the generic `<meta name="robots">` tag.
pub const GENERIC_BOT: &str = "robots";

/// Rule forced onto documents that aren't public.
pub const PRIVATE_RULES: [&str; 2] = ["noindex", "nofollow"];

/// Split rule strings on commas into trimmed, non-empty tokens.
///
/// ```text
/// ["noindex, nofollow", "noarchive"] → ["noindex", "nofollow", "noarchive"]
/// ```
pub fn parse_rules<'a, I>(rules: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    rules
        .into_iter()
        .flat_map(|rule| rule.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Like [`parse_rules`], for untyped config values.
///
/// Non-string values are reported through `tracing` and skipped.
pub fn parse_rule_values(bot: &str, values: &[toml::Value]) -> Vec<String> {
    let strings = values.iter().filter_map(|value| match value {
        toml::Value::String(s) => Some(s.as_str()),
        other => {
            warn!(
                bot,
                kind = other.type_str(),
                "invalid robots rule for {bot}: a string is required, but {} was provided",
                other.type_str()
            );
            None
        }
    });
    parse_rules(strings)
}

/// Content of a robots meta tag / `X-Robots-Tag` header.
pub fn join_rules(tokens: &[String]) -> String {
    tokens.join(", ")
}
