//! Placeholder tokens marking where the chosen name goes.

/// Recognized tokens, in priority order.
pub const PLACEHOLDERS: [&str; 2] = ["KV", "KM"];

/// First token from [`PLACEHOLDERS`] that occurs anywhere in `text`.
pub fn detect_placeholder(text: &str) -> Option<&'static str> {
    PLACEHOLDERS.into_iter().find(|token| text.contains(token))
}

/// Replace every occurrence of `placeholder` with `name`. Literal, not a pattern.
pub fn replace_placeholder(text: &str, placeholder: &str, name: &str) -> String {
    text.replace(placeholder, name)
}
