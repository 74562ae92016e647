//! Normalizer and tokenizer.

/// Canonicalize text for vocabulary lookup.
///
/// Lowercases, replaces every character outside `[a-z0-9']` and whitespace
/// with a space, collapses whitespace runs to a single space, then trims.
/// Punctuation turns into a separator rather than vanishing, so `"good.bad"`
/// yields two tokens. Never fails and is idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for c in lowered.chars() {
        let keep = c.is_ascii_lowercase() || c.is_ascii_digit() || c == '\'';
        if keep {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            // Whitespace and every rejected character both act as separators.
            pending_space = true;
        }
    }
    out
}

/// Split a normalized string into tokens, in order.
///
/// Splits on single spaces and drops empty pieces, so it is safe to call on
/// strings that were not produced by [`normalize`].
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|token| !token.is_empty())
}
