//! Text helpers shared by the classifiers.
//!
//! All window helpers count characters, not bytes, so slicing multi-byte
//! input can never split a code point.

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `n` characters of `text`.
pub fn prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Last `n` characters of `text`.
pub fn suffix(text: &str, n: usize) -> &str {
    let total = text.chars().count();
    if total <= n {
        return text;
    }
    match text.char_indices().nth(total - n) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Up to `n` characters immediately before byte offset `pos`.
///
/// `pos` must lie on a char boundary (offsets from `str::find` always do).
pub fn window_before(text: &str, pos: usize, n: usize) -> &str {
    suffix(&text[..pos], n)
}

/// Up to `n` characters immediately after byte offset `pos`.
pub fn window_after(text: &str, pos: usize, n: usize) -> &str {
    prefix(&text[pos..], n)
}
