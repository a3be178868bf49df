//! Top-level splitting
//!
//! Splits argument lists on a separator while ignoring separators nested
//! inside parentheses, e.g. the commas of `rgb(0, 0, 0)`.

/// Split `input` on `separator` at parenthesis depth zero.
///
/// Pieces are trimmed and a trailing empty piece is dropped. Unbalanced
/// closing parentheses clamp the depth at zero instead of failing.
pub fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if ch == separator && depth == 0 => {
                parts.push(input[start..index].trim());
                start = index + ch.len_utf8();
            }
            _ => {}
        }
    }

    let tail = input[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}

/// Byte index of the `)` matching the `(` at `open`, if any
pub fn matching_paren(input: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, ch) in input[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + index);
                }
            }
            _ => {}
        }
    }
    None
}
