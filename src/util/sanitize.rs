use crate::error::{Error, Result};

pub const MAX_SLUG_LEN: usize = 40;
pub const MIN_SLUG_LEN: usize = 2;
const MAX_TEXT_LEN: usize = 1000;
const MAX_PHONE_LEN: usize = 20;

fn is_valid_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

/// Lowercases `raw`, drops every character outside `[a-z0-9-]` and caps the
/// result at 40 characters.
#[must_use]
pub fn normalize_slug(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|&c| is_valid_slug_char(c))
        .take(MAX_SLUG_LEN)
        .collect()
}

/// Checks an already normalized slug.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.len() < MIN_SLUG_LEN {
        return Err(Error::invalid(format!(
            "Slug must be at least {MIN_SLUG_LEN} characters (letters, numbers, hyphens only)"
        )));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(Error::invalid(format!(
            "Slug cannot exceed {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug.chars().all(is_valid_slug_char) {
        return Err(Error::invalid(
            "Slug can only contain lowercase letters, numbers, and hyphens",
        ));
    }
    Ok(())
}

/// Escapes HTML special characters, trims and caps free text at 1000 characters.
#[must_use]
pub fn sanitize_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped.trim().chars().take(MAX_TEXT_LEN).collect()
}

/// Keeps digits, `+`, `-`, parentheses and spaces; caps at 20 characters.
#[must_use]
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
        .take(MAX_PHONE_LEN)
        .collect()
}
