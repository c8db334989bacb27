mod id;
mod sanitize;

pub use id::{now, today, uid};
pub use sanitize::{
    MAX_SLUG_LEN, MIN_SLUG_LEN, normalize_slug, sanitize_phone, sanitize_text, validate_slug,
};

/// Rounds a money amount to whole cents.
#[must_use]
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
