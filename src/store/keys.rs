//! Key layout of the store.
//!
//! Every key is scoped by restaurant slug:
//!
//! - `restaurant:{slug}` restaurant profile
//! - `restaurant:{slug}:menu` ordered menu item list
//! - `restaurant:{slug}:orders` active orders, most recent first
//! - `restaurant:{slug}:order:{id}` full order record (7 day TTL)
//! - `restaurant:{slug}:stats:{date}` daily stats bucket (90 day TTL)
//! - `admin:{slug}:hash` admin credential

pub fn restaurant(slug: &str) -> String {
    format!("restaurant:{slug}")
}

pub fn menu(slug: &str) -> String {
    format!("restaurant:{slug}:menu")
}

pub fn active_orders(slug: &str) -> String {
    format!("restaurant:{slug}:orders")
}

pub fn order(slug: &str, order_id: &str) -> String {
    format!("restaurant:{slug}:order:{order_id}")
}

/// `date` is a calendar day formatted `YYYY-MM-DD`.
pub fn stats(slug: &str, date: &str) -> String {
    format!("restaurant:{slug}:stats:{date}")
}

pub fn admin_credential(slug: &str) -> String {
    format!("admin:{slug}:hash")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_scoped_by_slug() {
        assert_eq!(restaurant("cafe-x"), "restaurant:cafe-x");
        assert_eq!(menu("cafe-x"), "restaurant:cafe-x:menu");
        assert_eq!(active_orders("cafe-x"), "restaurant:cafe-x:orders");
        assert_eq!(order("cafe-x", "abc"), "restaurant:cafe-x:order:abc");
        assert_eq!(
            stats("cafe-x", "2026-10-17"),
            "restaurant:cafe-x:stats:2026-10-17"
        );
        assert_eq!(admin_credential("cafe-x"), "admin:cafe-x:hash");
    }
}
