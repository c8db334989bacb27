use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// OrderStatus is the lifecycle state of an order.
///
/// ```text
/// new ──> accepted ──> ready ──> delivered
///  │          │
///  └──────────┴──> rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Accepted,
    Ready,
    Delivered,
    Rejected,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::New,
        OrderStatus::Accepted,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Rejected,
    ];

    /// Legal successors of this status. Empty for terminal states.
    #[must_use]
    pub const fn successors(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::New => &[OrderStatus::Accepted, OrderStatus::Rejected],
            OrderStatus::Accepted => &[OrderStatus::Ready, OrderStatus::Rejected],
            OrderStatus::Ready => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Rejected => &[],
        }
    }

    /// Returns true if moving from `self` to `next` is a legal transition.
    /// Same-state moves are never legal.
    #[must_use]
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.successors().contains(&next)
    }

    /// Terminal orders leave the active list.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Rejected)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGAL: [(OrderStatus, OrderStatus); 5] = [
        (OrderStatus::New, OrderStatus::Accepted),
        (OrderStatus::New, OrderStatus::Rejected),
        (OrderStatus::Accepted, OrderStatus::Ready),
        (OrderStatus::Accepted, OrderStatus::Rejected),
        (OrderStatus::Ready, OrderStatus::Delivered),
    ];

    #[test]
    fn test_transition_table_is_exact() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    LEGAL.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_successors() {
        for status in OrderStatus::ALL {
            assert_eq!(status.is_terminal(), status.successors().is_empty());
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<OrderStatus>().is_err());
        assert!("New".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Delivered).unwrap(),
            "\"delivered\""
        );
    }
}
