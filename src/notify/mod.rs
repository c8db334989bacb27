//! Customer notifications for order lifecycle events.
//!
//! The core hands every event to a [`Notifier`] after its writes are done and
//! never looks at the outcome: delivery happens off the request path and a
//! failed send is only logged.

mod sms;
mod templates;

pub use sms::SmsNotifier;
pub use templates::render;

use crate::types::{NotificationEvent, Order, Restaurant};

pub trait Notifier: Send + Sync {
    /// Starts delivery of `event` for `order` and returns immediately.
    fn notify(&self, event: NotificationEvent, order: &Order, restaurant: &Restaurant);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, event: NotificationEvent, order: &Order, restaurant: &Restaurant) {
        tracing::debug!(
            "Skipping {event:?} notification for order {} of {}",
            order.id,
            restaurant.slug
        );
    }
}
