use crate::types::{NotificationEvent, Order, OrderType, Restaurant};

/// Renders the SMS body sent to the customer for `event`.
#[must_use]
pub fn render(event: NotificationEvent, order: &Order, restaurant: &Restaurant) -> String {
    let reference = order.short_ref();
    let name = &restaurant.name;

    match event {
        NotificationEvent::OrderReceived => format!(
            "Hi {}, your order #{reference} has been received by {name}! We'll update you when it's accepted.",
            order.customer_name
        ),
        NotificationEvent::OrderAccepted => format!(
            "Great news! {name} has accepted your order #{reference} and is preparing it now."
        ),
        NotificationEvent::OrderReady => match order.order_type {
            OrderType::Delivery => format!("Your order #{reference} from {name} is on its way!"),
            OrderType::Collection => {
                format!("Your order #{reference} is ready for collection at {name}!")
            }
        },
        NotificationEvent::OrderDelivered => format!(
            "Your order #{reference} from {name} has been delivered. Enjoy your meal!"
        ),
        NotificationEvent::OrderRejected => format!(
            "Sorry, {name} was unable to fulfil your order #{reference} at this time. Please contact them directly for details."
        ),
    }
}
