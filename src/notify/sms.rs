use serde::Serialize;
use tokio::runtime::Handle;

use super::{Notifier, render};
use crate::types::{NotificationEvent, Order, Restaurant};

const MAX_SENDER_LEN: usize = 11;

#[derive(Debug, Serialize)]
struct SmsPayload {
    to: String,
    message: String,
    from: String,
}

/// Sends order notifications through an HTTP SMS gateway using each
/// restaurant's own API key.
#[derive(Clone)]
pub struct SmsNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl SmsNotifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

/// Returns true if the restaurant wants `event` delivered and the order can receive it.
fn should_send(event: NotificationEvent, order: &Order, restaurant: &Restaurant) -> bool {
    let sms = &restaurant.sms;
    sms.enabled
        && !sms.api_key.is_empty()
        && sms.is_event_enabled(event)
        && !order.customer_phone.is_empty()
}

fn sender_name(restaurant: &Restaurant) -> String {
    restaurant.name.chars().take(MAX_SENDER_LEN).collect()
}

impl Notifier for SmsNotifier {
    fn notify(&self, event: NotificationEvent, order: &Order, restaurant: &Restaurant) {
        if !should_send(event, order, restaurant) {
            return;
        }

        let Ok(handle) = Handle::try_current() else {
            tracing::warn!(
                "No async runtime, dropping {event:?} SMS for order {}",
                order.id
            );
            return;
        };

        let payload = SmsPayload {
            to: order.customer_phone.clone(),
            message: render(event, order, restaurant),
            from: sender_name(restaurant),
        };
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&restaurant.sms.api_key)
            .json(&payload);
        let order_id = order.id.clone();

        handle.spawn(async move {
            match request.send().await.and_then(|r| r.error_for_status()) {
                Ok(_) => tracing::debug!("Sent {event:?} SMS for order {order_id}"),
                Err(e) => tracing::warn!("SMS send failed ({event:?}) for order {order_id}: {e}"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use chrono::Utc;

    use super::*;
    use crate::types::{Currency, OrderStatus, OrderType, SmsSettings};

    fn restaurant(sms: SmsSettings) -> Restaurant {
        Restaurant {
            slug: "cafe-x".to_string(),
            name: "The Long Named Cafe".to_string(),
            tagline: String::new(),
            currency: Currency::Gbp,
            delivery_fee: 0.0,
            min_order: 0.0,
            order_types: BTreeSet::from([OrderType::Collection]),
            theme_color: "#28A745".to_string(),
            sms,
            created_at: Utc::now(),
        }
    }

    fn order(phone: &str) -> Order {
        Order {
            id: "abc123".to_string(),
            customer_name: "Ann".to_string(),
            customer_phone: phone.to_string(),
            order_type: OrderType::Collection,
            items: Vec::new(),
            subtotal: 0.0,
            delivery_fee: 0.0,
            total: 0.0,
            notes: String::new(),
            status: OrderStatus::New,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn enabled() -> SmsSettings {
        SmsSettings {
            enabled: true,
            api_key: "secret".to_string(),
            events: BTreeMap::new(),
        }
    }

    #[test]
    fn test_should_send_gates() {
        let event = NotificationEvent::OrderAccepted;
        assert!(should_send(event, &order("0770"), &restaurant(enabled())));
        assert!(!should_send(event, &order(""), &restaurant(enabled())));

        let disabled = SmsSettings {
            enabled: false,
            ..enabled()
        };
        assert!(!should_send(event, &order("0770"), &restaurant(disabled)));

        let no_key = SmsSettings {
            api_key: String::new(),
            ..enabled()
        };
        assert!(!should_send(event, &order("0770"), &restaurant(no_key)));

        let switched_off = SmsSettings {
            events: BTreeMap::from([(event, false)]),
            ..enabled()
        };
        assert!(!should_send(event, &order("0770"), &restaurant(switched_off)));
    }

    #[test]
    fn test_sender_name_is_capped() {
        assert_eq!(sender_name(&restaurant(enabled())), "The Long Na");
    }

    #[test]
    fn test_notify_without_runtime_does_not_panic() {
        let notifier = SmsNotifier::new("http://127.0.0.1:9/sms");
        notifier.notify(
            NotificationEvent::OrderReceived,
            &order("0770"),
            &restaurant(enabled()),
        );
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_swallowed() {
        let notifier = SmsNotifier::new("http://127.0.0.1:9/sms");
        notifier.notify(
            NotificationEvent::OrderReceived,
            &order("0770"),
            &restaurant(enabled()),
        );
        tokio::task::yield_now().await;
    }
}
