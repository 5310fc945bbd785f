use axum::{body::Bytes, extract::State, Json};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    err_responses::WebhookError,
    sanity::{OrderAddress, OrderRecord},
};

use super::request_payload::{EventEnvelope, PaymentEntity, PaymentEvent};

#[derive(serde::Serialize)]
pub struct ResponseBody {
    received: bool,
}

/// Runs behind `auth::ver_sig`, so the body bytes are already authenticated.
/// Non-captured events are acknowledged without touching the store; the
/// gateway only needs the 200 to stop redelivering.
pub async fn webhook_handler(
    State(state): State<crate::AppState>,
    body: Bytes,
) -> Result<Json<ResponseBody>, WebhookError> {
    let envelope: EventEnvelope =
        serde_json::from_slice(&body).map_err(WebhookError::MalformedPayload)?;

    if envelope.event != "payment.captured" {
        tracing::debug!(event = %envelope.event, "ignoring non-captured event");
        return Ok(Json(ResponseBody { received: true }));
    }

    let event: PaymentEvent =
        serde_json::from_slice(&body).map_err(WebhookError::MalformedPayload)?;

    let order = build_order(event.payload.payment.entity, OffsetDateTime::now_utc())?;
    let created = state.store.create_order(&order).await.map_err(|err| {
        tracing::error!(%err, payment_id = %order.razorpay_payment_id, "order creation failed");
        WebhookError::StoreWriteFailed(err)
    })?;

    tracing::info!(
        document_id = %created.id,
        order_number = %order.order_number,
        payment_id = %order.razorpay_payment_id,
        "order recorded"
    );

    Ok(Json(ResponseBody { received: true }))
}

/// Maps a captured payment onto the store's order document. A present but
/// unparseable `notes.address` aborts the whole delivery; dropping the
/// address silently would hand the storefront an order it cannot ship.
pub fn build_order(
    payment: PaymentEntity,
    order_date: OffsetDateTime,
) -> Result<OrderRecord, WebhookError> {
    let notes = payment.notes;

    let address = notes
        .address
        .as_deref()
        .map(serde_json::from_str::<OrderAddress>)
        .transpose()
        .map_err(WebhookError::MalformedAddress)?;

    Ok(OrderRecord {
        doc_type: "order",
        order_number: payment.receipt,
        razorpay_order_id: payment.order_id,
        razorpay_payment_id: payment.id,
        customer_name: notes.customer_name,
        razorpay_customer_id: notes.customer_email.clone(),
        clerk_user_id: notes.clerk_user_id,
        email: notes.customer_email,
        currency: payment.currency,
        // Gateway amounts arrive in minor units; scale 2 turns paise into
        // rupees exactly.
        total_price: Decimal::new(payment.amount, 2),
        status: "paid",
        order_date,
        address,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use super::*;
    use crate::err_responses::WebhookError;

    fn captured_entity(notes_address: Option<&str>) -> PaymentEntity {
        let address = notes_address
            .map(|addr| format!(r#","address":{}"#, serde_json::to_string(addr).unwrap()))
            .unwrap_or_default();
        let json = format!(
            r#"{{
                "id": "pay_Lk2aEXvN9wXy01",
                "amount": 10000,
                "currency": "INR",
                "order_id": "order_Lk29vYxG4JbqTn",
                "receipt": "receipt-1034",
                "notes": {{
                    "customerName": "Asha Rao",
                    "customerEmail": "asha@example.com",
                    "clerkUserId": "user_2aGfk3"{address}
                }}
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn maps_captured_payment_to_order() {
        let order = build_order(
            captured_entity(None),
            datetime!(2025-03-01 12:00:00 UTC),
        )
        .unwrap();

        assert_eq!(order.doc_type, "order");
        assert_eq!(order.status, "paid");
        assert_eq!(order.order_number, "receipt-1034");
        assert_eq!(order.razorpay_order_id, "order_Lk29vYxG4JbqTn");
        assert_eq!(order.razorpay_payment_id, "pay_Lk2aEXvN9wXy01");
        assert_eq!(order.currency, "INR");
        // 10000 paise = 100.00 rupees
        assert_eq!(order.total_price, Decimal::new(10000, 2));
        assert_eq!(order.total_price.to_string(), "100.00");
        assert_eq!(order.address, None);
    }

    #[test]
    fn customer_email_fills_both_email_fields() {
        let order = build_order(
            captured_entity(None),
            datetime!(2025-03-01 12:00:00 UTC),
        )
        .unwrap();

        assert_eq!(order.email.as_deref(), Some("asha@example.com"));
        assert_eq!(
            order.razorpay_customer_id.as_deref(),
            Some("asha@example.com")
        );
        assert_eq!(order.clerk_user_id.as_deref(), Some("user_2aGfk3"));
    }

    #[test]
    fn parses_address_from_notes_json_string() {
        let order = build_order(
            captured_entity(Some(
                r#"{"state":"KA","zip":"560001","city":"Bengaluru","address":"12 MG Road","name":"Asha Rao"}"#,
            )),
            datetime!(2025-03-01 12:00:00 UTC),
        )
        .unwrap();

        let address = order.address.unwrap();
        assert_eq!(address.city.as_deref(), Some("Bengaluru"));
        assert_eq!(address.zip.as_deref(), Some("560001"));
        assert_eq!(address.name.as_deref(), Some("Asha Rao"));
    }

    #[test]
    fn invalid_address_json_fails_closed() {
        let result = build_order(
            captured_entity(Some("{invalid json")),
            datetime!(2025-03-01 12:00:00 UTC),
        );

        assert!(matches!(result, Err(WebhookError::MalformedAddress(_))));
    }

    #[test]
    fn missing_notes_produce_bare_order() {
        let entity: PaymentEntity = serde_json::from_str(
            r#"{
                "id": "pay_x",
                "amount": 4999,
                "currency": "INR",
                "order_id": "order_x",
                "receipt": "receipt-1"
            }"#,
        )
        .unwrap();

        let order = build_order(entity, datetime!(2025-03-01 12:00:00 UTC)).unwrap();
        assert_eq!(order.customer_name, None);
        assert_eq!(order.email, None);
        assert_eq!(order.total_price.to_string(), "49.99");
    }
}
