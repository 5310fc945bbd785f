use serde::Deserialize;

/// First-stage decode, just enough to dispatch on the event tag. Other event
/// families (`order.*`, `refund.*`) do not carry `payload.payment`, so the
/// full shape is only required once the tag says it is there.
#[derive(Deserialize)]
pub struct EventEnvelope {
    pub event: String,
}

#[derive(Deserialize)]
pub struct PaymentEvent {
    pub payload: EventPayload,
}

#[derive(Deserialize)]
pub struct EventPayload {
    pub payment: PaymentWrapper,
}

#[derive(Deserialize)]
pub struct PaymentWrapper {
    pub entity: PaymentEntity,
}

#[derive(Deserialize)]
pub struct PaymentEntity {
    pub id: String,
    /// Minor units (paise for INR).
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
    pub receipt: String,
    #[serde(default)]
    pub notes: PaymentNotes,
}

/// Free-form key/value payload set by the storefront at checkout; everything
/// in here is optional. `address` is a JSON string, not a nested object.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotes {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub clerk_user_id: Option<String>,
    pub address: Option<String>,
}
