use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::config::SanityConfig;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Sanity rejected mutation ({status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Sanity returned no created document")]
    EmptyResult,
}

/// Shipping address smuggled through the payment notes as a JSON string.
/// Unknown keys are ignored, missing ones stay unset in the document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The `order` document as the studio schema expects it. `razorpayCustomerId`
/// carries the customer email, not a gateway customer id; the storefront
/// queries on that field name so it stays.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(rename = "_type")]
    pub doc_type: &'static str,
    pub order_number: String,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clerk_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub currency: String,
    pub total_price: Decimal,
    pub status: &'static str,
    #[serde(with = "time::serde::iso8601")]
    pub order_date: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<OrderAddress>,
}

#[derive(Deserialize, Debug)]
pub struct CreatedOrder {
    #[serde(rename = "_id")]
    pub id: String,
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, order: &OrderRecord) -> Result<CreatedOrder, StoreError>;
}

#[derive(Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    mutate_url: String,
    token: String,
}

impl SanityClient {
    pub fn new(http: reqwest::Client, config: &SanityConfig) -> Self {
        Self {
            http,
            mutate_url: format!(
                "https://{}.api.sanity.io/{}/data/mutate/{}?returnDocuments=true",
                config.project_id, config.api_version, config.dataset
            ),
            token: config.token.clone(),
        }
    }
}

#[derive(Deserialize)]
struct MutateResponse {
    results: Vec<MutateResult>,
}

#[derive(Deserialize)]
struct MutateResult {
    document: CreatedOrder,
}

#[async_trait]
impl OrderStore for SanityClient {
    async fn create_order(&self, order: &OrderRecord) -> Result<CreatedOrder, StoreError> {
        let response = self
            .http
            .post(&self.mutate_url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "mutations": [{ "create": order }] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        let mut parsed: MutateResponse = response.json().await?;
        parsed
            .results
            .pop()
            .map(|result| result.document)
            .ok_or(StoreError::EmptyResult)
    }
}
