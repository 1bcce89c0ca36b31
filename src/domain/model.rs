use serde::{Deserialize, Serialize};

/// Acting account context returned by `GET /v2/profiles`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub profile_type: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub source_currency: String,
    pub target_currency: String,
    pub source_amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    #[serde(default)]
    pub source_currency: String,
    #[serde(default)]
    pub target_currency: String,
    #[serde(default)]
    pub source_amount: f64,
    #[serde(default)]
    pub payment_options: Vec<PaymentOption>,
}

/// One pay-in/pay-out variant inside a quote. The provider populates
/// different field subsets per rail, so everything defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentOption {
    pub pay_in: String,
    pub pay_out: String,
    pub source_amount: f64,
    pub target_amount: f64,
    pub source_currency: String,
    pub target_currency: String,
    pub fee: Fee,
    pub estimated_delivery: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fee {
    pub total: f64,
}

/// Request body for `POST /v1/accounts` (GBP sort-code rail).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientDetails {
    pub account_holder_name: String,
    pub currency: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub details: SortCodeDetails,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortCodeDetails {
    pub legal_type: String,
    pub sort_code: String,
    pub account_number: String,
}

impl Default for RecipientDetails {
    fn default() -> Self {
        Self {
            account_holder_name: "GBP Person Name".to_string(),
            currency: "GBP".to_string(),
            account_type: "sort_code".to_string(),
            details: SortCodeDetails {
                legal_type: "PRIVATE".to_string(),
                sort_code: "04-00-04".to_string(),
                account_number: "12345678".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub id: i64,
    #[serde(default)]
    pub account_holder_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Request body for `POST /v1/transfers`. `customer_transaction_id` is the
/// client-generated idempotency token, fresh per transfer attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub target_account: i64,
    pub quote_uuid: String,
    pub customer_transaction_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: i64,
    pub status: String,
}
