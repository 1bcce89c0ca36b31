use crate::domain::model::{PaymentOption, Quote};
use crate::utils::error::{PayoutError, Result};
use chrono::{DateTime, Utc};

const BANK_TRANSFER: &str = "BANK_TRANSFER";

/// Decision data derived from the selected payment option.
#[derive(Debug, Clone)]
pub struct OptionSummary {
    pub target_amount: f64,
    pub target_currency: String,
    pub exchange_rate: f64,
    pub fee_total: f64,
    pub fee_currency: String,
    pub delivery_estimate: String,
}

/// Picks the bank-transfer-in / bank-transfer-out variant. The provider
/// returns a heterogeneous option list (BALANCE pay-in and so on) and only
/// this pairing carries the fee the workflow must report. First match wins
/// when the list contains duplicates.
pub fn select_bank_transfer_option(quote: &Quote) -> Result<&PaymentOption> {
    quote
        .payment_options
        .iter()
        .find(|option| option.pay_in == BANK_TRANSFER && option.pay_out == BANK_TRANSFER)
        .ok_or(PayoutError::NoBankTransferOption)
}

/// Source-per-target rate, rounded half-up to 4 fractional digits.
pub fn exchange_rate(source_amount: f64, target_amount: f64) -> Result<f64> {
    if target_amount == 0.0 {
        return Err(PayoutError::Computation {
            message: "target amount is zero, exchange rate is undefined".to_string(),
        });
    }
    Ok((source_amount / target_amount * 10_000.0).round() / 10_000.0)
}

/// Renders the provider's ISO delivery timestamp as
/// `"<Month> <day> <year> <HH:MM:SS> <zone>"`, e.g.
/// `March 15 2024 14:30:00 UTC`. The timestamp is parsed exactly once and
/// every field is taken from that single parse. Sandbox estimates are UTC,
/// so the output is rendered in UTC and stays stable across host timezones.
pub fn format_delivery_estimate(timestamp: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).map_err(|e| PayoutError::Computation {
        message: format!("invalid delivery estimate {:?}: {}", timestamp, e),
    })?;
    let utc = parsed.with_timezone(&Utc);
    Ok(utc.format("%B %-d %Y %H:%M:%S %Z").to_string())
}

/// Computes all derived metrics from one selected option. Nothing here looks
/// at the other options in the quote.
pub fn summarize_option(option: &PaymentOption) -> Result<OptionSummary> {
    Ok(OptionSummary {
        target_amount: option.target_amount,
        target_currency: option.target_currency.clone(),
        exchange_rate: exchange_rate(option.source_amount, option.target_amount)?,
        fee_total: option.fee.total,
        fee_currency: option.source_currency.clone(),
        delivery_estimate: format_delivery_estimate(&option.estimated_delivery)?,
    })
}
