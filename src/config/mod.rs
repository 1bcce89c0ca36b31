use crate::domain::model::{QuoteRequest, RecipientDetails, SortCodeDetails};
use crate::utils::error::{PayoutError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::Deserialize;

#[derive(Debug, Clone, Parser)]
#[command(name = "payout-flow")]
#[command(about = "Automates a cross-currency transfer against the Wise sandbox API")]
pub struct CliConfig {
    #[arg(long, default_value = "https://api.sandbox.transferwise.tech")]
    pub base_url: String,

    #[arg(long, env = "WISE_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    #[arg(long, default_value = "SGD")]
    pub source_currency: String,

    #[arg(long, default_value = "GBP")]
    pub target_currency: String,

    #[arg(long, default_value = "1000")]
    pub amount: f64,

    #[arg(long, help = "TOML file overriding the built-in sort-code recipient")]
    pub recipient_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Optional recipient overrides loaded from `--recipient-file`. Every field
/// falls back to the built-in GBP sort-code defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipientFile {
    pub account_holder_name: Option<String>,
    pub currency: Option<String>,
    pub account_type: Option<String>,
    pub legal_type: Option<String>,
    pub sort_code: Option<String>,
    pub account_number: Option<String>,
}

impl RecipientFile {
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| PayoutError::Config {
            message: format!("invalid recipient file {}: {}", path, e),
        })
    }

    pub fn into_details(self, fallback_currency: &str) -> RecipientDetails {
        let defaults = RecipientDetails::default();
        RecipientDetails {
            account_holder_name: self
                .account_holder_name
                .unwrap_or(defaults.account_holder_name),
            currency: self
                .currency
                .unwrap_or_else(|| fallback_currency.to_string()),
            account_type: self.account_type.unwrap_or(defaults.account_type),
            details: SortCodeDetails {
                legal_type: self.legal_type.unwrap_or(defaults.details.legal_type),
                sort_code: self.sort_code.unwrap_or(defaults.details.sort_code),
                account_number: self
                    .account_number
                    .unwrap_or(defaults.details.account_number),
            },
        }
    }
}

impl CliConfig {
    pub fn quote_request(&self) -> QuoteRequest {
        QuoteRequest {
            source_currency: self.source_currency.clone(),
            target_currency: self.target_currency.clone(),
            source_amount: self.amount,
        }
    }

    pub fn recipient_details(&self) -> Result<RecipientDetails> {
        let overrides = match &self.recipient_file {
            Some(path) => RecipientFile::load(path)?,
            None => RecipientFile::default(),
        };
        Ok(overrides.into_details(&self.target_currency))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("api_token", &self.api_token)?;
        validation::validate_currency_code("source_currency", &self.source_currency)?;
        validation::validate_currency_code("target_currency", &self.target_currency)?;
        validation::validate_positive_amount("amount", self.amount)?;
        Ok(())
    }
}
