use crate::domain::model::{
    Profile, Quote, QuoteRequest, Recipient, RecipientDetails, Transfer, TransferRequest,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Transport seam to the payments provider. Implementations perform
/// authenticated JSON calls and normalize failures into `PayoutError`.
#[async_trait]
pub trait PayoutApi: Send + Sync {
    async fn list_profiles(&self) -> Result<Vec<Profile>>;
    async fn create_quote(&self, profile_id: i64, request: &QuoteRequest) -> Result<Quote>;
    async fn create_recipient(&self, request: &RecipientDetails) -> Result<Recipient>;
    async fn create_transfer(&self, request: &TransferRequest) -> Result<Transfer>;
}
