use crate::core::quote::{select_bank_transfer_option, summarize_option};
use crate::domain::model::{Profile, QuoteRequest, RecipientDetails, TransferRequest};
use crate::domain::ports::PayoutApi;
use crate::utils::error::{PayoutError, Result};
use std::fmt;
use uuid::Uuid;

/// Successful transitions of one workflow run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ProfileResolved,
    QuoteObtained,
    OptionSelected,
    RecipientRegistered,
    TransferInitiated,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ProfileResolved => "profile resolution",
            Stage::QuoteObtained => "quote creation",
            Stage::OptionSelected => "payment option selection",
            Stage::RecipientRegistered => "recipient registration",
            Stage::TransferInitiated => "transfer creation",
        };
        f.write_str(name)
    }
}

/// Terminal failure: the stage that was being attempted and its cause.
/// Entities created by earlier stages are not rolled back.
#[derive(Debug)]
pub struct StageFailure {
    pub stage: Stage,
    pub source: PayoutError,
}

#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub profile_id: i64,
    pub quote_id: String,
    pub recipient_id: i64,
    pub transfer_id: i64,
    pub status: String,
}

/// Outcome of one run: the observation lines emitted before completion or
/// failure, and the terminal state.
#[derive(Debug)]
pub struct WorkflowRun {
    pub observations: Vec<String>,
    pub outcome: std::result::Result<TransferReceipt, StageFailure>,
}

/// First profile as returned by the provider; no client-side ordering.
pub fn resolve_profile(mut profiles: Vec<Profile>) -> Result<Profile> {
    if profiles.is_empty() {
        return Err(PayoutError::EmptyProfileList);
    }
    Ok(profiles.remove(0))
}

/// Sequences the transfer workflow: resolve profile, negotiate a quote,
/// select the bank-transfer option, register the recipient, create the
/// transfer. Strictly sequential, one request in flight at a time; a stage
/// failure aborts everything after it.
pub struct Workflow<A: PayoutApi> {
    api: A,
    quote_request: QuoteRequest,
    recipient: RecipientDetails,
}

impl<A: PayoutApi> Workflow<A> {
    pub fn new(api: A, quote_request: QuoteRequest, recipient: RecipientDetails) -> Self {
        Self {
            api,
            quote_request,
            recipient,
        }
    }

    pub async fn run(&self) -> WorkflowRun {
        let mut observations = Vec::new();
        let outcome = self.execute(&mut observations).await;
        WorkflowRun {
            observations,
            outcome,
        }
    }

    async fn execute(
        &self,
        observations: &mut Vec<String>,
    ) -> std::result::Result<TransferReceipt, StageFailure> {
        let profile = self
            .api
            .list_profiles()
            .await
            .and_then(resolve_profile)
            .map_err(fail_at(Stage::ProfileResolved))?;
        emit(observations, format!("Profile ID: {}", profile.id));

        let quote = self
            .api
            .create_quote(profile.id, &self.quote_request)
            .await
            .map_err(fail_at(Stage::QuoteObtained))?;
        emit(observations, format!("Quote ID: {}", quote.id));

        let summary = select_bank_transfer_option(&quote)
            .and_then(summarize_option)
            .map_err(fail_at(Stage::OptionSelected))?;
        emit(
            observations,
            format!(
                "Amount the recipient will receive: {} {}",
                summary.target_amount, summary.target_currency
            ),
        );
        emit(
            observations,
            format!("Exchange Rate: {:.4}", summary.exchange_rate),
        );
        emit(
            observations,
            format!("Total Fee: {} {}", summary.fee_total, summary.fee_currency),
        );
        emit(
            observations,
            format!("Delivery Estimates: {}", summary.delivery_estimate),
        );

        let recipient = self
            .api
            .create_recipient(&self.recipient)
            .await
            .map_err(fail_at(Stage::RecipientRegistered))?;
        emit(observations, format!("Recipient ID: {}", recipient.id));

        // Fresh idempotency token per attempt. Never retried here: a retry
        // with a new token would risk a duplicate transfer.
        let request = TransferRequest {
            target_account: recipient.id,
            quote_uuid: quote.id.clone(),
            customer_transaction_id: Uuid::new_v4().to_string(),
        };
        let transfer = self
            .api
            .create_transfer(&request)
            .await
            .map_err(fail_at(Stage::TransferInitiated))?;
        emit(observations, format!("Transfer ID: {}", transfer.id));
        emit(observations, format!("Transfer Status: {}", transfer.status));

        Ok(TransferReceipt {
            profile_id: profile.id,
            quote_id: quote.id,
            recipient_id: recipient.id,
            transfer_id: transfer.id,
            status: transfer.status,
        })
    }
}

fn fail_at(stage: Stage) -> impl FnOnce(PayoutError) -> StageFailure {
    move |source| StageFailure { stage, source }
}

fn emit(observations: &mut Vec<String>, line: String) {
    tracing::info!("{}", line);
    println!("{}", line);
    observations.push(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Fee, PaymentOption, Quote, Recipient, Transfer};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MockApi {
        profiles: Result<Vec<Profile>>,
        quote: Result<Quote>,
        recipient: Result<Recipient>,
        transfer: Result<Transfer>,
        transfer_requests: Arc<Mutex<Vec<TransferRequest>>>,
    }

    fn profile(id: i64) -> Profile {
        serde_json::from_value(serde_json::json!({"id": id})).unwrap()
    }

    fn bank_transfer_quote() -> Quote {
        Quote {
            id: "quote-abc".to_string(),
            source_currency: "SGD".to_string(),
            target_currency: "GBP".to_string(),
            source_amount: 1000.0,
            payment_options: vec![
                PaymentOption {
                    pay_in: "BALANCE".to_string(),
                    pay_out: "BANK_TRANSFER".to_string(),
                    ..PaymentOption::default()
                },
                PaymentOption {
                    pay_in: "BANK_TRANSFER".to_string(),
                    pay_out: "BANK_TRANSFER".to_string(),
                    source_amount: 1000.0,
                    target_amount: 588.24,
                    source_currency: "SGD".to_string(),
                    target_currency: "GBP".to_string(),
                    fee: Fee { total: 5.5 },
                    estimated_delivery: "2024-03-15T14:30:00Z".to_string(),
                },
            ],
        }
    }

    fn recipient(id: i64) -> Recipient {
        serde_json::from_value(serde_json::json!({"id": id})).unwrap()
    }

    fn transfer(id: i64, status: &str) -> Transfer {
        Transfer {
            id,
            status: status.to_string(),
        }
    }

    impl MockApi {
        fn happy_path() -> Self {
            Self {
                profiles: Ok(vec![profile(111)]),
                quote: Ok(bank_transfer_quote()),
                recipient: Ok(recipient(222)),
                transfer: Ok(transfer(333, "processing")),
                transfer_requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    fn clone_result<T: Clone>(result: &Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value.clone()),
            Err(PayoutError::Upstream {
                status,
                trace_id,
                body,
            }) => Err(PayoutError::Upstream {
                status: *status,
                trace_id: trace_id.clone(),
                body: body.clone(),
            }),
            Err(other) => panic!("mock only injects Upstream errors, got {:?}", other),
        }
    }

    #[async_trait]
    impl PayoutApi for MockApi {
        async fn list_profiles(&self) -> Result<Vec<Profile>> {
            clone_result(&self.profiles)
        }

        async fn create_quote(&self, _profile_id: i64, _request: &QuoteRequest) -> Result<Quote> {
            clone_result(&self.quote)
        }

        async fn create_recipient(&self, _request: &RecipientDetails) -> Result<Recipient> {
            clone_result(&self.recipient)
        }

        async fn create_transfer(&self, request: &TransferRequest) -> Result<Transfer> {
            self.transfer_requests.lock().await.push(request.clone());
            clone_result(&self.transfer)
        }
    }

    fn upstream(status: u16) -> PayoutError {
        PayoutError::Upstream {
            status,
            trace_id: Some("trace-1".to_string()),
            body: "boom".to_string(),
        }
    }

    fn sgd_to_gbp() -> QuoteRequest {
        QuoteRequest {
            source_currency: "SGD".to_string(),
            target_currency: "GBP".to_string(),
            source_amount: 1000.0,
        }
    }

    #[test]
    fn test_resolve_profile_takes_first() {
        let resolved = resolve_profile(vec![profile(111), profile(999)]).unwrap();
        assert_eq!(resolved.id, 111);
    }

    #[test]
    fn test_resolve_profile_empty_list_is_an_error() {
        assert!(matches!(
            resolve_profile(vec![]),
            Err(PayoutError::EmptyProfileList)
        ));
    }

    #[tokio::test]
    async fn test_complete_run_emits_nine_observations_in_order() {
        let workflow = Workflow::new(
            MockApi::happy_path(),
            sgd_to_gbp(),
            RecipientDetails::default(),
        );
        let run = workflow.run().await;

        let receipt = run.outcome.unwrap();
        assert_eq!(receipt.profile_id, 111);
        assert_eq!(receipt.transfer_id, 333);
        assert_eq!(receipt.status, "processing");

        assert_eq!(
            run.observations,
            vec![
                "Profile ID: 111",
                "Quote ID: quote-abc",
                "Amount the recipient will receive: 588.24 GBP",
                "Exchange Rate: 1.7000",
                "Total Fee: 5.5 SGD",
                "Delivery Estimates: March 15 2024 14:30:00 UTC",
                "Recipient ID: 222",
                "Transfer ID: 333",
                "Transfer Status: processing",
            ]
        );
    }

    #[tokio::test]
    async fn test_quote_failure_aborts_after_profile_observation() {
        let api = MockApi {
            quote: Err(upstream(500)),
            ..MockApi::happy_path()
        };
        let workflow = Workflow::new(api, sgd_to_gbp(), RecipientDetails::default());
        let run = workflow.run().await;

        let failure = run.outcome.unwrap_err();
        assert_eq!(failure.stage, Stage::QuoteObtained);
        assert!(matches!(
            failure.source,
            PayoutError::Upstream { status: 500, .. }
        ));
        assert_eq!(run.observations, vec!["Profile ID: 111"]);
    }

    #[tokio::test]
    async fn test_recipient_failure_leaves_transfer_uncalled() {
        let api = MockApi {
            recipient: Err(upstream(422)),
            ..MockApi::happy_path()
        };
        let requests = Arc::clone(&api.transfer_requests);
        let workflow = Workflow::new(api, sgd_to_gbp(), RecipientDetails::default());
        let run = workflow.run().await;

        let failure = run.outcome.unwrap_err();
        assert_eq!(failure.stage, Stage::RecipientRegistered);
        assert_eq!(run.observations.len(), 6);
        assert!(requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_bank_transfer_option_fails_option_selection() {
        let api = MockApi {
            quote: Ok(Quote {
                payment_options: vec![PaymentOption {
                    pay_in: "BALANCE".to_string(),
                    pay_out: "BALANCE".to_string(),
                    ..PaymentOption::default()
                }],
                ..bank_transfer_quote()
            }),
            ..MockApi::happy_path()
        };
        let workflow = Workflow::new(api, sgd_to_gbp(), RecipientDetails::default());
        let run = workflow.run().await;

        let failure = run.outcome.unwrap_err();
        assert_eq!(failure.stage, Stage::OptionSelected);
        assert!(matches!(
            failure.source,
            PayoutError::NoBankTransferOption
        ));
        assert_eq!(
            run.observations,
            vec!["Profile ID: 111", "Quote ID: quote-abc"]
        );
    }

    #[tokio::test]
    async fn test_empty_profile_list_fails_without_observations() {
        let api = MockApi {
            profiles: Ok(vec![]),
            ..MockApi::happy_path()
        };
        let workflow = Workflow::new(api, sgd_to_gbp(), RecipientDetails::default());
        let run = workflow.run().await;

        let failure = run.outcome.unwrap_err();
        assert_eq!(failure.stage, Stage::ProfileResolved);
        assert!(matches!(failure.source, PayoutError::EmptyProfileList));
        assert!(run.observations.is_empty());
    }

    #[tokio::test]
    async fn test_each_transfer_attempt_uses_a_fresh_idempotency_token() {
        let api = MockApi::happy_path();
        let requests = Arc::clone(&api.transfer_requests);
        let workflow = Workflow::new(api, sgd_to_gbp(), RecipientDetails::default());

        workflow.run().await.outcome.unwrap();
        workflow.run().await.outcome.unwrap();

        let requests = requests.lock().await;
        assert_eq!(requests.len(), 2);
        assert_ne!(
            requests[0].customer_transaction_id,
            requests[1].customer_transaction_id
        );
        assert_eq!(requests[0].target_account, 222);
        assert_eq!(requests[0].quote_uuid, "quote-abc");
    }
}
