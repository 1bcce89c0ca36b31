pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::CliConfig;
pub use core::client::SandboxClient;
pub use core::workflow::{Stage, StageFailure, TransferReceipt, Workflow, WorkflowRun};
pub use domain::ports::PayoutApi;
pub use utils::error::{PayoutError, Result};
