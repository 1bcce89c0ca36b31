pub mod client;
pub mod quote;
pub mod workflow;

pub use crate::domain::ports::PayoutApi;
pub use crate::utils::error::Result;
