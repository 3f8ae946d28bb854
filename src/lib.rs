pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;

pub use agent::CommandGenerator;
pub use error::{AppError, Result};
pub use llm::{CompletionBackend, SamplingParams};
