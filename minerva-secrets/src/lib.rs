//! Minerva Inspector Secrets
//!
//! Resolves the search handler's credentials at invocation time:
//! - ARN parsing (region extraction, format checks before any network call)
//! - AWS Secrets Manager backend behind the [`SecretStore`] trait
//! - JSON decoding into a [`SecretBundle`]

pub mod arn;
pub mod resolver;
pub mod store;

pub use arn::*;
pub use resolver::*;
pub use store::*;

use thiserror::Error;

/// Errors from secret resolution
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Invalid SecretsManager ARN format: {0}")]
    Format(String),

    #[error("Fail to retrieve secret values: {arn}: {reason}")]
    Retrieval { arn: String, reason: String },

    #[error("Fail to parse secret values as JSON: {arn}: {reason}")]
    Parse { arn: String, reason: String },
}
