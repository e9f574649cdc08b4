//! Secret store backends
//!
//! The resolver talks to a [`SecretStore`]; production uses AWS Secrets
//! Manager, tests substitute an in-memory store.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use std::sync::Arc;
use tracing::debug;

use crate::SecretArn;

/// Read access to a managed secret store
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret string stored under `arn`
    ///
    /// `Ok(None)` means the call succeeded but the secret has no string value.
    async fn get_secret_string(&self, arn: &SecretArn) -> Result<Option<String>, String>;
}

/// Shared secret store handle
pub type SharedSecretStore = Arc<dyn SecretStore>;

/// AWS Secrets Manager backend
///
/// A new SDK client is built per call, pinned to the region in the ARN.
#[derive(Debug, Clone, Default)]
pub struct AwsSecretStore;

impl AwsSecretStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn get_secret_string(&self, arn: &SecretArn) -> Result<Option<String>, String> {
        let conf = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(arn.region().to_string()))
            .load()
            .await;
        let client = aws_sdk_secretsmanager::Client::new(&conf);

        debug!("Fetching secret {} in {}", arn, arn.region());

        let output = client
            .get_secret_value()
            .secret_id(arn.as_str())
            .send()
            .await
            .map_err(|e| DisplayErrorContext(&e).to_string())?;

        Ok(output.secret_string().map(str::to_string))
    }
}
