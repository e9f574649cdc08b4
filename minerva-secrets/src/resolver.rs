//! Secret bundle resolution: parse the ARN, fetch, decode

use serde::Deserialize;
use std::fmt;
use tracing::debug;

use crate::{SecretArn, SecretError, SharedSecretStore};

/// Credentials and endpoints used by the search handler
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SecretBundle {
    /// Minerva API key, sent as `x-api-key`
    #[serde(rename = "minerva_apikey", alias = "key")]
    pub api_key: String,
    /// Base URL of the Minerva search API
    pub minerva_endpoint: String,
    /// Base URL of the Strix search UI
    pub strix_endpoint: String,
}

impl fmt::Debug for SecretBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBundle")
            .field("api_key", &"<redacted>")
            .field("minerva_endpoint", &self.minerva_endpoint)
            .field("strix_endpoint", &self.strix_endpoint)
            .finish()
    }
}

/// Resolves a [`SecretBundle`] from a secret store
#[derive(Clone)]
pub struct SecretResolver {
    store: SharedSecretStore,
}

impl SecretResolver {
    pub fn new(store: SharedSecretStore) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, locator: &str) -> Result<SecretBundle, SecretError> {
        let arn = SecretArn::parse(locator)?;

        let raw = self
            .store
            .get_secret_string(&arn)
            .await
            .map_err(|e| SecretError::Retrieval {
                arn: locator.to_string(),
                reason: e,
            })?
            .ok_or_else(|| SecretError::Retrieval {
                arn: locator.to_string(),
                reason: "secret has no string value".to_string(),
            })?;

        let bundle: SecretBundle =
            serde_json::from_str(&raw).map_err(|e| SecretError::Parse {
                arn: locator.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Resolved secret bundle from {}", arn);
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SecretStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const ARN: &str = "arn:aws:secretsmanager:us-east-1:1234567890:secret:minerva";

    struct MockStore {
        response: Result<Option<String>, String>,
        calls: AtomicUsize,
    }

    impl MockStore {
        fn new(response: Result<Option<String>, String>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SecretStore for MockStore {
        async fn get_secret_string(&self, arn: &SecretArn) -> Result<Option<String>, String> {
            assert_eq!(arn.region(), "us-east-1");
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_resolve_bundle() {
        let store = MockStore::new(Ok(Some(
            r#"{"minerva_apikey":"X","minerva_endpoint":"https://m","strix_endpoint":"https://s"}"#
                .to_string(),
        )));
        let resolver = SecretResolver::new(store.clone());

        let bundle = resolver.resolve(ARN).await.unwrap();
        assert_eq!(bundle.api_key, "X");
        assert_eq!(bundle.minerva_endpoint, "https://m");
        assert_eq!(bundle.strix_endpoint, "https://s");
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_key_alias() {
        let store = MockStore::new(Ok(Some(
            r#"{"key":"X","minerva_endpoint":"https://m","strix_endpoint":"https://s"}"#
                .to_string(),
        )));
        let bundle = SecretResolver::new(store).resolve(ARN).await.unwrap();
        assert_eq!(bundle.api_key, "X");
    }

    #[tokio::test]
    async fn test_bad_arn_skips_store() {
        let store = MockStore::new(Ok(Some("{}".to_string())));
        let resolver = SecretResolver::new(store.clone());

        let err = resolver.resolve("arn:aws:secretsmanager:us-east-1").await.unwrap_err();
        assert!(matches!(err, SecretError::Format(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure() {
        let store = MockStore::new(Err("AccessDeniedException".to_string()));
        let err = SecretResolver::new(store).resolve(ARN).await.unwrap_err();
        assert!(matches!(err, SecretError::Retrieval { ref reason, .. } if reason.contains("AccessDenied")));
    }

    #[tokio::test]
    async fn test_missing_secret_string() {
        let store = MockStore::new(Ok(None));
        let err = SecretResolver::new(store).resolve(ARN).await.unwrap_err();
        assert!(matches!(err, SecretError::Retrieval { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let store = MockStore::new(Ok(Some("not json".to_string())));
        let err = SecretResolver::new(store).resolve(ARN).await.unwrap_err();
        assert!(matches!(err, SecretError::Parse { .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let bundle = SecretBundle {
            api_key: "super-secret".to_string(),
            minerva_endpoint: "https://m".to_string(),
            strix_endpoint: "https://s".to_string(),
        };
        let printed = format!("{:?}", bundle);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("https://m"));
    }
}
