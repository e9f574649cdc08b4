//! Search inspector - links IP, username and domain attributes to a Minerva
//! search over the two hours preceding the alert

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, Instrument};

use minerva_core::{AttrContext, AttrType, Attribute, TaskResult, SOURCE_NAME};
use minerva_secrets::{SecretResolver, SharedSecretStore};

use crate::search::send_search_request;
use crate::{HandlerError, InspectHandler, Invocation};

/// Search inspector configuration
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// ARN of the secret holding the Minerva key and endpoints
    pub secret_arn: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            secret_arn: std::env::var("SECRET_ARN").unwrap_or_default(),
        }
    }
}

impl InspectorConfig {
    pub fn with_secret_arn(mut self, arn: &str) -> Self {
        self.secret_arn = arn.to_string();
        self
    }
}

/// Inspector that annotates attributes with a Strix search link
pub struct SearchInspector {
    config: InspectorConfig,
    resolver: SecretResolver,
}

impl SearchInspector {
    pub fn new(config: InspectorConfig, store: SharedSecretStore) -> Self {
        Self {
            config,
            resolver: SecretResolver::new(store),
        }
    }

    /// Attribute types worth a log search
    fn should_search(attr: &Attribute) -> bool {
        matches!(
            attr.attr_type,
            AttrType::IpAddr | AttrType::UserName | AttrType::DomainName
        )
    }

    async fn run(
        &self,
        ctx: &Invocation,
        attr: &Attribute,
    ) -> Result<Option<TaskResult>, HandlerError> {
        debug!(?attr, "Start handler");

        if !Self::should_search(attr) {
            debug!("Skipping {} attribute", attr.attr_type);
            return Ok(None);
        }

        let secrets = self.resolver.resolve(&self.config.secret_arn).await?;

        let client = Client::new();
        let url = send_search_request(&client, &secrets, attr, ctx.now()).await?;

        let new_attr = Attribute {
            attr_type: AttrType::Url,
            value: url,
            key: format!("Strix search ({}:{})", attr.key, attr.value),
            timestamp: Some(ctx.now()),
            context: vec![AttrContext::AdditionalInfo],
        };

        info!("Linked {} {} to {}", attr.attr_type, attr.value, new_attr.value);

        let result = TaskResult::default().with_attribute(new_attr);
        debug!(?result, "Exit handler");
        Ok(Some(result))
    }
}

#[async_trait]
impl InspectHandler for SearchInspector {
    fn author(&self) -> &str {
        SOURCE_NAME
    }

    async fn inspect(
        &self,
        ctx: &Invocation,
        attr: &Attribute,
    ) -> Result<Option<TaskResult>, HandlerError> {
        self.run(ctx, attr).instrument(ctx.span().clone()).await
    }
}
