//! Host-facing handler contracts

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info_span, Span};
use uuid::Uuid;

use minerva_core::{Attribute, Report, TaskResult};
use minerva_secrets::SecretError;

/// Errors surfaced to the host as invocation failures
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error("Fail to send request to {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("Fail to decode search response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Per-call context handed to a handler by the host
///
/// Carries the invocation time and the span handlers log under, so no
/// handler reaches for a global clock or logger.
#[derive(Debug, Clone)]
pub struct Invocation {
    id: String,
    now: DateTime<Utc>,
    span: Span,
}

impl Invocation {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Invocation pinned to a given time
    pub fn at(now: DateTime<Utc>) -> Self {
        let id = Uuid::new_v4().to_string();
        let span = info_span!("invocation", id = %id);
        Self { id, now, span }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for Invocation {
    fn default() -> Self {
        Self::new()
    }
}

/// Callback invoked once per attribute under inspection
#[async_trait]
pub trait InspectHandler: Send + Sync {
    /// Name the handler's findings are attributed to
    fn author(&self) -> &str;

    /// Inspect one attribute; `Ok(None)` means nothing to contribute
    async fn inspect(
        &self,
        ctx: &Invocation,
        attr: &Attribute,
    ) -> Result<Option<TaskResult>, HandlerError>;
}

/// Callback invoked once per finished report
#[async_trait]
pub trait EmitHandler: Send + Sync {
    fn author(&self) -> &str;

    async fn emit(&self, ctx: &Invocation, report: &Report) -> Result<(), HandlerError>;
}
