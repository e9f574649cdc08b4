//! Report emitter - receives finished reports; nothing is forwarded yet

use async_trait::async_trait;
use tracing::{debug, Instrument};

use minerva_core::{Report, SOURCE_NAME};

use crate::{EmitHandler, HandlerError, Invocation};

/// Emitter registered for finished reports
#[derive(Debug, Clone, Default)]
pub struct ReportEmitter;

impl ReportEmitter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmitHandler for ReportEmitter {
    fn author(&self) -> &str {
        SOURCE_NAME
    }

    async fn emit(&self, ctx: &Invocation, report: &Report) -> Result<(), HandlerError> {
        async {
            debug!(report_id = %report.id, status = ?report.status, "Received report");
            Ok::<(), HandlerError>(())
        }
        .instrument(ctx.span().clone())
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minerva_core::{AttrType, Attribute, ReportStatus};

    #[tokio::test]
    async fn test_emit_always_succeeds() {
        let emitter = ReportEmitter::new();
        let report = Report {
            id: "r-1".to_string(),
            attributes: vec![Attribute::new(AttrType::IpAddr, "src", "1.2.3.4")],
            status: ReportStatus::Published,
            ..Default::default()
        };

        assert!(emitter.emit(&Invocation::new(), &report).await.is_ok());
        assert!(emitter.emit(&Invocation::new(), &Report::default()).await.is_ok());
    }
}
