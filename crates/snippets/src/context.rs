use tokio_util::sync::CancellationToken;

use snipstore_common::{ServiceError, SnippetResult};

/// Contexto de uma requisição: id para tracing e sinal de cancelamento.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            cancel: CancellationToken::new(),
        }
    }

    /// Contexto sem requisição de origem (testes, tarefas internas).
    pub fn background() -> Self {
        Self::new("background")
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Aborta antes de tocar no store se o chamador já desistiu.
    pub fn ensure_active(&self) -> SnippetResult<()> {
        if self.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_context_is_rejected() {
        let ctx = RequestContext::new("req-1");
        assert!(ctx.ensure_active().is_ok());

        ctx.cancellation_token().cancel();
        assert!(matches!(ctx.ensure_active(), Err(ServiceError::Cancelled)));
    }

    #[test]
    fn clones_share_cancellation() {
        let ctx = RequestContext::background();
        let other = ctx.clone();
        other.cancellation_token().cancel();
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.request_id(), "background");
    }
}
