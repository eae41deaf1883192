/// Erros da camada de serviço de snippets.
///
/// `NotFound` é o único erro de domínio; os demais são internos e chegam
/// ao transporte como falha genérica.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("snippet não encontrado")]
    NotFound,
    #[error("requisição cancelada")]
    Cancelled,
    #[error("prazo de expiração fora do intervalo: {0}s")]
    DeadlineOutOfRange(u64),
    #[error("fila de renovação encerrada")]
    RenewalQueueClosed,
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound)
    }
}

/// Erros de validação de entrada na borda HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("nome do snippet vazio")]
    EmptyName,
    #[error("expires_in excede o máximo de {max}s: {got}s")]
    ExpiresInTooLarge { got: u64, max: u64 },
}

/// Erro top-level do snipstore.
#[derive(Debug, thiserror::Error)]
pub enum SnipError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias.
pub type SnippetResult<T> = Result<T, ServiceError>;
