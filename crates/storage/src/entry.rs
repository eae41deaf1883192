use tokio::time::Instant;

/// Entrada no store: valor + prazo absoluto de expiração.
///
/// `version` muda a cada `store` na chave e se mantém em `update`, o que
/// permite distinguir uma regravação de uma simples mutação.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    pub value: V,
    pub expires_at: Instant,
    pub version: u64,
}

impl<V> Entry<V> {
    pub fn new(value: V, expires_at: Instant, version: u64) -> Self {
        Self {
            value,
            expires_at,
            version,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Uma entrada só é visível enquanto `now < expires_at`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
