use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::{Duration, Instant};

/// Snippet como fica no store e como volta para o cliente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub url: String,
    pub name: String,
    pub expires_at: DateTime<Utc>,
    pub snippet: String,
    /// Ausente até o primeiro like.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
}

/// Corpo de criação. `expires_in` (segundos) só existe na entrada.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewSnippet {
    pub name: String,
    #[serde(default)]
    pub snippet: String,
    pub expires_in: u64,
}

/// Prazo resolvido nas duas escalas: monotônica para o store, UTC para a resposta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadline {
    pub at: Instant,
    pub utc: DateTime<Utc>,
}

impl Deadline {
    /// `None` se `ttl` não cabe em nenhuma das duas escalas.
    pub fn after(ttl: Duration) -> Option<Self> {
        let at = Instant::now().checked_add(ttl)?;
        let delta = chrono::Duration::from_std(ttl).ok()?;
        let utc = Utc::now().checked_add_signed(delta)?;
        Some(Self { at, utc })
    }
}
