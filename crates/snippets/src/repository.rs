use tokio::time::{Duration, Instant};

use snipstore_storage::{Entry, ExpiringStore};

use crate::snippet::{Deadline, Snippet};

/// Coleção de snippets indexada por nome.
#[derive(Clone)]
pub struct SnippetRepository {
    snippets: ExpiringStore<Snippet>,
}

impl SnippetRepository {
    pub fn new(sweep_interval: Duration) -> Self {
        Self {
            snippets: ExpiringStore::with_sweep_interval(sweep_interval),
        }
    }

    pub fn save(&self, snippet: Snippet, expires_at: Instant) {
        self.snippets.store(snippet.name.clone(), expires_at, snippet);
    }

    pub fn find(&self, name: &str) -> Option<Snippet> {
        self.snippets.load(name)
    }

    /// Snippet vivo junto com a versão gravada no store.
    pub fn find_entry(&self, name: &str) -> Option<Entry<Snippet>> {
        self.snippets.load_entry(name)
    }

    /// Mutação atômica de um snippet vivo (ver `ExpiringStore::update`).
    pub fn modify<F, R>(&self, name: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut Entry<Snippet>) -> R,
    {
        self.snippets.update(name, f)
    }

    /// Redefine o prazo para `deadline` se o snippet ainda estiver vivo e
    /// ainda for a gravação `version`. Retorna se aplicou.
    pub fn renew(&self, name: &str, version: u64, deadline: Deadline) -> bool {
        self.modify(name, |entry| {
            if entry.version != version {
                return false;
            }
            reset(entry, deadline);
            true
        })
        .unwrap_or(false)
    }

    /// Entradas físicas, incluindo as expiradas ainda não varridas.
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

/// Troca o prazo monotônico e o UTC juntos, mesmo que encurte.
pub(crate) fn reset(entry: &mut Entry<Snippet>, deadline: Deadline) {
    entry.expires_at = deadline.at;
    entry.value.expires_at = deadline.utc;
}
