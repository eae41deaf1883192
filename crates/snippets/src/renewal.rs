use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use snipstore_common::{ServiceError, SnippetResult};

use crate::repository::SnippetRepository;
use crate::snippet::Deadline;

#[derive(Debug)]
struct RenewalJob {
    name: String,
    /// Versão observada pela leitura que gerou o job.
    version: u64,
    deadline: Deadline,
}

#[derive(Debug, Default)]
struct Counters {
    applied: AtomicU64,
    skipped: AtomicU64,
    dropped: AtomicU64,
}

/// Contadores do worker de renovação.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenewalStats {
    /// Renovações aplicadas a um snippet vivo.
    pub applied: u64,
    /// Snippet expirou ou foi regravado entre a leitura e a renovação.
    pub skipped: u64,
    /// Descartadas por fila cheia.
    pub dropped: u64,
}

/// Fila limitada de renovações disparadas por leituras.
///
/// A leitura só enfileira e segue; um único worker aplica os jobs no
/// repositório. O worker termina quando o último `Renewer` é descartado,
/// depois de drenar o que já estava na fila.
#[derive(Clone)]
pub struct Renewer {
    tx: mpsc::Sender<RenewalJob>,
    counters: Arc<Counters>,
}

impl Renewer {
    pub fn spawn(repo: SnippetRepository, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let counters = Arc::new(Counters::default());

        tokio::spawn(run_worker(repo, rx, counters.clone()));

        Self { tx, counters }
    }

    /// Enfileira sem bloquear. Fila cheia descarta e conta; fila fechada é erro.
    pub fn schedule(&self, name: &str, version: u64, deadline: Deadline) -> SnippetResult<()> {
        let job = RenewalJob {
            name: name.to_string(),
            version,
            deadline,
        };

        match self.tx.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(job)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("fila de renovação cheia, renovação de '{}' descartada", job.name);
                Ok(())
            }
            Err(TrySendError::Closed(_)) => Err(ServiceError::RenewalQueueClosed),
        }
    }

    pub fn stats(&self) -> RenewalStats {
        RenewalStats {
            applied: self.counters.applied.load(Ordering::Relaxed),
            skipped: self.counters.skipped.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}

async fn run_worker(
    repo: SnippetRepository,
    mut rx: mpsc::Receiver<RenewalJob>,
    counters: Arc<Counters>,
) {
    while let Some(job) = rx.recv().await {
        if repo.renew(&job.name, job.version, job.deadline) {
            counters.applied.fetch_add(1, Ordering::Relaxed);
            debug!("snippet renovado: {}", job.name);
        } else {
            counters.skipped.fetch_add(1, Ordering::Relaxed);
            debug!("snippet expirou ou foi regravado antes da renovação: {}", job.name);
        }
    }
    debug!("worker de renovação encerrado");
}
