use tokio::time::Duration;
use tracing::debug;

use snipstore_common::{
    DEFAULT_PORT, RENEWAL_QUEUE_CAPACITY, RENEWAL_WINDOW, SWEEP_INTERVAL, ServiceError,
    SnippetResult,
};

use crate::context::RequestContext;
use crate::renewal::{RenewalStats, Renewer};
use crate::repository::{self, SnippetRepository};
use crate::snippet::{Deadline, NewSnippet, Snippet};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Endereço público usado para montar a URL de cada snippet.
    pub base_url: String,
    /// Quanto cada leitura ou like estende a vida do snippet.
    pub renewal_window: Duration,
    pub sweep_interval: Duration,
    pub renewal_queue: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://localhost:{DEFAULT_PORT}"),
            renewal_window: RENEWAL_WINDOW,
            sweep_interval: SWEEP_INTERVAL,
            renewal_queue: RENEWAL_QUEUE_CAPACITY,
        }
    }
}

/// Regras de negócio dos snippets: criação, leitura e like com expiração
/// deslizante.
#[derive(Clone)]
pub struct SnippetService {
    repo: SnippetRepository,
    renewer: Renewer,
    base_url: String,
    renewal_window: Duration,
}

impl SnippetService {
    /// Sobe o sweeper do store e o worker de renovação; exige runtime tokio.
    pub fn new(config: ServiceConfig) -> Self {
        let repo = SnippetRepository::new(config.sweep_interval);
        let renewer = Renewer::spawn(repo.clone(), config.renewal_queue);

        Self {
            repo,
            renewer,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            renewal_window: config.renewal_window,
        }
    }

    /// Grava (ou sobrescreve) o snippet com prazo `now + expires_in`.
    pub fn create(&self, ctx: &RequestContext, new: NewSnippet) -> SnippetResult<Snippet> {
        ctx.ensure_active()?;

        let deadline = Deadline::after(Duration::from_secs(new.expires_in))
            .ok_or(ServiceError::DeadlineOutOfRange(new.expires_in))?;

        let snippet = Snippet {
            url: self.url_for(&new.name),
            name: new.name,
            expires_at: deadline.utc,
            snippet: new.snippet,
            likes: None,
        };
        self.repo.save(snippet.clone(), deadline.at);

        debug!(request_id = ctx.request_id(), "snippet criado: {}", snippet.name);
        Ok(snippet)
    }

    /// Lê o snippet e agenda a renovação do prazo sem esperar por ela.
    ///
    /// Devolve o valor observado na leitura (com o `expires_at` anterior);
    /// a renovação só vale para essa mesma gravação do snippet.
    pub fn get(&self, ctx: &RequestContext, name: &str) -> SnippetResult<Snippet> {
        ctx.ensure_active()?;

        let entry = self.repo.find_entry(name).ok_or(ServiceError::NotFound)?;
        self.renewer
            .schedule(name, entry.version, self.renewal_deadline()?)?;

        Ok(entry.value)
    }

    /// Incrementa `likes` e redefine o prazo para `now + janela` numa única
    /// atualização atômica.
    pub fn like(&self, ctx: &RequestContext, name: &str) -> SnippetResult<Snippet> {
        ctx.ensure_active()?;

        let deadline = self.renewal_deadline()?;
        let snippet = self
            .repo
            .modify(name, |entry| {
                *entry.value.likes.get_or_insert(0) += 1;
                repository::reset(entry, deadline);
                entry.value.clone()
            })
            .ok_or(ServiceError::NotFound)?;

        debug!(
            request_id = ctx.request_id(),
            likes = snippet.likes.unwrap_or(0),
            "like em {}",
            snippet.name
        );
        Ok(snippet)
    }

    pub fn repository(&self) -> &SnippetRepository {
        &self.repo
    }

    pub fn renewal_stats(&self) -> RenewalStats {
        self.renewer.stats()
    }

    fn renewal_deadline(&self) -> SnippetResult<Deadline> {
        Deadline::after(self.renewal_window)
            .ok_or(ServiceError::DeadlineOutOfRange(self.renewal_window.as_secs()))
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/snippets/{}", self.base_url, name)
    }
}
