use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::time::{Duration, Instant};

use snipstore_common::SWEEP_INTERVAL;

use crate::entry::Entry;
use crate::sweeper;

/// Estado compartilhado entre os handles do store e o sweeper.
pub(crate) struct SharedState<V> {
    pub(crate) data: DashMap<String, Entry<V>>,
    next_version: AtomicU64,
}

/// Mapa concorrente com prazo de expiração por entrada.
///
/// Leituras checam o prazo a cada chamada (expiração preguiçosa); um
/// sweeper em background remove fisicamente o que já expirou. Chaves
/// diferentes nunca se bloqueiam além do lock do shard do `DashMap`.
pub struct ExpiringStore<V> {
    shared: Arc<SharedState<V>>,
}

impl<V> Clone for ExpiringStore<V> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<V> ExpiringStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_sweep_interval(SWEEP_INTERVAL)
    }

    /// Cria o store e dispara o sweeper. Precisa de um runtime tokio ativo.
    pub fn with_sweep_interval(interval: Duration) -> Self {
        let store = ExpiringStore {
            shared: Arc::new(SharedState {
                data: DashMap::new(),
                next_version: AtomicU64::new(1),
            }),
        };

        // O sweeper guarda só um Weak: termina quando o último handle cai
        let shared = Arc::downgrade(&store.shared);
        tokio::spawn(async move {
            sweeper::run(shared, interval).await;
        });

        store
    }

    /// Insere ou substitui. Last-write-wins, sem compare-and-swap; cada
    /// chamada recebe uma `version` nova.
    pub fn store(&self, key: impl Into<String>, expires_at: Instant, value: V) {
        let version = self.shared.next_version.fetch_add(1, Ordering::Relaxed);
        self.shared
            .data
            .insert(key.into(), Entry::new(value, expires_at, version));
    }

    /// Retorna o valor apenas se a entrada existe e `expires_at > now`.
    ///
    /// Não remove a entrada expirada: isso fica a cargo do sweeper, de modo
    /// que leituras nunca tomam o lock de escrita do shard.
    pub fn load(&self, key: &str) -> Option<V> {
        self.load_entry(key).map(|entry| entry.value)
    }

    /// Como `load`, mas devolve também prazo e versão observados.
    pub fn load_entry(&self, key: &str) -> Option<Entry<V>> {
        let entry = self.shared.data.get(key)?;
        if entry.is_expired() {
            return None;
        }
        Some(entry.clone())
    }

    pub fn delete(&self, key: &str) {
        self.shared.data.remove(key);
    }

    /// Read-modify-write atômico sobre uma entrada viva.
    ///
    /// `f` roda com o lock de escrita do shard da chave, então atualizações
    /// concorrentes na mesma chave são serializadas. Se a entrada já expirou
    /// ela é removida, `f` não é chamada e o retorno é `None`; senão o
    /// retorno é o resultado de `f`.
    pub fn update<F, R>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut Entry<V>) -> R,
    {
        let mut entry = self.shared.data.get_mut(key)?;
        if entry.is_expired() {
            drop(entry);
            self.shared.data.remove_if(key, |_, e| e.is_expired());
            return None;
        }
        Some(f(entry.value_mut()))
    }

    /// Executa uma passada de limpeza imediata. Retorna quantas entradas saíram.
    pub fn sweep(&self) -> usize {
        sweeper::sweep_expired(&self.shared.data, Instant::now())
    }

    /// Número de entradas físicas, incluindo expiradas ainda não varridas.
    pub fn len(&self) -> usize {
        self.shared.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.data.is_empty()
    }
}

impl<V> Default for ExpiringStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
