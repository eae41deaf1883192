use std::sync::Weak;

use dashmap::DashMap;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::entry::Entry;
use crate::store::SharedState;

/// Background task que purga entradas expiradas a cada `period`.
///
/// A leitura já garante a correção; isto só limita o crescimento de memória
/// por chaves abandonadas que ninguém lê de novo.
pub(crate) async fn run<V>(shared: Weak<SharedState<V>>, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let now = ticker.tick().await;

        let Some(state) = shared.upgrade() else {
            debug!("store descartado, sweeper encerrado");
            return;
        };

        let removed = sweep_expired(&state.data, now);
        trace!(removed, remaining = state.data.len(), "sweep concluído");
    }
}

/// Remove toda entrada com `expires_at <= now`.
///
/// As chaves são coletadas antes da remoção para não segurar o lock de um
/// shard enquanto outro é alterado.
pub(crate) fn sweep_expired<V>(data: &DashMap<String, Entry<V>>, now: Instant) -> usize {
    let expired: Vec<String> = data
        .iter()
        .filter(|entry| entry.is_expired_at(now))
        .map(|entry| entry.key().clone())
        .collect();

    let mut removed = 0;
    for key in expired {
        // Só remove se ainda estiver expirada (pode ter sido regravada no meio)
        if data.remove_if(&key, |_, e| e.is_expired_at(now)).is_some() {
            debug!("entrada expirada removida: {key}");
            removed += 1;
        }
    }
    removed
}
