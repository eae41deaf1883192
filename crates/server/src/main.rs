use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::time::{Duration, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use snipstore_common::{
    DEFAULT_HOST, DEFAULT_PORT, RENEWAL_QUEUE_CAPACITY, RENEWAL_WINDOW, SHUTDOWN_TIMEOUT,
    SWEEP_INTERVAL,
};
use snipstore_server::{AppState, build_app};
use snipstore_snippets::{ServiceConfig, SnippetService};

#[derive(Parser, Debug)]
#[command(name = "snipstore-server", about = "snipstore — snippets efêmeros em memória")]
struct Args {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Base das URLs devolvidas ao cliente (padrão: http://HOST:PORT)
    #[arg(long, value_name = "URL")]
    public_url: Option<String>,
    /// Janela de renovação aplicada em cada leitura ou like
    #[arg(long, default_value_t = RENEWAL_WINDOW.as_secs())]
    renewal_secs: u64,
    #[arg(long, default_value_t = SWEEP_INTERVAL.as_millis() as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    sweep_interval_ms: u64,
    #[arg(long, default_value_t = RENEWAL_QUEUE_CAPACITY)]
    renewal_queue: usize,
    #[arg(long, default_value_t = SHUTDOWN_TIMEOUT.as_secs())]
    shutdown_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "snipstore_server=info,snipstore_snippets=info,snipstore_storage=info,tower_http=info"
                    .into()
            }),
        )
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);
    let public_url = args
        .public_url
        .clone()
        .unwrap_or_else(|| format!("http://{addr}"));

    info!("snipstore v{}", env!("CARGO_PKG_VERSION"));

    let service = SnippetService::new(ServiceConfig {
        base_url: public_url.clone(),
        renewal_window: Duration::from_secs(args.renewal_secs),
        sweep_interval: Duration::from_millis(args.sweep_interval_ms),
        renewal_queue: args.renewal_queue,
    });
    let state = AppState::new(service);
    let app = build_app(state.clone());

    let listener = TcpListener::bind(&addr).await?;
    info!("snipstore escutando em {addr} (url pública: {public_url})");
    state.set_healthy(true);

    let shutdown = CancellationToken::new();
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown.clone().cancelled_owned());
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => {
            result??;
            warn!("servidor encerrou sem sinal de shutdown");
            return Ok(());
        }
        _ = signal::ctrl_c() => {
            info!("shutdown signal recebido");
        }
    }

    // Health passa a responder 503 enquanto as requisições em curso terminam
    state.set_healthy(false);
    shutdown.cancel();

    let grace = Duration::from_secs(args.shutdown_timeout_secs);
    match timeout(grace, server).await {
        Ok(result) => result??,
        Err(_) => warn!("shutdown excedeu {}s, abandonando conexões pendentes", grace.as_secs()),
    }

    let stats = state.service.renewal_stats();
    info!(
        applied = stats.applied,
        skipped = stats.skipped,
        dropped = stats.dropped,
        "servidor parado"
    );
    Ok(())
}
