#![forbid(unsafe_code)]

mod error;

pub use error::*;

use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
/// Janela deslizante aplicada a cada leitura ou like.
pub const RENEWAL_WINDOW: Duration = Duration::from_secs(30);
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(1);
pub const RENEWAL_QUEUE_CAPACITY: usize = 1024;
pub const MAX_EXPIRES_IN_SECS: u64 = 30 * 24 * 60 * 60; // 30 dias
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);
