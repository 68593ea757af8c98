use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "polarity-serve",
    version,
    about = "HTTP service for signed graph balance analysis"
)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, env = "POLARITY_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(long, env = "POLARITY_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory holding `*.txt` edge-list datasets.
    #[arg(long, env = "POLARITY_DATA_DIR", default_value = "fixtures/graphs")]
    pub data_dir: PathBuf,

    /// Concurrent decompositions (defaults to the available parallelism).
    #[arg(long, env = "POLARITY_WORKERS", value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: Option<u16>,

    /// Per-request analysis timeout in milliseconds.
    #[arg(long, env = "POLARITY_TIMEOUT_MS", default_value_t = 30_000)]
    pub timeout_ms: u64,

    /// Maximum request body size in MiB.
    #[arg(long, env = "POLARITY_BODY_LIMIT_MB", default_value_t = 50)]
    pub body_limit_mb: usize,

    /// Decimal precision used when a request carries no `dp`.
    #[arg(
        long,
        env = "POLARITY_DEFAULT_PRECISION",
        default_value_t = polarity::DEFAULT_DECIMAL_PRECISION,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub default_precision: u32,
}

impl ServeArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(n) => usize::from(n),
            None => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb.saturating_mul(1024 * 1024)
    }
}
