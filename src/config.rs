use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

use crate::utils::RetryConfig;

const DEFAULT_HTTP_BIND: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FILTER: &str = "info,theme_designer=debug";

#[derive(Parser, Debug, Clone)]
#[command(name = "theme-designer", about = "Event-sourced theme designer service", version)]
pub struct CliArgs {
    #[arg(long, env = "THEME_DESIGNER_HTTP_BIND", default_value = DEFAULT_HTTP_BIND)]
    pub http_bind: SocketAddr,

    /// Attempts per commit before a storage failure is reported
    #[arg(long, env = "THEME_DESIGNER_COMMIT_RETRIES", default_value_t = 3)]
    pub commit_retries: u32,

    #[arg(long, env = "THEME_DESIGNER_RETRY_DELAY_MS", default_value_t = 50)]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_bind: SocketAddr,
    pub retry: RetryConfig,
}

impl AppConfig {
    pub fn from_args(args: CliArgs) -> anyhow::Result<Self> {
        if args.commit_retries == 0 {
            anyhow::bail!("--commit-retries must be at least 1");
        }

        let initial_delay = Duration::from_millis(args.retry_delay_ms);
        Ok(Self {
            http_bind: args.http_bind,
            retry: RetryConfig {
                max_attempts: args.commit_retries,
                initial_delay,
                max_delay: initial_delay.saturating_mul(20),
                ..RetryConfig::default()
            },
        })
    }
}

/// `RUST_LOG` wins over this default
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}
