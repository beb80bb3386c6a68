use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use dinedex_core::domain::common::{DEFAULT_API_BASE_URL, DinedexConfig, RestaurantApiConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "dinedex-api", version, about = "Restaurant directory backend")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub upstream: UpstreamArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct UpstreamArgs {
    #[arg(long = "upstream-base-url", env = "UPSTREAM_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub base_url: String,

    #[arg(long = "upstream-timeout-secs", env = "UPSTREAM_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for DinedexConfig {
    fn from(args: Args) -> Self {
        DinedexConfig {
            restaurant_api: RestaurantApiConfig {
                base_url: args.upstream.base_url,
                request_timeout: args.upstream.timeout_secs.map(Duration::from_secs),
            },
        }
    }
}

impl Args {
    /// Arguments for tests: defaults everywhere except the upstream URL.
    #[cfg(test)]
    pub fn for_upstream(base_url: impl Into<String>) -> Self {
        Args {
            server: ServerArgs {
                host: "127.0.0.1".to_string(),
                port: 0,
                root_path: String::new(),
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
            upstream: UpstreamArgs {
                base_url: base_url.into(),
                timeout_secs: Some(5),
            },
            log: LogArgs {
                filter: "info".to_string(),
                json: false,
            },
        }
    }
}
