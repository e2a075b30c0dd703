use anyhow::Result;
use clap::Parser;

use poolprobe::app::{self, AppCfg};
use poolprobe::catalog;
use poolprobe::config::Config;

#[derive(Parser, Debug)]
#[command(version, about = "Resolve GeckoTerminal numeric pool ids from pool contract addresses")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Pools to resolve as network:address (comma-separated, overrides config)
    #[arg(long)]
    pools: Option<String>,

    /// Output JSON path
    #[arg(long)]
    output: Option<String>,

    /// User-Agent header for page fetches
    #[arg(long)]
    user_agent: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Maximum depth for the embedded JSON search
    #[arg(long)]
    max_depth: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    // Load base configuration from file if provided
    let base_config = if let Some(config_path) = &args.config {
        Some(Config::from_file(config_path)?)
    } else {
        None
    };

    // Priority: CLI args > Config file > Defaults
    let mut app_cfg = match base_config {
        Some(cfg) => AppCfg::from_config(cfg),
        None => AppCfg::default(),
    };

    if let Some(pools) = args.pools {
        let targets: Vec<_> = pools
            .split(',')
            .filter_map(|entry| catalog::parse_override(entry.trim()))
            .collect();
        if targets.is_empty() {
            return Err(anyhow::anyhow!(
                "--pools expects comma-separated network:address entries"
            ));
        }
        app_cfg.pools = targets;
    }
    if let Some(output) = args.output {
        app_cfg.output_path = output;
    }
    if let Some(user_agent) = args.user_agent {
        app_cfg.user_agent = user_agent;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        app_cfg.timeout_secs = timeout_secs;
    }
    if let Some(max_depth) = args.max_depth {
        app_cfg.max_depth = max_depth;
    }

    app::run(app_cfg).await
}
