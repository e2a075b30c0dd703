// src/app.rs
use anyhow::Result;
use tracing::error;

use crate::catalog::{self, PoolTarget};
use crate::codegen;
use crate::config::Config;
use crate::extract::{self, POOL_ID_KEY};
use crate::page;
use crate::report::{DiscoveryReport, PoolIdRecord};
use crate::search;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub pools: Vec<PoolTarget>,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_depth: usize,
    pub output_path: String,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            pools: catalog::benchmark_pools(),
            user_agent: page::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            max_depth: search::DEFAULT_MAX_DEPTH,
            output_path: "pool_ids_found.json".to_string(),
        }
    }
}

impl AppCfg {
    pub fn from_config(cfg: Config) -> Self {
        let mut app_cfg = Self::default();
        if let Some(http) = cfg.http {
            if let Some(user_agent) = http.user_agent {
                app_cfg.user_agent = user_agent;
            }
            if let Some(timeout_secs) = http.timeout_secs {
                app_cfg.timeout_secs = timeout_secs;
            }
        }
        if let Some(output) = cfg.output {
            if let Some(json_path) = output.json_path {
                app_cfg.output_path = json_path;
            }
        }
        if !cfg.pools.is_empty() {
            app_cfg.pools = cfg.pools;
        }
        app_cfg
    }
}

/// Resolve every target pool to its numeric id and emit the report:
/// console summary, Go snippet for the benchmark harness, JSON file.
pub async fn run(cfg: AppCfg) -> Result<()> {
    println!("🔍 GeckoTerminal Pool ID Finder");
    println!("{}", "=".repeat(60));

    let client = page::build_client(&cfg.user_agent, cfg.timeout_secs)?;
    let mut report = DiscoveryReport::new();

    for pool in &cfg.pools {
        println!("\n📍 {}", pool.name);
        println!("   Network: {}", pool.network);
        println!("   Address: {}", pool.address);

        if let Some(known) = &pool.known_pool_id {
            println!("   ✅ Known pool_id: {}", known);
            report.push(PoolIdRecord::new(pool, Some(known.clone())));
            continue;
        }

        println!("[+] Fetching {}", page::pool_page_url(&pool.network, &pool.address));
        let pool_id = match page::fetch_pool_page(&client, &pool.network, &pool.address).await {
            Ok(Some(html)) => extract::extract_pool_id(&html, POOL_ID_KEY, cfg.max_depth),
            Ok(None) => None,
            Err(e) => {
                error!(pool = %pool.name, "fetch failed: {:#}", e);
                println!("   ❌ Error: {:#}", e);
                None
            }
        };

        match &pool_id {
            Some(id) => println!("   ✅ Found pool_id: {}", id),
            None => println!("   ❌ pool_id not found"),
        }
        report.push(PoolIdRecord::new(pool, pool_id));
    }

    report.print_summary();

    println!("\n{}", "=".repeat(60));
    println!("💾 Go code for the benchmark:");
    println!("{}", "=".repeat(60));
    println!("{}", codegen::render_benchmark_pools(&report.records));

    report.save(&cfg.output_path)?;
    println!("✅ Results saved to {}", cfg.output_path);
    println!("\n🎯 Found: {}/{} pool ids", report.found_count(), report.total());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_default_cfg_uses_benchmark_pools() {
        let cfg = AppCfg::default();
        assert_eq!(cfg.pools.len(), 5);
        assert_eq!(cfg.max_depth, 10);
        assert_eq!(cfg.output_path, "pool_ids_found.json");
    }

    #[test]
    fn test_from_config_overrides_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [http]
            timeout_secs = 3

            [output]
            json_path = "elsewhere.json"

            [[pools]]
            name = "only one"
            network = "eth"
            chain = "ethereum"
            address = "0xabc"
            "#,
        )
        .unwrap();
        let app_cfg = AppCfg::from_config(cfg);
        assert_eq!(app_cfg.timeout_secs, 3);
        assert_eq!(app_cfg.output_path, "elsewhere.json");
        assert_eq!(app_cfg.pools.len(), 1);
        // untouched sections keep their defaults
        assert_eq!(app_cfg.user_agent, page::DEFAULT_USER_AGENT);
    }
}
