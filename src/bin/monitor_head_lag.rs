//! Measure how far behind the chain head the cable's indexer runs.
//!
//! Subscribes to SwapChannel for every pool with a known numeric id and
//! compares our receive time against each swap's on-chain block
//! timestamp. Stats are printed every 30s and once more on Ctrl-C.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;

use poolprobe::cable::{
    parse_message, CableError, CableSession, ChannelIdentifier, SwapEvent, CABLE_URL, ORIGIN,
};
use poolprobe::catalog::{benchmark_pools, PoolTarget};
use poolprobe::lag::{format_age, head_lag_ms, short_hash, HeadLagStats};
use poolprobe::page::DEFAULT_USER_AGENT;
use poolprobe::report::DiscoveryReport;

const REPORT_PATH: &str = "pool_ids_found.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("🦎 GeckoTerminal Head Lag Monitor");
    println!("{}", "=".repeat(60));
    println!("Measuring indexation latency for the GeckoTerminal cable");
    println!();

    // Prefer ids from an earlier discovery run, fall back to the one
    // id in the built-in catalog.
    let pools: Vec<PoolTarget> = match DiscoveryReport::load(REPORT_PATH) {
        Ok(report) => {
            println!("📂 Using pool ids from {}", REPORT_PATH);
            report
                .records
                .into_iter()
                .filter(|r| r.found)
                .map(|r| PoolTarget {
                    name: r.name,
                    network: r.network,
                    chain: r.chain,
                    address: r.address,
                    known_pool_id: r.pool_id,
                })
                .collect()
        }
        Err(_) => benchmark_pools()
            .into_iter()
            .filter(|p| p.known_pool_id.is_some())
            .collect(),
    };
    if pools.is_empty() {
        println!("❌ No pools with a known pool_id; run the finder first");
        return Ok(());
    }

    let mut stats: HashMap<String, HeadLagStats> = pools
        .iter()
        .map(|p| (p.chain.clone(), HeadLagStats::new()))
        .collect();

    let mut session = CableSession::connect(CABLE_URL, ORIGIN, DEFAULT_USER_AGENT).await?;
    println!("✅ Connected to {}", CABLE_URL);

    match session.next_text(Duration::from_secs(5)).await {
        Ok(frame) if frame.contains("welcome") => println!("📨 Welcome message received"),
        _ => println!("⚠️  No welcome frame, subscribing anyway"),
    }

    for pool in &pools {
        let pool_id = pool.known_pool_id.as_deref().unwrap_or_default();
        println!(
            "📡 Subscribing to SwapChannel for {} (pool_id={})...",
            pool.name, pool_id
        );
        session
            .subscribe(&ChannelIdentifier::swap_channel(pool_id))
            .await?;
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(30));
    ticker.tick().await; // consume the immediate first tick

    loop {
        let frame = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nInterrupt received, closing...");
                break;
            }
            _ = ticker.tick() => {
                print_stats(&pools, &stats);
                continue;
            }
            frame = session.next_text(Duration::from_secs(60)) => frame,
        };

        match frame {
            Ok(text) => handle_frame(&mut session, &pools, &mut stats, &text).await?,
            Err(CableError::Timeout(_)) => continue,
            Err(e) => {
                println!("Read error: {}", e);
                break;
            }
        }
    }

    print_stats(&pools, &stats);
    session.close().await.ok();
    Ok(())
}

async fn handle_frame(
    session: &mut CableSession,
    pools: &[PoolTarget],
    stats: &mut HashMap<String, HeadLagStats>,
    raw: &str,
) -> Result<(), CableError> {
    let Some(msg) = parse_message(raw) else {
        return Ok(());
    };

    match msg.kind.as_deref() {
        Some("welcome") => println!("📨 Welcome message received"),
        Some("ping") => session.pong().await?,
        Some("confirm_subscription") => println!(
            "✅ Subscription confirmed: {}",
            msg.identifier.as_deref().unwrap_or("")
        ),
        Some("reject_subscription") => println!(
            "❌ Subscription rejected: {}",
            msg.identifier.as_deref().unwrap_or("")
        ),
        _ => {
            let (Some(identifier), Some(payload)) = (msg.identifier.as_deref(), msg.message)
            else {
                return Ok(());
            };
            let Ok(event) = serde_json::from_value::<SwapEvent>(payload) else {
                return Ok(());
            };
            if event.kind != "newSwap" {
                return Ok(());
            }
            let Ok(channel) = serde_json::from_str::<ChannelIdentifier>(identifier) else {
                return Ok(());
            };
            let Some(pool_id) = channel.pool_id else {
                return Ok(());
            };
            let Some(pool) = pools
                .iter()
                .find(|p| p.known_pool_id.as_deref() == Some(pool_id.as_str()))
            else {
                return Ok(());
            };

            let received = Utc::now();
            let lag_ms = head_lag_ms(received, event.data.block_timestamp);
            if let Some(entry) = stats.get_mut(&pool.chain) {
                entry.record(lag_ms, received);
            }

            let volume: String = event.data.from_token_total_in_usd.chars().take(7).collect();
            println!(
                "[{}][GECKO][{}] Lag: {:.2}s ({}ms) | Tx: {} | Vol: ${}",
                received.format("%H:%M:%S"),
                pool.chain,
                lag_ms as f64 / 1000.0,
                lag_ms,
                short_hash(&event.data.tx_hash),
                volume
            );
        }
    }
    Ok(())
}

fn print_stats(pools: &[PoolTarget], stats: &HashMap<String, HeadLagStats>) {
    println!();
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║         GECKOTERMINAL HEAD LAG STATISTICS                     ║");
    println!("╠═══════════════════════════════════════════════════════════════╣");
    for pool in pools {
        let Some(s) = stats.get(&pool.chain) else {
            continue;
        };
        if s.count == 0 {
            println!("║ {:<12} │ No swaps received yet                          ║", pool.chain);
            continue;
        }
        let age_secs = s
            .last_swap
            .map(|t| (Utc::now() - t).num_seconds())
            .unwrap_or(0);
        println!(
            "║ {:<12} │ Swaps: {:5} │ Avg: {:4}ms │ Min: {:4}ms │ Max: {:5}ms ║",
            pool.chain,
            s.count,
            s.avg_ms(),
            s.min_ms,
            s.max_ms
        );
        println!(
            "║              │ Last: {:4}ms ({} ago)                          ║",
            s.last_lag_ms,
            format_age(age_secs)
        );
    }
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
}
