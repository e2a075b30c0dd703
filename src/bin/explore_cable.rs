//! Probe candidate WebSocket endpoints for the GeckoTerminal cable.
//!
//! For each candidate URL: connect, wait for the welcome frame, send a
//! ping, try an ActionCable subscription for a known pool and listen a
//! while. One dead endpoint never stops the sweep.

use std::time::Duration;

use chrono::Local;
use serde_json::json;

use poolprobe::cable::{CableError, CableSession, ChannelIdentifier, ORIGIN};
use poolprobe::page::DEFAULT_USER_AGENT;

const CANDIDATE_URLS: [&str; 4] = [
    "wss://www.geckoterminal.com/cable",
    "wss://api.geckoterminal.com/cable",
    "wss://cables.geckoterminal.com/cable",
    "wss://www.geckoterminal.com/api/cable",
];

// ETH/USDC Uniswap V3
const PROBE_POOL_ADDRESS: &str = "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640";

fn log(msg: &str) {
    println!("[{}] {}", Local::now().format("%H:%M:%S%.3f"), msg);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    log("🔍 GeckoTerminal WebSocket Explorer");
    log(&"=".repeat(60));

    for url in CANDIDATE_URLS {
        if let Err(e) = explore_endpoint(url).await {
            log(&format!("❌ Error: {}", e));
        }
        log(&"-".repeat(60));
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    log("✅ Exploration finished");
    Ok(())
}

async fn explore_endpoint(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    log(&format!("Trying {}", url));
    let mut session = CableSession::connect(url, ORIGIN, DEFAULT_USER_AGENT).await?;
    log(&format!("✅ Connected to {}", url));

    match session.next_text(Duration::from_secs(5)).await {
        Ok(frame) => log(&format!("Welcome frame: {}", frame)),
        Err(CableError::Timeout(_)) => log("No welcome frame"),
        Err(e) => return Err(e.into()),
    }

    log("Sending ping...");
    session.send_text(json!({"type": "ping"}).to_string()).await?;
    match session.next_text(Duration::from_secs(5)).await {
        Ok(frame) => log(&format!("Ping reply: {}", frame)),
        Err(CableError::Timeout(_)) => log("No ping reply"),
        Err(e) => return Err(e.into()),
    }

    log("Testing ActionCable subscription...");
    session
        .subscribe(&ChannelIdentifier::pool_channel(PROBE_POOL_ADDRESS))
        .await?;

    log("Listening for messages, 30s...");
    for _ in 0..30 {
        match session.next_text(Duration::from_secs(1)).await {
            Ok(frame) => {
                let head: String = frame.chars().take(200).collect();
                log(&format!("Frame: {}...", head));
            }
            Err(CableError::Timeout(_)) => {
                log("Timeout - no more frames");
                break;
            }
            Err(CableError::Closed) => {
                log("Stream closed by server");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    session.close().await.ok();
    Ok(())
}
