//! Smoke-test the canonical cable endpoint: print every frame, answer
//! pings, subscribe to PoolChannel for one pool, run until Ctrl-C.

use std::time::Duration;

use chrono::Local;

use poolprobe::cable::{
    parse_message, CableError, CableSession, ChannelIdentifier, CABLE_URL, ORIGIN,
};
use poolprobe::page::DEFAULT_USER_AGENT;

// ETH/USDC Uniswap V3
const POOL_ADDRESS: &str = "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("🦎 GeckoTerminal WebSocket Client");
    println!("{}", "=".repeat(60));

    let mut session = CableSession::connect(CABLE_URL, ORIGIN, DEFAULT_USER_AGENT).await?;
    println!("✅ Connected to {}", CABLE_URL);

    let mut subscribed = false;
    loop {
        let frame = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nInterrupt received, closing...");
                break;
            }
            frame = session.next_text(Duration::from_secs(30)) => frame,
        };

        match frame {
            Ok(text) => {
                println!("[{}] Frame: {}", Local::now().format("%H:%M:%S"), text);
                let Some(msg) = parse_message(&text) else {
                    continue;
                };
                match msg.kind.as_deref() {
                    Some("welcome") => {
                        println!("📨 Welcome message received");
                        if !subscribed {
                            println!("📡 Subscribing to PoolChannel for {}...", POOL_ADDRESS);
                            session
                                .subscribe(&ChannelIdentifier::pool_channel(POOL_ADDRESS))
                                .await?;
                            subscribed = true;
                            println!("✅ Subscribe command sent");
                        }
                    }
                    Some("ping") => session.pong().await?,
                    Some("confirm_subscription") => println!(
                        "✅ Subscription confirmed: {}",
                        msg.identifier.as_deref().unwrap_or("")
                    ),
                    Some("reject_subscription") => println!(
                        "❌ Subscription rejected: {}",
                        msg.identifier.as_deref().unwrap_or("")
                    ),
                    _ => {}
                }
            }
            Err(CableError::Timeout(_)) => continue,
            Err(e) => {
                println!("Read error: {}", e);
                break;
            }
        }
    }

    session.close().await.ok();
    println!("Connection closed");
    Ok(())
}
