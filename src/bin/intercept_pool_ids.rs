//! Extract numeric pool ids by intercepting the browser's own outbound
//! WebSocket subscription frames.
//!
//! A headless Chromium loads each pool page; a JS shim wraps
//! `WebSocket.send` and records every outbound frame into a page global,
//! which we read back and feed through the subscribe-frame extractor.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};

use poolprobe::catalog::benchmark_pools;
use poolprobe::codegen;
use poolprobe::extract::{pool_id_from_frames, POOL_ID_KEY};
use poolprobe::page::pool_page_url;
use poolprobe::report::{DiscoveryReport, PoolIdRecord};
use poolprobe::search::DEFAULT_MAX_DEPTH;

const WS_CAPTURE_SHIM: &str = r#"
(function() {
    if (window.__wsSentFrames) { return true; }
    window.__wsSentFrames = [];
    const NativeWebSocket = window.WebSocket;
    window.WebSocket = function(...args) {
        const socket = new NativeWebSocket(...args);
        const nativeSend = socket.send.bind(socket);
        socket.send = function(payload) {
            if (typeof payload === 'string') {
                window.__wsSentFrames.push(payload);
            }
            return nativeSend(payload);
        };
        return socket;
    };
    window.WebSocket.prototype = NativeWebSocket.prototype;
    return true;
})();
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("🦎 GeckoTerminal Pool ID Extractor (headless Chromium)");
    println!("{}", "=".repeat(70));
    println!("Intercepting WebSocket frames to extract numeric pool ids...");
    println!();

    let launch_options = LaunchOptions::default_builder()
        .headless(true)
        .window_size(Some((1920, 1080)))
        .build()?;
    let browser = Browser::new(launch_options)?;
    let tab = browser.new_tab()?;

    let mut report = DiscoveryReport::new();

    for pool in benchmark_pools() {
        let url = pool_page_url(&pool.network, &pool.address);
        println!("\n📍 {}", pool.name);
        println!("   URL: {}", url);

        let pool_id = match capture_pool_id(&tab, &url) {
            Ok(found) => found,
            Err(e) => {
                println!("   ❌ Error: {:#}", e);
                None
            }
        };

        match &pool_id {
            Some(id) => println!("   ✅ Found pool_id: {}", id),
            None => println!("   ⚠️  pool_id not found in WebSocket frames"),
        }

        report.push(PoolIdRecord::new(&pool, pool_id));
        thread::sleep(Duration::from_secs(2));
    }

    report.print_summary();

    println!("\n{}", "=".repeat(70));
    println!("💾 Go code for head_lag_monitor.go:");
    println!("{}", "=".repeat(70));
    println!();
    println!("{}", codegen::render_monitored_pools(&report.records));

    report.save("pool_ids_found.json")?;
    println!("\n✅ Results saved to pool_ids_found.json");
    println!("\n🎯 Found: {}/{} pool ids", report.found_count(), report.total());
    Ok(())
}

fn capture_pool_id(tab: &Tab, url: &str) -> Result<Option<String>> {
    tab.navigate_to(url).context("navigate to pool page")?;

    // Install the send() wrapper before the app bundle opens its socket.
    // Frames on a socket created earlier than the shim are lost.
    tab.evaluate(WS_CAPTURE_SHIM, false)
        .context("install capture shim")?;

    tab.wait_until_navigated().context("wait for page load")?;

    // Let the cable connect and send its subscriptions
    thread::sleep(Duration::from_secs(5));

    let captured = tab
        .evaluate("JSON.stringify(window.__wsSentFrames || [])", false)
        .context("read captured frames")?;
    let frames: Vec<String> = captured
        .value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default();

    println!("   📦 Captured {} outbound frames", frames.len());
    Ok(pool_id_from_frames(
        frames.iter().map(String::as_str),
        POOL_ID_KEY,
        DEFAULT_MAX_DEPTH,
    ))
}
