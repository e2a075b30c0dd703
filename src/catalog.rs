//! Benchmark pool targets.

use serde::{Deserialize, Serialize};

/// One pool whose numeric cable identifier we want.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolTarget {
    pub name: String,
    /// Network path segment on the site (eth, solana, base, ...).
    pub network: String,
    /// Chain label used by the downstream monitor's metrics.
    pub chain: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_pool_id: Option<String>,
}

/// The pools of the aggregator benchmark. The ETH/USDC id was read off
/// the browser's network tab by hand and is kept as a shortcut.
pub fn benchmark_pools() -> Vec<PoolTarget> {
    vec![
        PoolTarget {
            name: "ETH/USDC Uniswap V3".to_string(),
            network: "eth".to_string(),
            chain: "ethereum".to_string(),
            address: "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640".to_string(),
            known_pool_id: Some("147971598".to_string()),
        },
        PoolTarget {
            name: "SOL/USDC Raydium".to_string(),
            network: "solana".to_string(),
            chain: "solana".to_string(),
            address: "7qbRF6YsyGuLUVs6Y1q64bdVrfe4ZcUUz1JRdoVNUJnm".to_string(),
            known_pool_id: None,
        },
        PoolTarget {
            name: "WETH/USDC Base".to_string(),
            network: "base".to_string(),
            chain: "base".to_string(),
            address: "0x4c36388be6f416a29c8d8eee81c771ce6be14b18".to_string(),
            known_pool_id: None,
        },
        PoolTarget {
            name: "WBNB/BUSD PancakeSwap".to_string(),
            network: "bsc".to_string(),
            chain: "bnb".to_string(),
            address: "0x58f876857a02d6762e0101bb5c46a8c1ed44dc16".to_string(),
            known_pool_id: None,
        },
        PoolTarget {
            name: "WETH/USDC Arbitrum".to_string(),
            network: "arbitrum".to_string(),
            chain: "arbitrum".to_string(),
            address: "0xc6962004f452be9203591991d15f6b388e09e8d0".to_string(),
            known_pool_id: None,
        },
    ]
}

/// Parse a `network:address` override from the command line. The chain
/// label defaults to the network segment.
pub fn parse_override(entry: &str) -> Option<PoolTarget> {
    let (network, address) = entry.split_once(':')?;
    let network = network.trim();
    let address = address.trim();
    if network.is_empty() || address.is_empty() {
        return None;
    }
    Some(PoolTarget {
        name: format!("{}/{}", network, address),
        network: network.to_string(),
        chain: network.to_string(),
        address: address.to_string(),
        known_pool_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_has_one_known_id() {
        let pools = benchmark_pools();
        assert_eq!(pools.len(), 5);
        let known: Vec<_> = pools.iter().filter(|p| p.known_pool_id.is_some()).collect();
        assert_eq!(known.len(), 1);
        assert_eq!(known[0].known_pool_id.as_deref(), Some("147971598"));
    }

    #[test]
    fn test_parse_override() {
        let target = parse_override("eth:0xabc").unwrap();
        assert_eq!(target.network, "eth");
        assert_eq!(target.chain, "eth");
        assert_eq!(target.address, "0xabc");
        assert!(target.known_pool_id.is_none());

        assert!(parse_override("justanaddress").is_none());
        assert!(parse_override(":0xabc").is_none());
        assert!(parse_override("eth:").is_none());
    }
}
