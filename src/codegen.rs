//! Go snippet rendering for the downstream monitor.
//!
//! The monitor keeps its pool table as a hand-maintained Go struct
//! literal; these renderers print a block that can be pasted in
//! verbatim. Only found pools are included.

use crate::report::PoolIdRecord;

/// `monitoredPools` table for head_lag_monitor.go.
pub fn render_monitored_pools(records: &[PoolIdRecord]) -> String {
    let mut out = String::new();
    out.push_str("var monitoredPools = []struct {\n");
    out.push_str("\tName    string\n");
    out.push_str("\tNetwork string\n");
    out.push_str("\tPoolID  string\n");
    out.push_str("\tChain   string\n");
    out.push_str("}{\n");
    for record in records.iter().filter(|r| r.found) {
        let pool_id = record.pool_id.as_deref().unwrap_or_default();
        out.push_str("\t{\n");
        out.push_str(&format!("\t\tName:    \"{}\",\n", record.name));
        out.push_str(&format!("\t\tNetwork: \"{}\",\n", record.network));
        out.push_str(&format!("\t\tPoolID:  \"{}\",\n", pool_id));
        out.push_str(&format!("\t\tChain:   \"{}\",\n", record.chain));
        out.push_str("\t},\n");
    }
    out.push_str("}\n");
    out
}

/// `geckoTerminalPools` table for the benchmark harness, which also
/// wants the contract address alongside the id.
pub fn render_benchmark_pools(records: &[PoolIdRecord]) -> String {
    let mut out = String::new();
    out.push_str("var geckoTerminalPools = []struct {\n");
    out.push_str("\tName      string\n");
    out.push_str("\tNetwork   string\n");
    out.push_str("\tAddress   string\n");
    out.push_str("\tPoolID    string\n");
    out.push_str("}{\n");
    for record in records.iter().filter(|r| r.found) {
        let pool_id = record.pool_id.as_deref().unwrap_or_default();
        out.push_str("\t{\n");
        out.push_str(&format!("\t\tName:    \"{}\",\n", record.name));
        out.push_str(&format!("\t\tNetwork: \"{}\",\n", record.network));
        out.push_str(&format!("\t\tAddress: \"{}\",\n", record.address));
        out.push_str(&format!("\t\tPoolID:  \"{}\",\n", pool_id));
        out.push_str("\t},\n");
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::benchmark_pools;
    use crate::report::PoolIdRecord;

    fn sample_records() -> Vec<PoolIdRecord> {
        let pools = benchmark_pools();
        vec![
            PoolIdRecord::new(&pools[0], Some("147971598".to_string())),
            PoolIdRecord::new(&pools[1], None),
        ]
    }

    #[test]
    fn test_monitored_pools_layout() {
        let expected = "var monitoredPools = []struct {\n\
                        \tName    string\n\
                        \tNetwork string\n\
                        \tPoolID  string\n\
                        \tChain   string\n\
                        }{\n\
                        \t{\n\
                        \t\tName:    \"ETH/USDC Uniswap V3\",\n\
                        \t\tNetwork: \"eth\",\n\
                        \t\tPoolID:  \"147971598\",\n\
                        \t\tChain:   \"ethereum\",\n\
                        \t},\n\
                        }\n";
        assert_eq!(render_monitored_pools(&sample_records()), expected);
    }

    #[test]
    fn test_benchmark_pools_layout() {
        let expected = "var geckoTerminalPools = []struct {\n\
                        \tName      string\n\
                        \tNetwork   string\n\
                        \tAddress   string\n\
                        \tPoolID    string\n\
                        }{\n\
                        \t{\n\
                        \t\tName:    \"ETH/USDC Uniswap V3\",\n\
                        \t\tNetwork: \"eth\",\n\
                        \t\tAddress: \"0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640\",\n\
                        \t\tPoolID:  \"147971598\",\n\
                        \t},\n\
                        }\n";
        // The unresolved Raydium pool is left out entirely.
        assert_eq!(render_benchmark_pools(&sample_records()), expected);
    }

    #[test]
    fn test_empty_report_renders_empty_table() {
        let rendered = render_monitored_pools(&[]);
        assert_eq!(
            rendered,
            "var monitoredPools = []struct {\n\tName    string\n\tNetwork string\n\tPoolID  string\n\tChain   string\n}{\n}\n"
        );
    }
}
