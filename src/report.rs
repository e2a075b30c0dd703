//! Discovery report aggregation and persistence.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::PoolTarget;

/// Outcome for one pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolIdRecord {
    pub name: String,
    pub network: String,
    pub chain: String,
    pub address: String,
    pub pool_id: Option<String>,
    pub found: bool,
}

impl PoolIdRecord {
    pub fn new(target: &PoolTarget, pool_id: Option<String>) -> Self {
        Self {
            name: target.name.clone(),
            network: target.network.clone(),
            chain: target.chain.clone(),
            address: target.address.clone(),
            found: pool_id.is_some(),
            pool_id,
        }
    }
}

/// All outcomes of one discovery run.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub records: Vec<PoolIdRecord>,
    pub timestamp: DateTime<Utc>,
}

impl DiscoveryReport {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn push(&mut self, record: PoolIdRecord) {
        self.records.push(record);
    }

    pub fn found_count(&self) -> usize {
        self.records.iter().filter(|r| r.found).count()
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn print_summary(&self) {
        println!();
        println!("{}", "=".repeat(70));
        println!("📊 SUMMARY");
        println!("{}", "=".repeat(70));
        for record in &self.records {
            let status = if record.found { "✅" } else { "❌" };
            let pool_id = record.pool_id.as_deref().unwrap_or("NOT FOUND");
            println!("{} {:<35} pool_id={}", status, record.name, pool_id);
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json().context("serialize report")?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("write {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        let report = serde_json::from_str(&json).context("parse report")?;
        Ok(report)
    }
}
