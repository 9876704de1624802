//! AWS instance type catalog
//!
//! The catalog is an ordered, immutable table of instance types with their
//! vCPU count, memory and on-demand hourly price. It is fixed for the
//! lifetime of the process: loaded once (built-in table or `[[catalog]]`
//! entries from the config file), validated, then only read.
//!
//! Prices are simplified on-demand rates (a production deployment would use
//! the AWS Pricing API). Selection helpers preserve catalog order: when two
//! entries tie, the one listed first wins.

use comfy_table::{Cell, Table};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::utils::daily_cost;

/// One instance type offering: name, capacity and hourly price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceType {
    pub name: String,
    pub vcpu: u32,
    pub memory_gb: f64,
    pub cost_per_hour: f64,
}

/// Ordered, validated instance type table
///
/// Guaranteed non-empty with strictly positive capacities and prices, so
/// selection never has to handle a degenerate table.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<InstanceType>,
}

/// Built-in catalog: simplified EC2 on-demand offerings
///
/// Kept in ascending burstable-to-large order; `catalog` config entries
/// replace this table wholesale.
pub fn default_entries() -> Vec<InstanceType> {
    let table: [(&str, u32, f64, f64); 10] = [
        ("t3.micro", 2, 1.0, 0.0104),
        ("t3.small", 2, 2.0, 0.0208),
        ("t3.medium", 2, 4.0, 0.0416),
        ("t3.large", 2, 8.0, 0.0832),
        ("m5.large", 2, 8.0, 0.096),
        ("m5.xlarge", 4, 16.0, 0.192),
        ("m5.2xlarge", 8, 32.0, 0.384),
        ("c5.large", 2, 4.0, 0.085),
        ("c5.xlarge", 4, 8.0, 0.17),
        ("c5.2xlarge", 8, 16.0, 0.34),
    ];

    table
        .iter()
        .map(|(name, vcpu, memory_gb, cost_per_hour)| InstanceType {
            name: name.to_string(),
            vcpu: *vcpu,
            memory_gb: *memory_gb,
            cost_per_hour: *cost_per_hour,
        })
        .collect()
}

impl Default for Catalog {
    fn default() -> Self {
        // The built-in table is known-valid; skip re-validation.
        Self {
            entries: default_entries(),
        }
    }
}

impl Catalog {
    /// Build a catalog from configured entries, rejecting tables the
    /// estimator cannot work with
    pub fn new(entries: Vec<InstanceType>) -> std::result::Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "catalog".to_string(),
                reason: "catalog must contain at least one instance type".to_string(),
            });
        }

        for entry in &entries {
            validate_entry(entry)?;
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[InstanceType] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cheapest entry satisfying both demand dimensions
    ///
    /// Returns `None` when the demand exceeds every entry in at least one
    /// dimension. Ties on price keep the first catalog position (stable
    /// first-minimum scan).
    pub fn cheapest_satisfying(&self, cpu_demand: f64, memory_demand: f64) -> Option<&InstanceType> {
        let mut best: Option<&InstanceType> = None;
        for entry in &self.entries {
            if (entry.vcpu as f64) < cpu_demand || entry.memory_gb < memory_demand {
                continue;
            }
            match best {
                Some(current) if entry.cost_per_hour >= current.cost_per_hour => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// Largest entry: maximum memory, ties broken by maximum vCPU
    ///
    /// Fallback target when no entry satisfies the demand. First catalog
    /// position wins a full tie.
    pub fn largest(&self) -> &InstanceType {
        let mut best = &self.entries[0];
        for entry in &self.entries[1..] {
            let more_memory = entry.memory_gb > best.memory_gb;
            let same_memory_more_vcpu =
                entry.memory_gb == best.memory_gb && entry.vcpu > best.vcpu;
            if more_memory || same_memory_more_vcpu {
                best = entry;
            }
        }
        best
    }
}

fn validate_entry(entry: &InstanceType) -> std::result::Result<(), ConfigError> {
    if entry.name.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "catalog".to_string(),
            reason: "instance type name cannot be empty".to_string(),
        });
    }
    if entry.vcpu == 0 {
        return Err(ConfigError::InvalidValue {
            field: "catalog".to_string(),
            reason: format!("{}: vcpu must be at least 1", entry.name),
        });
    }
    if !entry.memory_gb.is_finite() || entry.memory_gb <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field: "catalog".to_string(),
            reason: format!("{}: memory_gb must be a positive number", entry.name),
        });
    }
    if !entry.cost_per_hour.is_finite() || entry.cost_per_hour <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field: "catalog".to_string(),
            reason: format!("{}: cost_per_hour must be a positive number", entry.name),
        });
    }
    Ok(())
}

/// Render the catalog for the `catalog` subcommand
pub fn list_catalog(catalog: &Catalog, output_format: &str) -> Result<()> {
    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(catalog.entries())?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Type", "vCPU", "Memory (GB)", "Cost/hr", "Cost/day"]);

    for entry in catalog.entries() {
        table.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(entry.vcpu),
            Cell::new(format!("{:.0}", entry.memory_gb)),
            Cell::new(format!("${:.4}", entry.cost_per_hour)),
            Cell::new(format!("${:.2}", daily_cost(entry.cost_per_hour))),
        ]);
    }

    println!("{table}");
    println!("{} instance type(s)", catalog.len());
    Ok(())
}
