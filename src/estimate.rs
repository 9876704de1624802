//! Exam hosting resource estimator
//!
//! Maps a student count to a recommended instance type and hourly cost.
//! Demand is linear in the student count with a fixed 20% safety margin for
//! peak load; the recommendation is the cheapest catalog entry that covers
//! both the CPU and the memory dimension. When nothing in the catalog is
//! big enough the estimator still answers: it falls back to the largest
//! entry and attaches a capacity warning for the caller to surface.
//!
//! Pure and synchronous: same input and catalog always produce the same
//! estimate, no shared state, safe to call from anywhere.

use serde::Serialize;

use crate::catalog::{Catalog, InstanceType};
use crate::error::{ExamcostError, Result};

/// vCPU required per concurrently examined student
pub const CPU_PER_STUDENT: f64 = 0.02;

/// Memory (GB) required per concurrently examined student
pub const RAM_PER_STUDENT_GB: f64 = 0.05;

/// Peak-load multiplier applied on top of the per-student coefficients
pub const SAFETY_MARGIN: f64 = 1.2;

/// Warning attached when demand exceeds every catalog entry
pub const CAPACITY_WARNING: &str =
    "Resource requirements exceed the largest available instance type. \
     Consider distributing the exam across multiple instances.";

/// Computed CPU/memory requirement, safety margin included
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceDemand {
    pub cpu: f64,
    pub memory_gb: f64,
}

/// Result of a sizing run
///
/// `headroom` is present only when a catalog entry actually covers the
/// demand; on the fallback path it is absent and `warning` is set instead.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceEstimate {
    pub recommended: InstanceType,
    pub demand: ResourceDemand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headroom: Option<ResourceDemand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ResourceEstimate {
    /// CPU demand as a percentage of the recommended instance's capacity
    ///
    /// Can exceed 100 on the fallback path.
    pub fn cpu_utilization(&self) -> f64 {
        self.demand.cpu / self.recommended.vcpu as f64 * 100.0
    }

    /// Memory demand as a percentage of the recommended instance's capacity
    pub fn memory_utilization(&self) -> f64 {
        self.demand.memory_gb / self.recommended.memory_gb * 100.0
    }
}

/// Demand for a student count: `students x coefficient x margin` per dimension
pub fn demand_for(students: u32) -> ResourceDemand {
    ResourceDemand {
        cpu: students as f64 * CPU_PER_STUDENT * SAFETY_MARGIN,
        memory_gb: students as f64 * RAM_PER_STUDENT_GB * SAFETY_MARGIN,
    }
}

/// Recommend an instance type for hosting `students` concurrent exam takers
///
/// Selection: cheapest catalog entry with `vcpu >= cpu demand` and
/// `memory_gb >= memory demand`, catalog order breaking price ties. If no
/// entry satisfies both dimensions the largest entry is returned with
/// [`CAPACITY_WARNING`] attached and no headroom figure.
///
/// A zero student count is rejected here as well as at the CLI boundary;
/// every positive count produces an estimate.
pub fn estimate(catalog: &Catalog, students: u32) -> Result<ResourceEstimate> {
    if students == 0 {
        return Err(ExamcostError::Validation {
            field: "students".to_string(),
            reason: "student count must be at least 1".to_string(),
        });
    }

    let demand = demand_for(students);

    match catalog.cheapest_satisfying(demand.cpu, demand.memory_gb) {
        Some(instance) => Ok(ResourceEstimate {
            recommended: instance.clone(),
            demand,
            headroom: Some(ResourceDemand {
                cpu: instance.vcpu as f64 - demand.cpu,
                memory_gb: instance.memory_gb - demand.memory_gb,
            }),
            warning: None,
        }),
        None => {
            let instance = catalog.largest();
            Ok(ResourceEstimate {
                recommended: instance.clone(),
                demand,
                headroom: None,
                warning: Some(CAPACITY_WARNING.to_string()),
            })
        }
    }
}
