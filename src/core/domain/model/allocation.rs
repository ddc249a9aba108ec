//! Allocation totals across both guest kinds, measured against the host.

use crate::core::domain::model::{guest_record::GuestTotals, host_capacity::HostCapacity};
use serde::{Deserialize, Serialize};

/// What the guests reserve, summed, and how that compares to host CPU capacity.
///
/// Derived data: build it with [`AllocationTotals::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AllocationTotals {
    pub vm: GuestTotals,
    pub containers: GuestTotals,
    pub memory_mb: u64,
    pub disk_gb: u64,
    pub cpu: u64,
    pub host_cores: u32,
    /// `cpu / host_cores * 100`, or `0` when the host reports no cores.
    pub cpu_percent: f64,
}

impl AllocationTotals {
    pub fn compute(vm: &GuestTotals, containers: &GuestTotals, host: &HostCapacity) -> Self {
        let cpu = vm.cpu.saturating_add(containers.cpu);
        Self {
            vm: *vm,
            containers: *containers,
            memory_mb: vm.memory_mb.saturating_add(containers.memory_mb),
            disk_gb: vm.disk_gb.saturating_add(containers.disk_gb),
            cpu,
            host_cores: host.cpu_core_count,
            cpu_percent: cpu_percentage(cpu, host.cpu_core_count),
        }
    }
}

/// Allocated CPUs as a percentage of host cores.
pub fn cpu_percentage(allocated: u64, host_cores: u32) -> f64 {
    if host_cores == 0 {
        return 0.0;
    }
    allocated as f64 / f64::from(host_cores) * 100.0
}
