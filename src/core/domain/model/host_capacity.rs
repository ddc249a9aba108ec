//! Domain model for the host's own counters.
//!
//! This mirrors what the Proxmox node status endpoint reports, but is read
//! straight from `/proc` on the host the report runs on.

use serde::{Deserialize, Serialize};

/// Host-wide capacity and usage, captured once per run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HostCapacity {
    /// System uptime in seconds.
    pub uptime_seconds: f64,
    /// `MemTotal` in MB.
    pub total_memory_mb: u64,
    /// Total minus free minus buffers/cache, in MB.
    pub used_memory_mb: u64,
    /// `Buffers` plus `Cached`, in MB.
    pub buff_cache_mb: u64,
    /// CPU model string (`Unknown` if the host does not report one).
    pub cpu_model_name: String,
    /// Logical processors.
    pub cpu_core_count: u32,
    /// Instantaneous CPU load line, or a placeholder.
    pub cpu_load_summary: String,
}

/// Uptime split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UptimeBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl HostCapacity {
    pub fn uptime(&self) -> UptimeBreakdown {
        let seconds = self.uptime_seconds.max(0.0);
        UptimeBreakdown {
            days: (seconds / 86_400.0).floor() as u64,
            hours: ((seconds % 86_400.0) / 3_600.0).floor() as u64,
            minutes: ((seconds % 3_600.0) / 60.0).floor() as u64,
        }
    }
}
