//! Reads host-wide counters from `/proc` and samples CPU load.
//!
//! The probe does not look at guest configs and can run before or after the
//! guest parsers. CPU load sampling goes through [`LoadSampler`] so it can be
//! replaced with a deterministic fake.

use crate::core::config::ReportConfig;
use crate::core::domain::{
    error::{ParseError, ReportError, ReportResult},
    model::host_capacity::HostCapacity,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Load summary used when sampling fails.
pub const LOAD_PLACEHOLDER: &str = "CPU info not available";

/// Produces a one-line description of instantaneous CPU load.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoadSampler: Send + Sync {
    /// # Errors
    ///
    /// Returns `ReportError::LoadSample` when no load line can be obtained.
    async fn sample(&self) -> ReportResult<String>;
}

/// Samples load with a single batch iteration of `top`.
#[derive(Debug, Clone, Default)]
pub struct TopLoadSampler;

#[async_trait]
impl LoadSampler for TopLoadSampler {
    async fn sample(&self) -> ReportResult<String> {
        let output = Command::new("top")
            .arg("-bn1")
            .output()
            .await
            .map_err(|e| ReportError::LoadSample(format!("failed to run top: {}", e)))?;

        if !output.status.success() {
            return Err(ReportError::LoadSample(format!(
                "top exited with {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        find_cpu_line(&stdout)
            .map(str::to_string)
            .ok_or_else(|| ReportError::LoadSample("no %Cpu(s) line in top output".to_string()))
    }
}

/// The `%Cpu(s)` summary line of `top` batch output.
pub(crate) fn find_cpu_line(top_output: &str) -> Option<&str> {
    top_output
        .lines()
        .find(|line| line.starts_with("%Cpu(s)"))
        .map(str::trim_end)
}

/// Memory figures from `/proc/meminfo`, in MB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total_mb: u64,
    pub used_mb: u64,
    pub buff_cache_mb: u64,
}

/// Collects a [`HostCapacity`] from host status files and a load sampler.
pub struct HostCapacityProbe {
    uptime_path: PathBuf,
    meminfo_path: PathBuf,
    cpuinfo_path: PathBuf,
    sampler: Box<dyn LoadSampler>,
}

impl HostCapacityProbe {
    pub fn new(config: &ReportConfig, sampler: Box<dyn LoadSampler>) -> Self {
        Self {
            uptime_path: config.uptime_path.clone(),
            meminfo_path: config.meminfo_path.clone(),
            cpuinfo_path: config.cpuinfo_path.clone(),
            sampler,
        }
    }

    /// Reads every host counter.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Io` if a status file cannot be read and
    /// `ReportError::HostStatus` if the uptime cannot be parsed. A failed load
    /// sample is not an error; it becomes [`LOAD_PLACEHOLDER`].
    pub async fn probe(&self) -> ReportResult<HostCapacity> {
        let uptime_seconds = parse_uptime(&read_status(&self.uptime_path).await?)?;
        let memory = parse_meminfo(&read_status(&self.meminfo_path).await?);
        let cpu_load_summary = self.sample_load().await;
        let (cpu_model_name, cpu_core_count) =
            parse_cpuinfo(&read_status(&self.cpuinfo_path).await?);

        let cpu_core_count = match cpu_core_count {
            0 => {
                let fallback = available_cores();
                debug!(fallback, "cpuinfo lists no processors, using available parallelism");
                fallback
            }
            count => count,
        };

        Ok(HostCapacity {
            uptime_seconds,
            total_memory_mb: memory.total_mb,
            used_memory_mb: memory.used_mb,
            buff_cache_mb: memory.buff_cache_mb,
            cpu_model_name,
            cpu_core_count,
            cpu_load_summary,
        })
    }

    async fn sample_load(&self) -> String {
        match self.sampler.sample().await {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "CPU load unavailable");
                LOAD_PLACEHOLDER.to_string()
            }
        }
    }
}

async fn read_status(path: &Path) -> ReportResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ReportError::io(path, e))
}

fn available_cores() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}

/// Seconds since boot: the first field of `/proc/uptime`.
pub(crate) fn parse_uptime(contents: &str) -> Result<f64, ParseError> {
    let first = contents
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::Format("uptime is empty".to_string()))?;
    let seconds = first.parse::<f64>().map_err(|_| ParseError::Field {
        field: "uptime".to_string(),
        value: first.to_string(),
    })?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ParseError::ConstraintViolation(format!(
            "uptime must be a non-negative number of seconds, got {}",
            first
        )));
    }
    Ok(seconds)
}

/// Memory totals from `/proc/meminfo`. Lines that do not parse are skipped.
pub(crate) fn parse_meminfo(contents: &str) -> MemorySnapshot {
    let mut total_kb = 0;
    let mut free_kb = 0;
    let mut buffers_kb = 0;
    let mut cached_kb = 0;

    for line in contents.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(kb) = rest
            .split_whitespace()
            .next()
            .and_then(|v| v.parse::<u64>().ok())
        else {
            continue;
        };
        match key {
            "MemTotal" => total_kb = kb,
            "MemFree" => free_kb = kb,
            "Buffers" => buffers_kb = kb,
            "Cached" => cached_kb = kb,
            _ => {}
        }
    }

    let total_mb = total_kb / 1024;
    let free_mb = free_kb / 1024;
    let buff_cache_mb = buffers_kb / 1024 + cached_kb / 1024;
    MemorySnapshot {
        total_mb,
        used_mb: total_mb.saturating_sub(free_mb).saturating_sub(buff_cache_mb),
        buff_cache_mb,
    }
}

/// CPU model name and logical processor count from `/proc/cpuinfo`.
pub(crate) fn parse_cpuinfo(contents: &str) -> (String, u32) {
    let mut model = "Unknown".to_string();
    let mut processors = 0;

    for line in contents.lines() {
        if line.starts_with("model name") {
            if let Some((_, value)) = line.split_once(':') {
                model = value.trim().to_string();
            }
        } else if line.starts_with("processor") {
            processors += 1;
        }
    }

    (model, processors)
}
