//! Resource allocation report for a single Proxmox VE host.
//!
//! Guest configs under `/etc/pve` are parsed into records, summed per guest
//! kind, measured against the host's own counters and rendered as Markdown.

mod cli;
mod core;
mod report;

#[cfg(test)]
mod tests;

pub use crate::cli::Cli;
pub use crate::core::config::ReportConfig;
pub use crate::core::domain::error::{CapturedTrace, ParseError, ReportError, ReportResult};
pub use crate::core::domain::model::{
    allocation::{AllocationTotals, cpu_percentage},
    guest_record::{DiskLayout, GuestInventory, GuestKind, GuestRecord, GuestTotals},
    host_capacity::{HostCapacity, UptimeBreakdown},
    usage_report::UsageReport,
};
pub use crate::core::domain::value_object::{DiskSize, GuestId};
pub use crate::core::infrastructure::{
    field_extractor::{ConfigText, FieldPattern, extract_line, extract_value},
    guest_config_parser::GuestConfigParser,
    host_probe::{HostCapacityProbe, LOAD_PLACEHOLDER, LoadSampler, TopLoadSampler},
};
pub use crate::report::application::{
    output_target::OutputTarget, service::report_renderer::ReportRenderer,
};

use std::io::Write;
use tracing::info;

/// Collects and writes the allocation report.
///
/// # Examples
///
/// ```no_run
/// use pve_usage::{OutputTarget, ReportResult, UsageReporter};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> ReportResult<()> {
///     let reporter = UsageReporter::builder().build();
///     reporter
///         .generate(&OutputTarget::Stdout, &mut std::io::stdout(), false)
///         .await
/// }
/// ```
pub struct UsageReporter {
    config: ReportConfig,
    probe: HostCapacityProbe,
}

/// Builder for UsageReporter configuration
#[derive(Default)]
pub struct UsageReporterBuilder {
    config: Option<ReportConfig>,
    sampler: Option<Box<dyn LoadSampler>>,
}

impl UsageReporterBuilder {
    /// Input locations. Defaults to the fixed Proxmox VE paths.
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// CPU load source. Defaults to [`TopLoadSampler`].
    pub fn load_sampler(mut self, sampler: impl LoadSampler + 'static) -> Self {
        self.sampler = Some(Box::new(sampler));
        self
    }

    pub fn build(self) -> UsageReporter {
        let config = self.config.unwrap_or_default();
        let sampler = self
            .sampler
            .unwrap_or_else(|| Box::new(TopLoadSampler));
        let probe = HostCapacityProbe::new(&config, sampler);
        UsageReporter { config, probe }
    }
}

impl UsageReporter {
    /// Creates a new builder for UsageReporter configuration
    pub fn builder() -> UsageReporterBuilder {
        UsageReporterBuilder::default()
    }

    /// Parses both guest directories, probes the host and aggregates.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - A guest config directory or file cannot be read
    /// - A host status file cannot be read or its uptime is malformed
    pub async fn collect(&self) -> ReportResult<UsageReport> {
        let extension = &self.config.config_extension;
        let vms = GuestConfigParser::new(GuestKind::VirtualMachine, extension.as_str())
            .parse_dir(&self.config.vm_config_dir)
            .await?;
        let containers = GuestConfigParser::new(GuestKind::Container, extension.as_str())
            .parse_dir(&self.config.container_config_dir)
            .await?;
        let host = self.probe.probe().await?;

        Ok(UsageReport::new(host, vms, containers))
    }

    /// Collects the report and writes it to `target`.
    ///
    /// `console` receives the report for [`OutputTarget::Stdout`], or a single
    /// `Saved report to <path>` line for [`OutputTarget::File`]. `styled`
    /// only affects console output; files are always plain.
    pub async fn generate<W: Write>(
        &self,
        target: &OutputTarget,
        console: &mut W,
        styled: bool,
    ) -> ReportResult<()> {
        let report = self.collect().await?;

        match target {
            OutputTarget::Stdout => ReportRenderer::new(styled).write_to(&report, console),
            OutputTarget::File(path) => {
                let mut buffer = Vec::new();
                ReportRenderer::plain().write_to(&report, &mut buffer)?;
                tokio::fs::write(path, buffer)
                    .await
                    .map_err(|e| ReportError::io(path, e))?;
                info!(path = %path.display(), "report written");
                writeln!(console, "Saved report to {}", path.display())
                    .map_err(ReportError::output)
            }
        }
    }
}
