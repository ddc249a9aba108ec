use crate::{
    GuestInventory, GuestRecord, HostCapacity, ReportError, ReportResult, UsageReport,
};
use console::Style;
use std::io::Write;

const RULE: &str = "======================================";

const VM_SEPARATOR: &str =
    "|--------|--------------------|-------------|-------|-----------|----------------------|";
const LXC_SEPARATOR: &str =
    "|---------|--------------------|-------------|-------|-----------|-----------|---------------|";

/// Terminal emphasis. Disabled, every method returns its input unchanged.
#[derive(Debug, Clone)]
struct Palette {
    enabled: bool,
    heading: Style,
    label: Style,
    table_header: Style,
    good: Style,
    accent: Style,
    alert: Style,
}

impl Palette {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            heading: Style::new().bold().cyan().force_styling(true),
            label: Style::new().yellow().force_styling(true),
            table_header: Style::new().bold().yellow().force_styling(true),
            good: Style::new().green().force_styling(true),
            accent: Style::new().cyan().force_styling(true),
            alert: Style::new().red().force_styling(true),
        }
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Formats a [`UsageReport`] as Markdown.
///
/// Rendering is pure; [`ReportRenderer::write_to`] pushes the lines into
/// whatever sink the caller owns.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    palette: Palette,
}

impl ReportRenderer {
    /// A renderer that adds terminal colours when `styled` is true.
    pub fn new(styled: bool) -> Self {
        Self {
            palette: Palette::new(styled),
        }
    }

    /// A renderer for files and pipes.
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Every line of the report, in output order.
    pub fn render(&self, report: &UsageReport) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(RULE.to_string());
        lines.extend(self.host_status(&report.host));
        lines.push(RULE.to_string());
        lines.extend(self.vm_table(&report.vms));
        lines.push(String::new());
        lines.extend(self.container_table(&report.containers));
        lines.push(String::new());
        lines.extend(self.cpu_summary(report));
        lines.push(String::new());
        lines.extend(self.memory_disk_summary(report));
        lines
    }

    /// Renders the report into `sink`, one line per `\n`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Output` if the sink rejects a write.
    pub fn write_to<W: Write>(&self, report: &UsageReport, sink: &mut W) -> ReportResult<()> {
        for line in self.render(report) {
            writeln!(sink, "{}", line).map_err(ReportError::output)?;
        }
        sink.flush().map_err(ReportError::output)
    }

    fn heading(&self, text: &str) -> String {
        self.palette.paint(&self.palette.heading, text)
    }

    fn label(&self, text: &str) -> String {
        self.palette.paint(&self.palette.label, text)
    }

    fn host_status(&self, host: &HostCapacity) -> Vec<String> {
        let uptime = host.uptime();
        let used = format!("{} MB used", host.used_memory_mb);

        vec![
            self.heading("### PVE Status"),
            format!(
                "{} {} days, {}:{:02}",
                self.label("- Uptime:"),
                uptime.days,
                uptime.hours,
                uptime.minutes
            ),
            format!(
                "{} {} / {} MB total (buff/cache: {} MB)",
                self.label("- Memory:"),
                self.palette.paint(&self.palette.good, &used),
                host.total_memory_mb,
                host.buff_cache_mb
            ),
            format!(
                "{} {} ({} cores)",
                self.label("- CPU:"),
                self.palette.paint(&self.palette.accent, &host.cpu_model_name),
                host.cpu_core_count
            ),
            format!(
                "{} {}",
                self.label("- Usage:"),
                self.palette.paint(&self.palette.alert, &host.cpu_load_summary)
            ),
            String::new(),
        ]
    }

    fn vm_table(&self, vms: &GuestInventory) -> Vec<String> {
        let header = format!(
            "| {:<6} | {:<18} | {:<12} | {:<5} | {:<9} | {:<20} |",
            "VM ID", "Name", "Memory (MB)", "vCPUs", "Disk (GB)", "Disk Location(s)"
        );

        let mut lines = vec![
            self.heading("### VM Memory, CPU & Disk Allocation"),
            self.palette.paint(&self.palette.table_header, &header),
            VM_SEPARATOR.to_string(),
        ];
        lines.extend(vms.records.iter().map(vm_row));
        lines
    }

    fn container_table(&self, containers: &GuestInventory) -> Vec<String> {
        let header = format!(
            "| {:<7} | {:<18} | {:<12} | {:<5} | {:<9} | {:<9} | {:<13} |",
            "LXC ID", "Hostname", "Memory (MB)", "Cores", "Swap (MB)", "Disk (GB)", "Disk Location"
        );

        let mut lines = vec![
            self.heading("### LXC Memory, CPU & Disk Allocation"),
            self.palette.paint(&self.palette.table_header, &header),
            LXC_SEPARATOR.to_string(),
        ];
        lines.extend(containers.records.iter().map(container_row));
        lines
    }

    fn cpu_summary(&self, report: &UsageReport) -> Vec<String> {
        let totals = &report.totals;
        vec![
            self.heading("### CPU Summary"),
            format!("- Total VM vCPUs: **{}**", totals.vm.cpu),
            format!("- Total LXC CPU cores: **{}**", totals.containers.cpu),
            format!("- Total Allocated CPU: **{}**", totals.cpu),
            format!("- Host CPU Capacity: **{} cores**", totals.host_cores),
            format!("- CPU Allocation: **{:.2}%**", totals.cpu_percent),
        ]
    }

    fn memory_disk_summary(&self, report: &UsageReport) -> Vec<String> {
        let totals = &report.totals;
        vec![
            self.heading("### Memory & Disk Summary"),
            format!("- Total VM Memory: {} MB", totals.vm.memory_mb),
            format!("- Total VM Disk: {} GB", totals.vm.disk_gb),
            format!("- Total LXC Memory: {} MB", totals.containers.memory_mb),
            format!("- Total LXC Disk: {} GB", totals.containers.disk_gb),
            format!("- Total Allocated Memory: {} MB", totals.memory_mb),
            format!("- Total Allocated Disk: {} GB", totals.disk_gb),
        ]
    }
}

fn vm_row(vm: &GuestRecord) -> String {
    format!(
        "| {:<6} | {:<18} | {:<12} | {:<5} | {:<9} | {:<20} |",
        vm.id.as_str(),
        vm.display_name,
        vm.memory_mb,
        vm.cpu_count,
        vm.disk_gb,
        vm.locations_label()
    )
}

fn container_row(ct: &GuestRecord) -> String {
    format!(
        "| {:<7} | {:<18} | {:<12} | {:<5} | {:<9} | {:<9} | {:<13} |",
        ct.id.as_str(),
        ct.display_name,
        ct.memory_mb,
        ct.cpu_count,
        ct.swap_mb.unwrap_or(0),
        ct.disk_gb,
        ct.locations_label()
    )
}
