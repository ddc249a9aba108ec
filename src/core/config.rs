//! Where the report reads its inputs from.

use std::path::PathBuf;

/// Input locations for one report run.
///
/// The defaults are the fixed locations on a Proxmox VE host. They are not
/// exposed on the command line; tests point them at temporary directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Directory of QEMU guest configs.
    pub vm_config_dir: PathBuf,
    /// Directory of LXC guest configs.
    pub container_config_dir: PathBuf,
    /// Extension shared by every guest config file.
    pub config_extension: String,
    pub uptime_path: PathBuf,
    pub meminfo_path: PathBuf,
    pub cpuinfo_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            vm_config_dir: PathBuf::from("/etc/pve/qemu-server"),
            container_config_dir: PathBuf::from("/etc/pve/lxc"),
            config_extension: ".conf".to_string(),
            uptime_path: PathBuf::from("/proc/uptime"),
            meminfo_path: PathBuf::from("/proc/meminfo"),
            cpuinfo_path: PathBuf::from("/proc/cpuinfo"),
        }
    }
}
