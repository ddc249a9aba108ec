//! Domain models for guests read from `/etc/pve` config files.
//!
//! A guest is either a QEMU virtual machine or an LXC container. Both kinds
//! share one record shape; the kind decides which fields are looked up and
//! how disks are discovered.

use crate::core::domain::value_object::GuestId;
use serde::{Deserialize, Serialize};

/// The two kinds of guest a Proxmox host runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GuestKind {
    /// A QEMU virtual machine (`/etc/pve/qemu-server`).
    #[serde(rename = "qemu")]
    VirtualMachine,
    /// An LXC container (`/etc/pve/lxc`).
    #[serde(rename = "lxc")]
    Container,
}

/// How a guest kind declares its disks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskLayout {
    /// Any number of `scsiN:`/`sataN:`/`virtioN:`/`efidiskN:` lines.
    BusScan,
    /// A single `rootfs:` line.
    RootFs,
}

impl GuestKind {
    /// Config key holding the display name.
    pub fn name_field(&self) -> &'static str {
        match self {
            GuestKind::VirtualMachine => "name",
            GuestKind::Container => "hostname",
        }
    }

    /// Whether the config carries a `swap` field.
    pub fn has_swap(&self) -> bool {
        matches!(self, GuestKind::Container)
    }

    pub fn disk_layout(&self) -> DiskLayout {
        match self {
            GuestKind::VirtualMachine => DiskLayout::BusScan,
            GuestKind::Container => DiskLayout::RootFs,
        }
    }

    /// Short label used in logs and report headings.
    pub fn label(&self) -> &'static str {
        match self {
            GuestKind::VirtualMachine => "VM",
            GuestKind::Container => "LXC",
        }
    }
}

/// One guest, normalized from its config file.
///
/// Absent fields are already replaced by their fallbacks: memory `0`,
/// cores `1`, swap `0`, disk `0`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuestRecord {
    /// Config file name without extension.
    pub id: GuestId,
    /// `name` for VMs, `hostname` for containers; `(no name)` when absent.
    pub display_name: String,
    /// Configured memory in MB.
    pub memory_mb: u64,
    /// Configured cores (vCPUs for VMs).
    pub cpu_count: u32,
    /// Configured swap in MB. Only containers have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_mb: Option<u64>,
    /// Sum of all recognized disk sizes in whole GB.
    pub disk_gb: u64,
    /// Storage names backing the disks, in config order.
    pub disk_locations: Vec<String>,
}

impl GuestRecord {
    /// Display name used when a config has no name field.
    pub const UNNAMED: &'static str = "(no name)";

    /// Storage locations joined for display, or `-` when there are none.
    pub fn locations_label(&self) -> String {
        if self.disk_locations.is_empty() {
            "-".to_string()
        } else {
            self.disk_locations.join(", ")
        }
    }
}

/// Running allocation totals for one guest kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuestTotals {
    pub memory_mb: u64,
    pub disk_gb: u64,
    pub cpu: u64,
}

impl GuestTotals {
    /// Folds one record in. Sums saturate at `u64::MAX`.
    pub fn add(&mut self, record: &GuestRecord) {
        self.memory_mb = self.memory_mb.saturating_add(record.memory_mb);
        self.disk_gb = self.disk_gb.saturating_add(record.disk_gb);
        self.cpu = self.cpu.saturating_add(u64::from(record.cpu_count));
    }
}

impl<'a> FromIterator<&'a GuestRecord> for GuestTotals {
    fn from_iter<I: IntoIterator<Item = &'a GuestRecord>>(iter: I) -> Self {
        let mut totals = GuestTotals::default();
        for record in iter {
            totals.add(record);
        }
        totals
    }
}

/// Every guest of one kind, in directory enumeration order, with totals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuestInventory {
    pub kind: GuestKind,
    pub records: Vec<GuestRecord>,
    pub totals: GuestTotals,
}

impl GuestInventory {
    pub fn empty(kind: GuestKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            totals: GuestTotals::default(),
        }
    }

    /// Appends a record and folds it into the running totals.
    pub fn push(&mut self, record: GuestRecord) {
        self.totals.add(&record);
        self.records.push(record);
    }
}
