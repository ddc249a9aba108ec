//! Turns a directory of guest configs into normalized [`GuestRecord`]s.
//!
//! Virtual machines and containers share one parser. The [`GuestKind`] picks
//! the name field, whether swap is read and how disks are found.

use crate::core::domain::{
    error::{ParseError, ReportError, ReportResult},
    model::guest_record::{DiskLayout, GuestInventory, GuestKind, GuestRecord},
    value_object::{DiskSize, GuestId},
};
use crate::core::infrastructure::field_extractor::{ConfigText, FieldPattern};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

fn field(name: &str) -> FieldPattern {
    FieldPattern::for_field(name).expect("escaped field name is a valid pattern")
}

static MEMORY: LazyLock<FieldPattern> = LazyLock::new(|| field("memory"));
static CORES: LazyLock<FieldPattern> = LazyLock::new(|| field("cores"));
static SWAP: LazyLock<FieldPattern> = LazyLock::new(|| field("swap"));
static ROOTFS: LazyLock<FieldPattern> = LazyLock::new(|| field("rootfs"));

static BUS_DISK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(scsi|sata|virtio|efidisk)\d+:\s*([^\s,]+)").expect("disk pattern is valid")
});
static ROOTFS_DISK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^rootfs:\s*([^\s,]+)").expect("rootfs pattern is valid"));

const MEMORY_FALLBACK: u64 = 0;
const CORES_FALLBACK: u32 = 1;
const SWAP_FALLBACK: u64 = 0;

/// Parser for one guest kind.
#[derive(Debug, Clone)]
pub struct GuestConfigParser {
    kind: GuestKind,
    name: FieldPattern,
    extension: String,
}

impl GuestConfigParser {
    pub fn new(kind: GuestKind, extension: impl Into<String>) -> Self {
        Self {
            kind,
            name: field(kind.name_field()),
            extension: extension.into(),
        }
    }

    /// Parses every config file in `dir`, in directory enumeration order.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Io` if the directory or any config file in it
    /// cannot be read. Malformed fields are not errors; they fall back to
    /// their defaults with a warning.
    pub async fn parse_dir(&self, dir: &Path) -> ReportResult<GuestInventory> {
        let mut inventory = GuestInventory::empty(self.kind);

        for path in self.config_files(dir).await? {
            let id = match GuestId::from_config_path(&path, &self.extension) {
                Ok(id) => id,
                Err(e) => {
                    warn!(kind = self.kind.label(), path = %path.display(), error = %e, "skipping config without a guest id");
                    continue;
                }
            };
            let text = ConfigText::load(&path).await?;
            inventory.push(self.parse_config(id, &text));
        }

        info!(
            kind = self.kind.label(),
            dir = %dir.display(),
            guests = inventory.records.len(),
            "parsed guest configs"
        );
        Ok(inventory)
    }

    /// Builds one record from an already-read config.
    pub fn parse_config(&self, id: GuestId, text: &ConfigText) -> GuestRecord {
        debug!(kind = self.kind.label(), %id, path = %text.path().display(), "parsing guest config");

        let display_name = match text.value(&self.name) {
            name if name.is_empty() => GuestRecord::UNNAMED.to_string(),
            name => name,
        };

        let memory_mb = read_field(&id, "memory", &text.value(&MEMORY), MEMORY_FALLBACK);
        let cpu_count = with_fallback(&id, parse_cores(&text.value(&CORES)), CORES_FALLBACK);
        let swap_mb = self
            .kind
            .has_swap()
            .then(|| read_field(&id, "swap", &text.value(&SWAP), SWAP_FALLBACK));

        let (disk_locations, disk_gb) = match self.kind.disk_layout() {
            DiskLayout::BusScan => scan_bus_disks(&id, text),
            DiskLayout::RootFs => read_rootfs(&id, text),
        };

        GuestRecord {
            id,
            display_name,
            memory_mb,
            cpu_count,
            swap_mb,
            disk_gb,
            disk_locations,
        }
    }

    async fn config_files(&self, dir: &Path) -> ReportResult<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| ReportError::io(dir, e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ReportError::io(dir, e))?
        {
            let matches_extension = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(&self.extension));
            if matches_extension {
                files.push(entry.path());
            }
        }
        Ok(files)
    }
}

/// Parses a raw field value. `Ok(None)` means the field was absent.
pub(crate) fn parse_field<T: FromStr>(field: &str, raw: &str) -> Result<Option<T>, ParseError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>().map(Some).map_err(|_| ParseError::Field {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Parses `cores`. Zero is malformed: a guest always has at least one.
pub(crate) fn parse_cores(raw: &str) -> Result<Option<u32>, ParseError> {
    match parse_field::<u32>("cores", raw)? {
        Some(0) => Err(ParseError::ConstraintViolation(
            "cores must be at least 1".to_string(),
        )),
        cores => Ok(cores),
    }
}

/// Parses a field, falling back when it is absent or malformed.
fn read_field<T: FromStr>(id: &GuestId, field: &str, raw: &str, fallback: T) -> T {
    with_fallback(id, parse_field(field, raw), fallback)
}

fn with_fallback<T>(id: &GuestId, parsed: Result<Option<T>, ParseError>, fallback: T) -> T {
    match parsed {
        Ok(Some(value)) => value,
        Ok(None) => fallback,
        Err(e) => {
            warn!(guest = %id, error = %e, "using fallback for malformed field");
            fallback
        }
    }
}

/// Storage name in front of a volume spec: `local-lvm:vm-100-disk-0` → `local-lvm`.
fn storage_location(volume: &str) -> &str {
    let storage = volume.split(':').next().unwrap_or(volume);
    storage.split(',').next().unwrap_or(storage)
}

fn disk_size(id: &GuestId, line: &str) -> u64 {
    match DiskSize::from_descriptor(line) {
        Ok(size) => size.map(|s| s.gigabytes()).unwrap_or(0),
        Err(e) => {
            warn!(guest = %id, error = %e, "ignoring unparseable disk size");
            0
        }
    }
}

fn scan_bus_disks(id: &GuestId, text: &ConfigText) -> (Vec<String>, u64) {
    let mut locations = Vec::new();
    let mut total_gb: u64 = 0;

    for line in text.lines() {
        let Some(caps) = BUS_DISK.captures(line) else {
            continue;
        };
        locations.push(storage_location(&caps[2]).to_string());
        total_gb = total_gb.saturating_add(disk_size(id, line));
    }

    (locations, total_gb)
}

fn read_rootfs(id: &GuestId, text: &ConfigText) -> (Vec<String>, u64) {
    let line = text.line(&ROOTFS);
    if line.is_empty() {
        return (Vec::new(), 0);
    }

    let locations = ROOTFS_DISK
        .captures(&line)
        .map(|caps| vec![storage_location(&caps[1]).to_string()])
        .unwrap_or_default();

    (locations, disk_size(id, &line))
}
