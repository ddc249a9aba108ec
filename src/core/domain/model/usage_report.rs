//! Everything one report run collected.

use crate::core::domain::model::{
    allocation::AllocationTotals, guest_record::GuestInventory, host_capacity::HostCapacity,
};
use serde::{Deserialize, Serialize};

/// Host status, both guest inventories and the derived allocation totals.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UsageReport {
    pub host: HostCapacity,
    pub vms: GuestInventory,
    pub containers: GuestInventory,
    pub totals: AllocationTotals,
}

impl UsageReport {
    /// Assembles a report, computing totals from the inventories.
    pub fn new(host: HostCapacity, vms: GuestInventory, containers: GuestInventory) -> Self {
        let totals = AllocationTotals::compute(&vms.totals, &containers.totals, &host);
        Self {
            host,
            vms,
            containers,
            totals,
        }
    }
}
