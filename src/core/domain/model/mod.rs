pub mod allocation;
pub mod guest_record;
pub mod host_capacity;
pub mod usage_report;
