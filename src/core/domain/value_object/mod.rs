mod disk_size;
mod guest_id;

pub use disk_size::DiskSize;
pub use guest_id::GuestId;
