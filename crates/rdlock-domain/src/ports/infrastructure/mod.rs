//! Infrastructure Ports

/// Time source port
pub mod clock;
/// Distributed lock port
pub mod lock;

pub use clock::{Clock, ManualClock, SystemClock};
pub use lock::DistributedLock;
