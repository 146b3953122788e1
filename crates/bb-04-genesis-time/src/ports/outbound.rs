//! # Outbound Ports

/// Abstract interface for the wall clock.
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in seconds since epoch.
    fn now(&self) -> u64;
}
