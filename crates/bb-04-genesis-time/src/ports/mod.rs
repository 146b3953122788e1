//! Ports Layer - dependencies the injector needs from the outside world

pub mod outbound;

pub use outbound::TimeSource;
