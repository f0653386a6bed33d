//! Observability: driver telemetry and the sink boundary.
//!
//! Driver logic MUST NOT touch `obs::metrics` directly. Every pass reports
//! through `DriverEvent`s recorded via `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{DriverCounters, DriverReport, TypeCounters};
pub use sink::{DriverEvent, DriverSink, PassOutcome, driver_report, driver_reset, with_driver_sink};
