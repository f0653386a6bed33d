//! Driver telemetry sink boundary.
//!
//! This module is the only bridge between driver logic and the per-thread
//! counters in `obs::metrics`.
use crate::{driver::SkipReason, obs::metrics, role::TreeRole};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn DriverSink>>> = const { RefCell::new(None) };
}

///
/// PassOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PassOutcome {
    /// At least one role was found and the mapping validated.
    Tree,
    /// No tree roles on the type.
    Plain,
    Failed,
}

///
/// DriverEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DriverEvent<'a> {
    PassStart {
        type_name: &'a str,
    },
    FieldSkipped {
        type_name: &'a str,
        field: &'a str,
        reason: SkipReason,
    },
    RoleAssigned {
        type_name: &'a str,
        role: TreeRole,
        field: &'a str,
    },
    /// A later property re-declared a role; the later one wins.
    RoleOverwritten {
        type_name: &'a str,
        role: TreeRole,
        previous: &'a str,
        field: &'a str,
    },
    PassFinish {
        type_name: &'a str,
        outcome: PassOutcome,
    },
}

///
/// DriverSink
///

pub trait DriverSink {
    fn record(&self, event: &DriverEvent<'_>);
}

/// GlobalDriverSink
/// Default sink that writes into the per-thread driver counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalDriverSink;

impl DriverSink for GlobalDriverSink {
    fn record(&self, event: &DriverEvent<'_>) {
        match *event {
            DriverEvent::PassStart { type_name } => {
                metrics::with_state_mut(|m| {
                    m.totals.passes = m.totals.passes.saturating_add(1);
                    let entry = metrics::type_entry(m, type_name);
                    entry.passes = entry.passes.saturating_add(1);
                });
            }

            DriverEvent::FieldSkipped { type_name, .. } => {
                metrics::with_state_mut(|m| {
                    m.totals.fields_skipped = m.totals.fields_skipped.saturating_add(1);
                    let entry = metrics::type_entry(m, type_name);
                    entry.fields_skipped = entry.fields_skipped.saturating_add(1);
                });
            }

            DriverEvent::RoleAssigned { type_name, .. } => {
                metrics::with_state_mut(|m| {
                    m.totals.roles_assigned = m.totals.roles_assigned.saturating_add(1);
                    let entry = metrics::type_entry(m, type_name);
                    entry.roles_assigned = entry.roles_assigned.saturating_add(1);
                });
            }

            DriverEvent::RoleOverwritten { type_name, .. } => {
                metrics::with_state_mut(|m| {
                    m.totals.roles_overwritten = m.totals.roles_overwritten.saturating_add(1);
                    let entry = metrics::type_entry(m, type_name);
                    entry.roles_overwritten = entry.roles_overwritten.saturating_add(1);
                });
            }

            DriverEvent::PassFinish { type_name, outcome } => {
                metrics::with_state_mut(|m| match outcome {
                    PassOutcome::Tree => m.totals.tree_types = m.totals.tree_types.saturating_add(1),
                    PassOutcome::Plain => {
                        m.totals.plain_types = m.totals.plain_types.saturating_add(1);
                    }
                    PassOutcome::Failed => {
                        m.totals.failures = m.totals.failures.saturating_add(1);
                        let entry = metrics::type_entry(m, type_name);
                        entry.failures = entry.failures.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_DRIVER_SINK: GlobalDriverSink = GlobalDriverSink;

pub(crate) fn record(event: &DriverEvent<'_>) {
    // Clone out of the slot so a sink may itself install an override.
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_DRIVER_SINK.record(event),
    }
}

/// Snapshot the driver counters for this thread.
#[must_use]
pub fn driver_report() -> metrics::DriverReport {
    metrics::report()
}

/// Reset the driver counters for this thread.
pub fn driver_reset() {
    metrics::reset();
}

/// Run a closure with a temporary sink override on this thread.
pub fn with_driver_sink<T>(sink: Rc<dyn DriverSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn DriverSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
