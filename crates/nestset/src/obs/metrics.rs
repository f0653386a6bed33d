use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// DriverReport
/// Ephemeral, in-memory counters for driver passes on this thread.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DriverReport {
    pub totals: DriverCounters,
    pub types: BTreeMap<String, TypeCounters>,
}

///
/// DriverCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DriverCounters {
    // Pass outcomes
    pub passes: u64,
    pub tree_types: u64,
    pub plain_types: u64,
    pub failures: u64,

    // Per-property activity
    pub roles_assigned: u64,
    pub roles_overwritten: u64,
    pub fields_skipped: u64,
}

///
/// TypeCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeCounters {
    pub passes: u64,
    pub failures: u64,
    pub roles_assigned: u64,
    pub roles_overwritten: u64,
    pub fields_skipped: u64,
}

thread_local! {
    static DRIVER_STATE: RefCell<DriverReport> = RefCell::new(DriverReport::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&DriverReport) -> R) -> R {
    DRIVER_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut DriverReport) -> R) -> R {
    DRIVER_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Snapshot the current state.
pub(crate) fn report() -> DriverReport {
    with_state(Clone::clone)
}

/// Reset all counters (useful in tests).
pub(crate) fn reset() {
    with_state_mut(|m| *m = DriverReport::default());
}

/// Get or create the counters for one type.
pub(crate) fn type_entry<'a>(m: &'a mut DriverReport, type_name: &str) -> &'a mut TypeCounters {
    m.types.entry(type_name.to_string()).or_default()
}
