// ── Fetch slot ──
//
// The fetch-state + data container for one cached sub-resource.
// Lifecycle: empty -> fetching -> fetched | errored; a changed time
// aggregation re-opens a settled slot for refetch.

use std::sync::Arc;

use netmeter_api::TimeAggregation;

use super::status::Status;

/// Fetch lifecycle state and data for one entity sub-resource.
///
/// Invariants: `is_fetching` and `is_fetched` are never both true; a
/// slot in error has neither set. `data` is only trusted when
/// `is_fetched` holds and `error` is `None` -- after a failed refetch it
/// still carries the previous value (stale-but-available beats
/// clearing).
#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    pub is_fetching: bool,
    pub is_fetched: bool,
    pub error: Option<String>,
    pub data: Option<Arc<T>>,
    /// Aggregation the slot was last fetched (or began fetching) at.
    pub time_aggregation: Option<TimeAggregation>,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            is_fetching: false,
            is_fetched: false,
            error: None,
            data: None,
            time_aggregation: None,
        }
    }
}

impl<T> FetchSlot<T> {
    /// The loading status of this slot.
    pub fn status(&self) -> Status {
        if self.is_fetching {
            Status::Loading
        } else if self.is_fetched {
            Status::Ready
        } else if self.error.is_some() {
            Status::Error
        } else {
            Status::Unknown
        }
    }

    /// Whether a fetch at the given aggregation is needed.
    ///
    /// True when the recorded aggregation differs from the requested one
    /// (stale aggregation invalidates), false while fetching or once
    /// fetched, true after an error (every access may retry; backoff is
    /// a caller concern).
    pub fn needs_fetch(&self, aggregation: Option<TimeAggregation>) -> bool {
        if let Some(requested) = aggregation {
            if self.time_aggregation != Some(requested) {
                return true;
            }
        }
        !(self.is_fetched || self.is_fetching)
    }

    /// Check-and-mark: when a fetch is needed, mark the slot fetching
    /// (recording the requested aggregation) and return true. Callers
    /// must invoke this before the first await point of the fetch -- the
    /// synchronous flag set is the reentrancy guard that keeps the
    /// at-most-one-fetch-per-key property.
    pub(crate) fn try_begin(&mut self, aggregation: Option<TimeAggregation>) -> bool {
        if !self.needs_fetch(aggregation) {
            return false;
        }
        self.is_fetching = true;
        self.is_fetched = false;
        self.error = None;
        self.time_aggregation = aggregation;
        true
    }

    /// Settle successfully with normalized data (possibly absent when
    /// the backend had nothing to enrich).
    pub(crate) fn settle_ok(&mut self, data: Option<T>) {
        self.is_fetching = false;
        self.is_fetched = true;
        self.error = None;
        self.data = data.map(Arc::new);
    }

    /// Settle with an error, leaving any previous data in place.
    pub(crate) fn settle_err(&mut self, message: impl Into<String>) {
        self.is_fetching = false;
        self.is_fetched = false;
        self.error = Some(message.into());
    }
}
