// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A last-call-wins scheduled value.
///
/// Each call to [`Debouncer::schedule`] replaces the pending value and pushes
/// the deadline out to `now + delay`. [`Debouncer::poll`] hands the value back
/// exactly once, the first time it is called at or after the deadline.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer with the given window.
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Schedules `value`, cancelling any pending one.
    pub fn schedule(&mut self, value: T, now_ms: u64) {
        let deadline = now_ms.saturating_add(self.delay_ms);
        self.pending = Some((value, deadline));
    }

    /// Returns the pending value if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now_ms >= deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Drops the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    /// Returns `true` while a value is waiting for its deadline.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending value, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(_, d)| *d)
    }
}
