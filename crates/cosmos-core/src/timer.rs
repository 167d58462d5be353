//! Owned timer queue.
//!
//! Stands in for the one-shot and repeating callbacks of an event loop. The
//! queue holds payloads instead of closures; the owner pops due timers and
//! acts on them, so cancelling a timer is just removing its entry.

use std::time::Duration;

/// Identifier of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer that has come due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer<T> {
    pub id: TimerId,
    /// The scheduled time, which may be earlier than the time of the poll.
    pub due: Duration,
    pub payload: T,
}

#[derive(Debug, Clone)]
struct TimerEntry<T> {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    payload: T,
}

/// Timers ordered by due time, ties broken by scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    entries: Vec<TimerEntry<T>>,
    next_id: u64,
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules a timer firing once at `at`.
    pub fn schedule_once(&mut self, at: Duration, payload: T) -> TimerId {
        self.push(at, None, payload)
    }

    /// Schedules a timer firing at `first` and then every `period`.
    ///
    /// A zero period is raised to one millisecond so a poll always terminates.
    pub fn schedule_repeating(&mut self, first: Duration, period: Duration, payload: T) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.push(first, Some(period), payload)
    }

    /// Removes a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Removes every pending timer.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The earliest pending due time.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Pops the earliest timer due at or before `now`.
    ///
    /// Repeating timers are re-armed one period after their due time, so a
    /// late poll replays every missed tick in order.
    pub fn pop_due(&mut self, now: Duration) -> Option<FiredTimer<T>> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= now)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(position, _)| position)?;

        let entry = &self.entries[position];
        let period = entry.period;
        let fired = FiredTimer {
            id: entry.id,
            due: entry.due,
            payload: entry.payload.clone(),
        };

        match period {
            Some(period) => self.entries[position].due += period,
            None => {
                self.entries.swap_remove(position);
            }
        }

        Some(fired)
    }

    fn push(&mut self, due: Duration, period: Option<Duration>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            due,
            period,
            payload,
        });
        id
    }
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
