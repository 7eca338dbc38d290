//! [`Watchdog`] – tick-cadence health monitor.
//!
//! The outer control loop registers each supervisor with a deadline (a
//! small multiple of the tick period) and beats it after every
//! completed tick. When a slow sensor read or a wedged driver makes a
//! supervisor overrun its deadline, [`Watchdog::overdue`] reports it
//! so the operator log shows the overrun.
//!
//! Strictly observational: the watchdog never gates the safety
//! supervisor's output and never stops the loop.

use std::collections::HashMap;
use std::time::{Duration, Instant};

struct Entry {
    last_beat: Instant,
    deadline: Duration,
}

/// Tracks heartbeats from the registered supervisors.
#[derive(Default)]
pub struct Watchdog {
    entries: HashMap<String, Entry>,
}

impl Watchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` with a heartbeat `deadline`. The entry starts
    /// fresh (beaten now); re-registering resets it.
    pub fn register(&mut self, id: &str, deadline: Duration) {
        self.entries.insert(
            id.to_string(),
            Entry {
                last_beat: Instant::now(),
                deadline,
            },
        );
    }

    /// Record a completed tick for `id`. Unknown ids are ignored.
    pub fn beat(&mut self, id: &str) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.last_beat = Instant::now();
        }
    }

    /// `true` when `id` is registered and within its deadline.
    pub fn is_healthy(&self, id: &str) -> bool {
        self.entries
            .get(id)
            .is_some_and(|e| e.last_beat.elapsed() <= e.deadline)
    }

    /// Ids of every supervisor past its deadline, in unspecified order.
    pub fn overdue(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.last_beat.elapsed() > e.deadline)
            .map(|(id, _)| id.clone())
            .collect()
    }
}
