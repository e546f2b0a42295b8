//! Hardware performance counters.
//!
//! A [`CounterBackend`] is the raw counting facility (Linux perf events in
//! production, scripted fakes in tests). A [`CounterSession`] wraps one
//! backend event set for exactly one measurement: configure, start, stop,
//! teardown.
//!
//! Event order is part of the contract: `stop` returns one value per
//! configured event, in the order the events were added.

#[cfg(target_os = "linux")]
pub mod perf;
pub mod session;

use std::fmt;

use crate::error::CounterError;

#[cfg(target_os = "linux")]
pub use perf::PerfBackend;
pub use session::CounterSession;

pub type CounterResult<T> = std::result::Result<T, CounterError>;

/// A countable hardware event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Cycles,
    Instructions,
    Loads,
    Stores,
    L1Misses,
    L2Misses,
    L1Accesses,
    L2Accesses,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Cycles => "cycles",
            Event::Instructions => "instructions",
            Event::Loads => "load instructions",
            Event::Stores => "store instructions",
            Event::L1Misses => "L1 data cache misses",
            Event::L2Misses => "L2 data cache misses",
            Event::L1Accesses => "L1 data cache accesses",
            Event::L2Accesses => "L2 data cache accesses",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of events registered together for one measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    events: Vec<Event>,
}

impl CounterConfig {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Events for the timing pass. The fifth slot is the extra event the
    /// report shows next to the instruction mix.
    pub fn timing() -> Self {
        Self::new(vec![
            Event::Cycles,
            Event::Instructions,
            Event::Loads,
            Event::Stores,
            Event::L1Misses,
        ])
    }

    /// Events for the cache pass.
    pub fn cache() -> Self {
        Self::new(vec![
            Event::L1Misses,
            Event::L2Misses,
            Event::L1Accesses,
            Event::L2Accesses,
        ])
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Values read at the end of a session, paired with their events in
/// registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCounts {
    events: Vec<Event>,
    values: Vec<u64>,
}

impl RawCounts {
    /// # Errors
    /// Returns [`CounterError::CountMismatch`] if the lengths differ.
    pub fn new(events: Vec<Event>, values: Vec<u64>) -> CounterResult<Self> {
        if events.len() != values.len() {
            return Err(CounterError::CountMismatch {
                expected: events.len(),
                got: values.len(),
            });
        }
        Ok(Self { events, values })
    }

    /// Value of the first slot registered for `event`.
    pub fn get(&self, event: Event) -> Option<u64> {
        self.events
            .iter()
            .position(|&e| e == event)
            .map(|i| self.values[i])
    }

    /// Like [`get`](Self::get), but a missing event is an error.
    pub fn require(&self, event: Event) -> CounterResult<u64> {
        self.get(event).ok_or(CounterError::MissingEvent { event })
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Event, u64)> + '_ {
        self.events.iter().copied().zip(self.values.iter().copied())
    }
}

/// A raw performance-counter facility.
///
/// Mirrors the classic counter-library lifecycle: initialise the library,
/// create an event set, add events, start, stop (reading values in
/// registration order), then clean up and destroy the set. Every fallible
/// step reports a [`CounterError`]; nothing here exits the process.
pub trait CounterBackend {
    /// Backend-specific handle for one event set.
    type EventSet;

    /// Returns the name of this backend (e.g., "perf").
    fn name(&self) -> &str;

    /// Prepare the backend. Must be safe to call more than once.
    fn init_library(&mut self) -> CounterResult<()>;

    fn create_event_set(&mut self) -> CounterResult<Self::EventSet>;

    fn add_event(&mut self, set: &mut Self::EventSet, event: Event) -> CounterResult<()>;

    /// Begin counting for the calling thread.
    fn start(&mut self, set: &mut Self::EventSet) -> CounterResult<()>;

    /// Stop counting and return one value per added event, in order.
    fn stop(&mut self, set: &mut Self::EventSet) -> CounterResult<Vec<u64>>;

    /// Remove all events from the set.
    fn cleanup(&mut self, set: &mut Self::EventSet);

    /// Release the set.
    fn destroy(&mut self, set: Self::EventSet);

    /// Backend real-time clock in microseconds.
    fn real_time_usec(&self) -> i64;
}
