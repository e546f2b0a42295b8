//! Linux `perf_event_open` backend.
//!
//! Each event set is a perf counter group, so all of its counters are
//! enabled and disabled together. Events map onto the generic perf
//! hardware and cache events:
//!
//! | event          | perf event                    |
//! |----------------|-------------------------------|
//! | cycles         | `CPU_CYCLES`                  |
//! | instructions   | `INSTRUCTIONS`                |
//! | loads          | L1D read accesses             |
//! | stores         | L1D write accesses            |
//! | L1 misses      | L1D read misses               |
//! | L1 accesses    | L1D read accesses             |
//! | L2 misses      | last-level cache read misses  |
//! | L2 accesses    | last-level cache read accesses|
//!
//! The generic perf ABI has no dedicated L2 event, so "L2" here means the
//! last-level cache.

use std::io;
use std::time::Instant;

use perf_event::events::{self, Cache, CacheOp, CacheResult, Hardware, WhichCache};
use perf_event::{Builder, Counter, Group};
use tracing::{debug, warn};

use super::{CounterBackend, CounterResult, Event};
use crate::error::CounterError;

/// Event set handle: the perf group and its counters in registration order.
pub struct PerfEventSet {
    group: Group,
    counters: Vec<Counter>,
}

/// Counts the calling process with Linux perf events.
#[derive(Debug)]
pub struct PerfBackend {
    epoch: Instant,
    initialized: bool,
}

impl PerfBackend {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            initialized: false,
        }
    }

    fn perf_kind(event: Event) -> events::Event {
        let cache = |which, operation, result| -> events::Event {
            Cache {
                which,
                operation,
                result,
            }
            .into()
        };
        match event {
            Event::Cycles => Hardware::CPU_CYCLES.into(),
            Event::Instructions => Hardware::INSTRUCTIONS.into(),
            Event::Loads | Event::L1Accesses => {
                cache(WhichCache::L1D, CacheOp::READ, CacheResult::ACCESS)
            }
            Event::Stores => cache(WhichCache::L1D, CacheOp::WRITE, CacheResult::ACCESS),
            Event::L1Misses => cache(WhichCache::L1D, CacheOp::READ, CacheResult::MISS),
            Event::L2Misses => cache(WhichCache::LL, CacheOp::READ, CacheResult::MISS),
            Event::L2Accesses => cache(WhichCache::LL, CacheOp::READ, CacheResult::ACCESS),
        }
    }
}

impl Default for PerfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterBackend for PerfBackend {
    type EventSet = PerfEventSet;

    fn name(&self) -> &str {
        "perf"
    }

    fn init_library(&mut self) -> CounterResult<()> {
        if self.initialized {
            return Ok(());
        }
        // Opening a group is the cheapest way to find out whether
        // perf_event_open is permitted at all.
        Group::new().map_err(CounterError::Init)?;
        self.initialized = true;
        debug!("perf backend initialised");
        Ok(())
    }

    fn create_event_set(&mut self) -> CounterResult<PerfEventSet> {
        let group = Group::new().map_err(CounterError::CreateEventSet)?;
        Ok(PerfEventSet {
            group,
            counters: Vec::new(),
        })
    }

    fn add_event(&mut self, set: &mut PerfEventSet, event: Event) -> CounterResult<()> {
        let counter = Builder::new()
            .group(&mut set.group)
            .kind(Self::perf_kind(event))
            .build()
            .map_err(|source| CounterError::AddEvent { event, source })?;
        set.counters.push(counter);
        Ok(())
    }

    fn start(&mut self, set: &mut PerfEventSet) -> CounterResult<()> {
        set.group.reset().map_err(CounterError::Start)?;
        set.group.enable().map_err(CounterError::Start)
    }

    fn stop(&mut self, set: &mut PerfEventSet) -> CounterResult<Vec<u64>> {
        set.group.disable().map_err(CounterError::Stop)?;
        let counts = set.group.read().map_err(CounterError::Stop)?;

        if counts.time_running() < counts.time_enabled() {
            warn!(
                enabled_ns = counts.time_enabled(),
                running_ns = counts.time_running(),
                "counter group was multiplexed, counts are partial"
            );
        }
        if counts.time_running() == 0 && !set.counters.is_empty() {
            return Err(CounterError::Stop(io::Error::other(
                "counter group was never scheduled on the PMU",
            )));
        }

        Ok(set.counters.iter().map(|c| counts[c]).collect())
    }

    fn cleanup(&mut self, set: &mut PerfEventSet) {
        set.counters.clear();
    }

    fn destroy(&mut self, set: PerfEventSet) {
        drop(set);
    }

    fn real_time_usec(&self) -> i64 {
        self.epoch.elapsed().as_micros() as i64
    }
}
