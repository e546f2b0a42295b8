//! Measurement records and their text rendering.

use std::io::{self, Write};

use crate::clock::Elapsed;
use crate::counters::{CounterResult, Event, RawCounts};
use crate::kernels::LoopOrder;

/// Cache misses divided by cache accesses.
///
/// Returns `None` when `accesses` is zero: the rate is undefined for a pass
/// that recorded no accesses.
pub fn miss_rate(misses: u64, accesses: u64) -> Option<f64> {
    if accesses == 0 {
        return None;
    }
    Some(misses as f64 / accesses as f64)
}

/// Counts from the timing pass plus the three elapsed times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSample {
    pub cycles: u64,
    pub instructions: u64,
    pub loads: u64,
    pub stores: u64,
    /// The fifth event of the timing set (L1 data cache misses).
    pub extra: u64,
    pub elapsed: Elapsed,
}

impl TimingSample {
    pub fn from_counts(counts: &RawCounts, elapsed: Elapsed) -> CounterResult<Self> {
        Ok(Self {
            cycles: counts.require(Event::Cycles)?,
            instructions: counts.require(Event::Instructions)?,
            loads: counts.require(Event::Loads)?,
            stores: counts.require(Event::Stores)?,
            extra: counts.require(Event::L1Misses)?,
            elapsed,
        })
    }
}

/// Counts from the cache pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheSample {
    pub l1_misses: u64,
    pub l2_misses: u64,
    pub l1_accesses: u64,
    pub l2_accesses: u64,
}

impl CacheSample {
    pub fn from_counts(counts: &RawCounts) -> CounterResult<Self> {
        Ok(Self {
            l1_misses: counts.require(Event::L1Misses)?,
            l2_misses: counts.require(Event::L2Misses)?,
            l1_accesses: counts.require(Event::L1Accesses)?,
            l2_accesses: counts.require(Event::L2Accesses)?,
        })
    }

    pub fn l1_miss_rate(&self) -> Option<f64> {
        miss_rate(self.l1_misses, self.l1_accesses)
    }

    pub fn l2_miss_rate(&self) -> Option<f64> {
        miss_rate(self.l2_misses, self.l2_accesses)
    }
}

/// Everything measured for one (size, ordering) pair.
///
/// `timing` and `cache` come from two separate kernel runs; the cache
/// numbers describe the second run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementResult {
    pub size: usize,
    pub order: LoopOrder,
    pub timing: TimingSample,
    pub cache: CacheSample,
}

/// Receives results as the driver produces them.
pub trait ReportSink {
    fn begin_size(&mut self, _size: usize) -> io::Result<()> {
        Ok(())
    }

    fn result(&mut self, result: &MeasurementResult) -> io::Result<()>;

    fn end_size(&mut self, _size: usize) -> io::Result<()> {
        Ok(())
    }
}

impl ReportSink for Vec<MeasurementResult> {
    fn result(&mut self, result: &MeasurementResult) -> io::Result<()> {
        self.push(*result);
        Ok(())
    }
}

fn percent(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "undefined".to_string(),
    }
}

/// Plain-text report, one block per ordering.
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn begin_size(&mut self, size: usize) -> io::Result<()> {
        writeln!(self.out, "Matrix A ({size} x {size})")?;
        writeln!(self.out, "Matrix B ({size} x {size})")?;
        writeln!(self.out)
    }

    fn result(&mut self, r: &MeasurementResult) -> io::Result<()> {
        let o = r.order.label();
        let t = &r.timing;
        let e = &t.elapsed;
        let c = &r.cache;
        let l1_rate = percent(c.l1_miss_rate());
        let l2_rate = percent(c.l2_miss_rate());
        writeln!(self.out, "Result of {o}:")?;
        writeln!(self.out, "{o} cycles: {}", t.cycles)?;
        writeln!(self.out, "{o} instructions: {}", t.instructions)?;
        writeln!(self.out, "{o} load instructions: {}", t.loads)?;
        writeln!(self.out, "{o} store instructions: {}", t.stores)?;
        writeln!(self.out, "{o} L1 misses (timing pass): {}", t.extra)?;
        writeln!(self.out, "{o} backend time: {} us", e.backend_usec)?;
        writeln!(self.out, "{o} thread CPU time: {} us", e.thread_cpu_usec)?;
        writeln!(self.out, "{o} wall time: {} us", e.wall_usec)?;
        writeln!(self.out, "{o} L1 cache misses: {}", c.l1_misses)?;
        writeln!(self.out, "{o} L2 cache misses: {}", c.l2_misses)?;
        writeln!(self.out, "{o} L1 cache accesses: {}", c.l1_accesses)?;
        writeln!(self.out, "{o} L2 cache accesses: {}", c.l2_accesses)?;
        writeln!(self.out, "{o} L1 cache miss rate: {l1_rate}")?;
        writeln!(self.out, "{o} L2 cache miss rate: {l2_rate}")?;
        writeln!(self.out)
    }

    fn end_size(&mut self, size: usize) -> io::Result<()> {
        writeln!(self.out, "Matrix multiplication for size {size} completed")?;
        self.out.flush()
    }
}
