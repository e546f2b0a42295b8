//! Size × ordering sweep.
//!
//! For every size the driver allocates A, B and C, seeds the generator and
//! populates A then B. Each ordering is then measured in two passes, each
//! with its own counter session and its own kernel call:
//!
//! 1. timing pass: cycles, instructions, loads, stores and the extra event,
//!    with the backend, thread-CPU and wall clocks read around the call;
//! 2. cache pass: L1/L2 misses and accesses.
//!
//! The cache pass re-runs the kernel, so its numbers describe a second and
//! possibly warmer execution, not the one that was timed.

use tracing::{debug, info, info_span};

use crate::clock::ClockReading;
use crate::config::BenchConfig;
use crate::counters::{CounterBackend, CounterConfig, CounterSession};
use crate::error::Result;
use crate::kernels::LoopOrder;
use crate::matrix::Matrix;
use crate::report::{CacheSample, MeasurementResult, ReportSink, TimingSample};

/// Runs the benchmark sweep against one counter backend.
pub struct BenchmarkDriver<B: CounterBackend> {
    backend: B,
    config: BenchConfig,
}

impl<B: CounterBackend> BenchmarkDriver<B> {
    pub fn new(backend: B, config: BenchConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Measure every configured size in order.
    ///
    /// # Errors
    /// Stops at the first failure; no later size or ordering is measured.
    pub fn run(&mut self, sink: &mut impl ReportSink) -> Result<()> {
        info!(
            backend = self.backend.name(),
            sizes = ?self.config.sizes,
            "starting loop-order sweep"
        );
        let sizes = self.config.sizes.clone();
        for size in sizes {
            self.run_size(size, sink)?;
        }
        info!("sweep complete");
        Ok(())
    }

    /// Measure every configured ordering for one matrix size.
    pub fn run_size(&mut self, size: usize, sink: &mut impl ReportSink) -> Result<()> {
        let span = info_span!("size", size);
        let _enter = span.enter();

        let mut a = Matrix::create(size)?;
        let mut b = Matrix::create(size)?;
        let mut c = Matrix::create(size)?;

        let mut rng = self.config.seed.rng_for(size);
        a.populate(&mut rng);
        b.populate(&mut rng);
        sink.begin_size(size)?;

        let orders = self.config.orders.clone();
        for order in orders {
            let result = self.measure(order, &a, &b, &mut c)?;
            sink.result(&result)?;
        }

        a.release();
        b.release();
        c.release();
        sink.end_size(size)?;
        info!("size complete");
        Ok(())
    }

    /// Both measurement passes for one ordering.
    pub fn measure(
        &mut self,
        order: LoopOrder,
        a: &Matrix,
        b: &Matrix,
        c: &mut Matrix,
    ) -> Result<MeasurementResult> {
        let timing = self.timing_pass(order, a, b, c)?;
        let cache = self.cache_pass(order, a, b, c)?;
        debug!(
            order = order.label(),
            cycles = timing.cycles,
            wall_usec = timing.elapsed.wall_usec,
            "ordering measured"
        );
        Ok(MeasurementResult {
            size: a.size(),
            order,
            timing,
            cache,
        })
    }

    fn timing_pass(
        &mut self,
        order: LoopOrder,
        a: &Matrix,
        b: &Matrix,
        c: &mut Matrix,
    ) -> Result<TimingSample> {
        let mut session = CounterSession::configure(&mut self.backend, &CounterConfig::timing())?;
        session.start()?;
        let start = ClockReading::now(session.real_time_usec());

        order.multiply(a, b, c)?;

        let mut end = ClockReading::now(0);
        end.backend_usec = session.real_time_usec();
        let counts = session.stop()?;
        session.teardown();

        Ok(TimingSample::from_counts(&counts, end.since(&start))?)
    }

    fn cache_pass(
        &mut self,
        order: LoopOrder,
        a: &Matrix,
        b: &Matrix,
        c: &mut Matrix,
    ) -> Result<CacheSample> {
        let mut session = CounterSession::configure(&mut self.backend, &CounterConfig::cache())?;
        session.start()?;

        order.multiply(a, b, c)?;

        let counts = session.stop()?;
        session.teardown();

        Ok(CacheSample::from_counts(&counts)?)
    }
}
