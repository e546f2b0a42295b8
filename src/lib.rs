//! How much does loop order matter for matrix multiplication?
//!
//! This crate multiplies square f64 matrices with the six possible
//! nestings of the classic triple loop (ijk, jik, kij, ikj, jki, kji) and
//! measures each one with hardware performance counters: cycles,
//! instructions, loads, stores, and L1/L2 cache misses and accesses. The
//! math is identical in all six; only the memory access pattern changes.
//!
//! ## Usage
//!
//! ```
//! use matmul_orders::{LoopOrder, Matrix};
//!
//! let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
//! let mut c = Matrix::create(2).unwrap();
//!
//! LoopOrder::Ikj.multiply(&a, &b, &mut c).unwrap();
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! ```
//!
//! Measuring needs a [`CounterBackend`]. On Linux, [`PerfBackend`] uses
//! `perf_event_open`:
//!
//! ```no_run
//! # #[cfg(target_os = "linux")]
//! # fn main() -> matmul_orders::Result<()> {
//! use matmul_orders::{BenchConfig, BenchmarkDriver, PerfBackend, TextReport};
//!
//! let mut driver = BenchmarkDriver::new(PerfBackend::new(), BenchConfig::default());
//! driver.run(&mut TextReport::new(std::io::stdout()))?;
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "linux"))]
//! # fn main() {}
//! ```
//!
//! ## What's inside
//!
//! - `matrix`: owned N×N storage, random population, seeding policy
//! - `kernels`: the six loop orders behind one [`LoopOrder`] enum
//! - `counters`: counter backend trait, scoped sessions, perf backend
//! - `driver`: the size × ordering sweep with its two measurement passes

pub mod clock;
pub mod config;
pub mod counters;
pub mod driver;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod report;

pub use config::BenchConfig;
#[cfg(target_os = "linux")]
pub use counters::PerfBackend;
pub use counters::{CounterBackend, CounterConfig, CounterSession, Event, RawCounts};
pub use driver::BenchmarkDriver;
pub use error::{BenchError, CounterError, Result};
pub use kernels::LoopOrder;
pub use matrix::{Matrix, SeedPolicy};
pub use report::{CacheSample, MeasurementResult, ReportSink, TextReport, TimingSample, miss_rate};
