//! Clock sources read around each timed kernel call.
//!
//! Besides the counter backend's own real-time clock, two OS clocks are
//! sampled: the calling thread's CPU-time clock and the system real-time
//! clock. All readings are in microseconds.

/// Microseconds of CPU time consumed by the calling thread.
#[cfg(unix)]
pub fn thread_cpu_usec() -> i64 {
    read_clock(libc::CLOCK_THREAD_CPUTIME_ID)
}

/// Microseconds since the UNIX epoch on the system real-time clock.
#[cfg(unix)]
pub fn real_time_usec() -> i64 {
    read_clock(libc::CLOCK_REALTIME)
}

#[cfg(unix)]
fn read_clock(clock: libc::clockid_t) -> i64 {
    // SAFETY: an all-zero timespec is valid, and clock_gettime only writes
    // through the pointer we pass.
    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::clock_gettime(clock, &mut ts) };
    if rc != 0 {
        let err = std::io::Error::last_os_error();
        tracing::warn!(clock, error = %err, "clock_gettime failed, reading as 0");
        return 0;
    }
    ts.tv_sec as i64 * 1_000_000 + ts.tv_nsec as i64 / 1_000
}

#[cfg(not(unix))]
pub fn thread_cpu_usec() -> i64 {
    // No per-thread CPU clock in std; fall back to the real-time clock.
    real_time_usec()
}

#[cfg(not(unix))]
pub fn real_time_usec() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as i64)
        .unwrap_or(0)
}

/// One reading of all three clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub backend_usec: i64,
    pub thread_cpu_usec: i64,
    pub wall_usec: i64,
}

impl ClockReading {
    /// Read the OS clocks next to an already taken backend timestamp.
    pub fn now(backend_usec: i64) -> Self {
        Self {
            backend_usec,
            thread_cpu_usec: thread_cpu_usec(),
            wall_usec: real_time_usec(),
        }
    }

    /// Per-source difference `self - start`.
    pub fn since(&self, start: &ClockReading) -> Elapsed {
        Elapsed {
            backend_usec: self.backend_usec - start.backend_usec,
            thread_cpu_usec: self.thread_cpu_usec - start.thread_cpu_usec,
            wall_usec: self.wall_usec - start.wall_usec,
        }
    }
}

/// Elapsed time of one kernel call as seen by each clock source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Elapsed {
    pub backend_usec: i64,
    pub thread_cpu_usec: i64,
    pub wall_usec: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    #[test]
    fn test_since_is_per_source() {
        let start = ClockReading {
            backend_usec: 10,
            thread_cpu_usec: 100,
            wall_usec: 1000,
        };
        let end = ClockReading {
            backend_usec: 15,
            thread_cpu_usec: 130,
            wall_usec: 1400,
        };
        assert_eq!(
            end.since(&start),
            Elapsed {
                backend_usec: 5,
                thread_cpu_usec: 30,
                wall_usec: 400
            }
        );
    }

    #[test]
    fn test_thread_cpu_clock_advances_with_work() {
        let start = thread_cpu_usec();
        let mut acc = 0u64;
        for i in 0..20_000_000u64 {
            acc = black_box(acc.wrapping_add(i * i));
        }
        black_box(acc);
        assert!(thread_cpu_usec() > start);
    }

    #[test]
    fn test_real_time_is_after_2020() {
        assert!(real_time_usec() > 1_577_836_800_000_000);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_clock_reads_as_zero() {
        // No clock has a negative id.
        assert_eq!(read_clock(-1), 0);
    }
}
