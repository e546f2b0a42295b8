//! Single-use counter session.

use tracing::{debug, warn};

use super::{CounterBackend, CounterConfig, CounterResult, RawCounts};
use crate::error::CounterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Configured,
    Running,
    Stopped,
    TornDown,
}

impl State {
    fn name(self) -> &'static str {
        match self {
            State::Configured => "configured",
            State::Running => "running",
            State::Stopped => "stopped",
            State::TornDown => "torn down",
        }
    }
}

/// One event set on a backend, used for exactly one measurement.
///
/// The session holds the backend mutably, so only one can be alive at a
/// time. The event set is cleaned up and destroyed exactly once, either by
/// [`teardown`](Self::teardown) or on drop, whatever happened in between.
/// A session dropped while counting is stopped first and its values are
/// discarded.
pub struct CounterSession<'b, B: CounterBackend> {
    backend: &'b mut B,
    set: Option<B::EventSet>,
    config: CounterConfig,
    state: State,
}

impl<'b, B: CounterBackend> CounterSession<'b, B> {
    /// Initialise the backend, create an event set and add every event of
    /// `config` in order.
    ///
    /// # Errors
    /// Returns the first backend failure. Anything created before the
    /// failure is torn down before returning.
    pub fn configure(backend: &'b mut B, config: &CounterConfig) -> CounterResult<Self> {
        backend.init_library()?;
        let set = backend.create_event_set()?;
        let mut session = Self {
            backend,
            set: Some(set),
            config: config.clone(),
            state: State::Configured,
        };

        if let Some(set) = session.set.as_mut() {
            for &event in config.events() {
                session.backend.add_event(set, event)?;
            }
        }
        debug!(
            backend = session.backend.name(),
            events = config.len(),
            "counter session configured"
        );
        Ok(session)
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Begin counting.
    ///
    /// # Errors
    /// Fails if the session was already started, or if the backend fails.
    pub fn start(&mut self) -> CounterResult<()> {
        let set = event_set(&mut self.set, self.state, State::Configured, "start")?;
        self.backend.start(set)?;
        self.state = State::Running;
        Ok(())
    }

    /// Stop counting and read one value per configured event, in
    /// registration order.
    ///
    /// # Errors
    /// Fails if the session is not running, if the backend fails, or if the
    /// backend returns the wrong number of values.
    pub fn stop(&mut self) -> CounterResult<RawCounts> {
        let set = event_set(&mut self.set, self.state, State::Running, "stop")?;
        let values = self.backend.stop(set);
        self.state = State::Stopped;
        RawCounts::new(self.config.events().to_vec(), values?)
    }

    /// Backend real-time clock in microseconds.
    pub fn real_time_usec(&self) -> i64 {
        self.backend.real_time_usec()
    }

    /// Clean up and destroy the event set.
    pub fn teardown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(mut set) = self.set.take() else {
            return;
        };
        if self.state == State::Running
            && let Err(e) = self.backend.stop(&mut set)
        {
            warn!(error = %e, "failed to stop counters during teardown");
        }
        self.backend.cleanup(&mut set);
        self.backend.destroy(set);
        self.state = State::TornDown;
    }
}

fn event_set<'a, S>(
    set: &'a mut Option<S>,
    state: State,
    expected: State,
    op: &'static str,
) -> CounterResult<&'a mut S> {
    match set.as_mut() {
        Some(set) if state == expected => Ok(set),
        _ => Err(CounterError::InvalidState {
            op,
            state: state.name(),
        }),
    }
}

impl<B: CounterBackend> Drop for CounterSession<'_, B> {
    fn drop(&mut self) {
        self.release();
    }
}
