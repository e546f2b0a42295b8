use thiserror::Error;

use crate::counters::Event;

/// Errors raised by the benchmark harness.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("matrix size must be positive, got {size}")]
    InvalidSize { size: usize },
    #[error("failed to allocate storage for a {size}x{size} matrix")]
    Allocation { size: usize },
    #[error("matrix dimension mismatch: expected {expected}x{expected}, got {got}x{got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("matrix buffer length mismatch: expected {expected} elements, got {got}")]
    Length { expected: usize, got: usize },
    #[error(transparent)]
    Counter(#[from] CounterError),
    #[error("failed to write report")]
    Io(#[from] std::io::Error),
}

/// Failures reported by a performance-counter backend or by session misuse.
#[derive(Error, Debug)]
pub enum CounterError {
    #[error("counter library init failed")]
    Init(#[source] std::io::Error),
    #[error("failed to create event set")]
    CreateEventSet(#[source] std::io::Error),
    #[error("failed to add event {event}")]
    AddEvent {
        event: Event,
        #[source]
        source: std::io::Error,
    },
    #[error("event {event} is not supported by the {backend} backend")]
    UnsupportedEvent { event: Event, backend: String },
    #[error("failed to start counting")]
    Start(#[source] std::io::Error),
    #[error("failed to stop counting")]
    Stop(#[source] std::io::Error),
    #[error("event {event} was not configured for this session")]
    MissingEvent { event: Event },
    #[error("backend returned {got} counts for {expected} configured events")]
    CountMismatch { expected: usize, got: usize },
    #[error("cannot {op} a session that is {state}")]
    InvalidState {
        op: &'static str,
        state: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, BenchError>;
