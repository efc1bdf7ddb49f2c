use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique calculation identifiers. Injected so the pipeline
/// stays deterministic under test.
pub trait IdSource {
    fn next_calculation_id(&self) -> String;
}

/// Source of the calculation timestamp.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock ids: `calc-<unix-millis>-<seq>`. The sequence suffix keeps
/// ids unique when two calculations land in the same millisecond.
#[derive(Debug, Default)]
pub struct TimestampIdSource {
    counter: AtomicU64,
}

impl TimestampIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for TimestampIdSource {
    fn next_calculation_id(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("calc-{}-{}", Utc::now().timestamp_millis(), seq)
    }
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same id. Test double.
#[derive(Debug, Clone)]
pub struct FixedIdSource(pub String);

impl IdSource for FixedIdSource {
    fn next_calculation_id(&self) -> String {
        self.0.clone()
    }
}

/// Always returns the same instant. Test double.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
