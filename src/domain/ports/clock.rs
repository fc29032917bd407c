use chrono::{DateTime, Utc};

/// Source of wall-clock time. The session enforces its duration limit
/// by elapsed time, not tick count; injecting the clock keeps the
/// state machine testable without a real timer.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
