use chrono::{DateTime, SubsecRound, Utc};

/// Source of the signing instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant. Used to make signatures reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    #[inline]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Drops sub-second precision; SigV4 timestamps have one-second resolution.
#[inline]
pub(crate) fn signing_instant(clock: &dyn Clock) -> DateTime<Utc> {
    clock.now().trunc_subsecs(0)
}
