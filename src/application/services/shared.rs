use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use crate::application::services::session::{
    MonitoringSession, SessionError, SessionSnapshot, TickReport,
};
use crate::domain::ports::sampler::HardwareSampler;

/// Thread-safe handle around a [`MonitoringSession`].
///
/// Mutations serialize on an inner mutex, so at most one tick is in
/// flight at a time. Reads go through a separately published snapshot:
/// `snapshot()` never waits for a tick in progress, it returns the copy
/// published after the previous mutation.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<MonitoringSession>>,
    published: Arc<RwLock<SessionSnapshot>>,
}

impl SharedSession {
    #[must_use]
    pub fn new(session: MonitoringSession) -> Self {
        let published = session.snapshot();
        Self {
            inner: Arc::new(Mutex::new(session)),
            published: Arc::new(RwLock::new(published)),
        }
    }

    /// # Errors
    ///
    /// Propagates [`MonitoringSession::start`] errors.
    pub fn start(
        &self,
        duration_minutes: u64,
        tick_interval: Duration,
    ) -> Result<(), SessionError> {
        let mut session = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        session.start(duration_minutes, tick_interval)?;
        self.publish(session.snapshot());
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates [`MonitoringSession::tick`] errors.
    pub fn tick(&self, sampler: &dyn HardwareSampler) -> Result<TickReport, SessionError> {
        let mut session = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let report = session.tick(sampler)?;
        self.publish(session.snapshot());
        Ok(report)
    }

    /// # Errors
    ///
    /// Propagates [`MonitoringSession::stop`] errors.
    pub fn stop(&self) -> Result<(), SessionError> {
        let mut session = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        session.stop()?;
        self.publish(session.snapshot());
        Ok(())
    }

    /// Last published state. Safe to call from any thread, at any time.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, snapshot: SessionSnapshot) {
        *self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}
