pub mod session;
pub mod shared;

pub use session::{MonitoringSession, SessionError, SessionSnapshot, TickReport};
pub use shared::SharedSession;
