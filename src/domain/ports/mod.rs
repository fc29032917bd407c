pub mod clock;
pub mod export;
pub mod sampler;

pub use clock::Clock;
pub use export::{ExportError, ExportSink};
pub use sampler::{HardwareSampler, SampleError};
