pub mod alert;
pub mod recommendation;
pub mod sample;

pub use alert::Alert;
pub use recommendation::Recommendation;
pub use sample::Sample;
