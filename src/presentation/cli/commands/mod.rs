pub mod monitor;
pub mod status;
