pub mod status_fmt;
pub mod summary_fmt;
