//! vitals — hardware telemetry monitoring and alerting engine.
//!
//! Hexagonal layout: `domain` holds the classification and
//! recommendation rules behind trait ports, `application` the session
//! lifecycle, configuration and export rendering, `infrastructure` the
//! sysinfo-backed sampler and file sink, `presentation` the CLI.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
