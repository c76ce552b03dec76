//! pathseam-common — Shared error type, HTTP client and configuration used
//! across all Pathseam crates.

pub mod config;
pub mod error;
pub mod http;

pub use config::{KeggConfig, OutputConfig, PathseamConfig, PipelineConfig, QueryConfig};
pub use error::{PathseamError, Result};
