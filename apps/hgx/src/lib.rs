//! # hgx
//!
//! Library side of the `hgx` binary: CLI definitions, configuration,
//! edge-list input and the application error type.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;

pub use config::AppConfig;
pub use error::AppError;
