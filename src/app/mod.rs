//! Application glue module
//!
//! Configuration shared by the library entry points and the command line tool.

mod config;

pub use config::{ConfigError, ImportConfig};
