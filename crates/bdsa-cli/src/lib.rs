//! Library side of the `bdsa` command-line tool: logging setup, the TOML
//! configuration file, and the staged harmonization pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
