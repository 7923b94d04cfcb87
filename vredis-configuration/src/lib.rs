#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod error;
pub mod file;

pub use error::ConfigError;
pub use file::ConfigFile;
