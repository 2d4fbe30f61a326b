//! Core utilities for office-days
//!
//! This crate provides shared functionality used by the matching library and the CLI:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **File scanning**: Recursive discovery of export files with filtering
//! - **Configuration**: TOML-based defaults for the command line flags
//! - **Validation**: Collect-all validation of user inputs
//!
//! # Example
//!
//! ```rust,no_run
//! use office_days_core::{config::Config, file_scanner::FileScanner};
//!
//! let config = Config::load(None).expect("config");
//! let files = FileScanner::new("Takeout/Location History")
//!     .with_extensions(&config.schema.input.extensions)
//!     .scan()
//!     .expect("readable input directory");
//! println!("{} export files", files.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
#[allow(missing_docs)]
pub mod error;
pub mod file_scanner;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt, exit_codes};
    pub use crate::file_scanner::FileScanner;
    pub use crate::validation::{ValidationResult, Validator};
}
