//! CLI utilities for office-days
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Progress indicators

#![warn(missing_docs)]

pub mod output;
pub mod progress;
