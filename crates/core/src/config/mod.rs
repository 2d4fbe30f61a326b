//! Configuration loading and schema definitions
//!
//! Values from `.office-days.toml` act as defaults for the command line flags.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
