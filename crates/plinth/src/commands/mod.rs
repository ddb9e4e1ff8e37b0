//! Command implementations for the Plinth CLI
//!
//! Each command module handles the CLI interface and delegates to
//! plinth-core and plinth-serve for actual implementation.

pub mod build;
pub mod serve;
