//! Common utilities for the Tether bridge.
//!
//! This crate provides shared infrastructure used by the bridge and the CLI:
//! - **Warning System** - colored, deduplicated terminal output for script
//!   and call failures that are not propagated as errors

pub mod warning;
