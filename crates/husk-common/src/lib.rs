//! Common utilities for the husk normalizer.
//!
//! This crate provides shared infrastructure for the other husk crates:
//! - **Warning System** - deduplicated diagnostics routed through [`log`]

pub mod warning;
