//! Shared utilities

pub mod constants;
