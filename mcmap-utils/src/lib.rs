//! Shared helpers for the mcmap crates.

pub mod debug;
