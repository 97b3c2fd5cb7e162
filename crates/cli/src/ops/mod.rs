//! Reusable registry operations
//!
//! Used by `generate` and `serve` so both load and render a registry the same way.

pub mod registry;
