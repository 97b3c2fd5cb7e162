//! Shared helpers for commands

pub mod config;
