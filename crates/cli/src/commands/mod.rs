//! CLI commands

pub mod completion;
pub mod generate;
pub mod serve;
pub mod validate;
