//! CLI module

pub mod args;
pub mod context;
pub mod run;
pub mod summary;

pub use args::Cli;
pub use context::Context;
