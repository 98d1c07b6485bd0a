//! Utility modules

pub mod encoding;
pub mod path;
pub mod strings;
