pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod io;
pub mod issue;
pub mod markers;
pub mod paths;
pub mod pipeline;
pub mod requirements;
pub mod tool_runner;
pub mod validation;

pub use error::{Result, VtddError};
