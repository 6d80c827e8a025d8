pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod llm;
pub mod scoring;
pub mod server;

pub use error::{Error, Result};
