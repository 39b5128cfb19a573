pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod packages;
pub mod publisher;
pub mod resolver;
pub mod retag;
pub mod ui;

pub use error::{BumpError, Result};
