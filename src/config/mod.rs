//! Configuration module for Dead-Seeker
//!
//! This module handles defaults, loading an optional TOML configuration file,
//! and validating the result.
//!
//! # Example
//!
//! ```no_run
//! use dead_seeker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("dead-seeker.toml")).unwrap();
//! println!("Crawl depth: {:?}", config.depth());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{defaults, SeekerConfig};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config, parse_flag, read_config, split_list};
pub use validation::{validate, validate_seeds};
