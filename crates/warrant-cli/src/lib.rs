//! # warrant-cli
//!
//! Command-line front end for the Warrant decision engine:
//! - Evaluate a check for an ad-hoc actor (`warrant check`)
//! - Show what a label set expands to (`warrant expand`)
//! - Validate or print the engine configuration (`warrant config`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;

pub use error::{Error, Result};
