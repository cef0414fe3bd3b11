#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Modules
//!
//! - [`actor`]: the identity and labels a decision is made for
//! - [`subject`]: type-erased domain objects voters may inspect
//! - [`vote`]: three-valued votes and tallies
//! - [`hierarchy`]: label implication closure
//! - [`voter`]: the `Voter` trait and built-in voters
//! - [`strategy`]: affirmative, consensus and unanimous aggregation
//! - [`manager`]: the decision manager and its builder
//! - [`facade`]: `is_granted`, the entry point for callers
//! - [`guard`]: caller-level access-denied error
//! - [`observer`]: voter fault reporting
//! - [`config`]: TOML engine configuration
//! - [`error`]: error types and `Result` alias

pub mod actor;
pub mod config;
pub mod error;
pub mod facade;
pub mod guard;
pub mod hierarchy;
pub mod manager;
pub mod observer;
pub mod strategy;
pub mod subject;
pub mod vote;
pub mod voter;

// Re-exports for convenience
pub use actor::Actor;
pub use config::{CONFIG_ENV_VAR, EngineConfig, LabelVoterConfig};
pub use error::{Error, Result, VoterError};
pub use facade::AuthorizationChecker;
pub use guard::AccessDenied;
pub use hierarchy::LabelHierarchy;
pub use manager::{Decision, DecisionManager, DecisionManagerBuilder, VoteRecord};
pub use observer::{FaultObserver, LogFaultObserver};
pub use strategy::{Strategy, StrategyPolicy};
pub use subject::Subject;
pub use vote::{Tally, Vote};
pub use voter::{
    AttributeVoter, AuthenticatedVoter, IS_AUTHENTICATED, LabelVoter, MissingLabelPolicy,
    PUBLIC_ACCESS, VoteResult, Voter,
};

mod proptests;
