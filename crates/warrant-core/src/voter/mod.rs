//! Voter trait and built-in voters.
//!
//! This module defines the [`Voter`] trait that every decision unit
//! implements. The [`DecisionManager`](crate::DecisionManager) asks each
//! registered voter in turn and combines the answers.
//!
//! # Voters
//!
//! - [`LabelVoter`]: treats the attribute as a label and checks the actor's
//!   hierarchy-expanded labels
//! - [`AuthenticatedVoter`]: answers `IS_AUTHENTICATED` and `PUBLIC_ACCESS`
//! - [`AttributeVoter`]: closure-backed voter for application attributes
//!
//! # Example
//!
//! ```rust
//! use warrant_core::{Actor, Subject, Vote, VoteResult, Voter};
//!
//! struct Post {
//!     owner: String,
//! }
//!
//! struct PostVoter;
//!
//! impl Voter for PostVoter {
//!     fn supports(&self, attribute: &str, subject: Option<Subject<'_>>) -> bool {
//!         attribute == "CAN_EDIT_POST" && subject.is_some_and(|s| s.is::<Post>())
//!     }
//!
//!     fn vote(&self, actor: &Actor, _attribute: &str, subject: Option<Subject<'_>>) -> VoteResult {
//!         let Some(post) = subject.and_then(|s| s.downcast_ref::<Post>()) else {
//!             return Ok(Vote::Abstain);
//!         };
//!         Ok(Vote::grant_if(actor.identity() == Some(post.owner.as_str())))
//!     }
//! }
//! ```

mod attribute;
mod authenticated;
mod label;

pub use attribute::AttributeVoter;
pub use authenticated::{AuthenticatedVoter, IS_AUTHENTICATED, PUBLIC_ACCESS};
pub use label::{DEFAULT_LABEL_PREFIX, LabelVoter, MissingLabelPolicy};

use crate::actor::Actor;
use crate::error::VoterError;
use crate::subject::Subject;
use crate::vote::Vote;

/// Outcome of a single [`Voter::vote`] call.
pub type VoteResult = std::result::Result<Vote, VoterError>;

/// A polymorphic decision unit.
///
/// Implementations must be pure functions of their inputs plus whatever
/// read-only data they were constructed with. A voter that does not handle
/// an attribute returns `Ok(Vote::Abstain)`; `Err` is reserved for genuine
/// malfunctions (a lookup that failed, an invariant that broke).
pub trait Voter: Send + Sync {
    /// Cheap pre-check: can this voter have an opinion on the pair?
    ///
    /// Returning `false` makes the manager count an abstention without
    /// calling [`vote`](Voter::vote). It must never change the outcome, so a
    /// voter whose `vote` already abstains for unsupported input may simply
    /// return `true`.
    fn supports(&self, attribute: &str, subject: Option<Subject<'_>>) -> bool;

    /// Decide on `attribute` for `actor`, optionally about `subject`.
    fn vote(&self, actor: &Actor, attribute: &str, subject: Option<Subject<'_>>) -> VoteResult;
}

impl<V: Voter + ?Sized> Voter for std::sync::Arc<V> {
    fn supports(&self, attribute: &str, subject: Option<Subject<'_>>) -> bool {
        (**self).supports(attribute, subject)
    }

    fn vote(&self, actor: &Actor, attribute: &str, subject: Option<Subject<'_>>) -> VoteResult {
        (**self).vote(actor, attribute, subject)
    }
}

impl<V: Voter + ?Sized> Voter for Box<V> {
    fn supports(&self, attribute: &str, subject: Option<Subject<'_>>) -> bool {
        (**self).supports(attribute, subject)
    }

    fn vote(&self, actor: &Actor, attribute: &str, subject: Option<Subject<'_>>) -> VoteResult {
        (**self).vote(actor, attribute, subject)
    }
}
