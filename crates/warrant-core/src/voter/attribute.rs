//! Closure-backed voter for a fixed set of attributes on one subject type.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use super::{VoteResult, Voter};
use crate::actor::Actor;
use crate::subject::Subject;
use crate::vote::Vote;

/// Votes on a known list of attributes when the subject is a `T`.
///
/// Handles the `supports` check and the downcast; the closure only sees
/// attributes from the list and a typed subject. Anything else abstains.
///
/// ```rust
/// use warrant_core::{Actor, AttributeVoter, Subject, Vote, Voter};
///
/// struct Document {
///     author: String,
/// }
///
/// let voter = AttributeVoter::new(["CAN_DELETE"], |actor: &Actor, _attr: &str, doc: &Document| {
///     Ok(Vote::grant_if(actor.identity() == Some(doc.author.as_str())))
/// });
///
/// let doc = Document { author: "alice".into() };
/// let alice = Actor::new("alice", ["ROLE_USER"]);
/// assert_eq!(voter.vote(&alice, "CAN_DELETE", Some(Subject::new(&doc))).ok(), Some(Vote::Grant));
/// ```
pub struct AttributeVoter<T, F> {
    attributes: Vec<String>,
    decide: F,
    _subject: PhantomData<fn() -> T>,
}

impl<T, F> AttributeVoter<T, F>
where
    T: Any,
    F: Fn(&Actor, &str, &T) -> VoteResult + Send + Sync,
{
    /// Create a voter for `attributes` that delegates to `decide`.
    pub fn new<I, S>(attributes: I, decide: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
            decide,
            _subject: PhantomData,
        }
    }

    /// Attributes this voter has an opinion on.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    fn handles(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}

impl<T, F> Voter for AttributeVoter<T, F>
where
    T: Any,
    F: Fn(&Actor, &str, &T) -> VoteResult + Send + Sync,
{
    fn supports(&self, attribute: &str, subject: Option<Subject<'_>>) -> bool {
        self.handles(attribute) && subject.is_some_and(|s| s.is::<T>())
    }

    fn vote(&self, actor: &Actor, attribute: &str, subject: Option<Subject<'_>>) -> VoteResult {
        if !self.handles(attribute) {
            return Ok(Vote::Abstain);
        }
        match subject.and_then(|s| s.downcast_ref::<T>()) {
            Some(typed) => (self.decide)(actor, attribute, typed),
            None => Ok(Vote::Abstain),
        }
    }
}

impl<T, F> fmt::Debug for AttributeVoter<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeVoter")
            .field("attributes", &self.attributes)
            .field("subject", &std::any::type_name::<T>())
            .finish()
    }
}
