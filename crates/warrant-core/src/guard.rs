//! Caller-level access-denied signal.
//!
//! The decision path only ever answers `true` or `false`. Code that wants
//! to stop on a `false` uses
//! [`AuthorizationChecker::deny_unless_granted`](crate::AuthorizationChecker::deny_unless_granted),
//! which returns this error.

use crate::actor::Actor;
use crate::subject::Subject;

/// Raised by a caller that enforces a denied decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Access denied: {actor} lacks '{attribute}'{}", subject_suffix(.subject_type))]
pub struct AccessDenied {
    actor: String,
    identity: Option<String>,
    attribute: String,
    subject_type: Option<&'static str>,
}

impl AccessDenied {
    /// Record a denial of `attribute` for `actor`.
    pub fn new(actor: &Actor, attribute: &str, subject: Option<Subject<'_>>) -> Self {
        Self {
            actor: actor.to_string(),
            identity: actor.identity().map(str::to_string),
            attribute: attribute.to_string(),
            subject_type: subject.map(|s| s.type_name()),
        }
    }

    /// The attribute that was denied.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Identity of the denied actor; `None` for anonymous actors.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Type of the subject the check concerned, if any.
    pub fn subject_type(&self) -> Option<&'static str> {
        self.subject_type
    }
}

fn subject_suffix(subject_type: &Option<&'static str>) -> String {
    match subject_type {
        Some(ty) => format!(" on {ty}"),
        None => String::new(),
    }
}
