//! The entry point request handlers and view helpers call.

use std::any::Any;
use std::sync::Arc;

use crate::actor::Actor;
use crate::error::Result;
use crate::guard::AccessDenied;
use crate::manager::{Decision, DecisionManager};
use crate::subject::Subject;

/// Answers "is this actor granted this attribute?".
///
/// A thin, cloneable handle over a shared [`DecisionManager`]. Denial is
/// always `false`, never an error.
#[derive(Debug, Clone)]
pub struct AuthorizationChecker {
    manager: Arc<DecisionManager>,
}

impl AuthorizationChecker {
    /// Wrap a manager.
    pub fn new(manager: DecisionManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }

    /// Wrap an already shared manager.
    pub fn from_shared(manager: Arc<DecisionManager>) -> Self {
        Self { manager }
    }

    /// The underlying manager.
    pub fn manager(&self) -> &DecisionManager {
        &self.manager
    }

    /// Whether `actor` is granted `attribute`, optionally on `subject`.
    pub fn is_granted(&self, actor: &Actor, attribute: &str, subject: Option<Subject<'_>>) -> bool {
        self.manager.decide(actor, attribute, subject)
    }

    /// [`is_granted`](Self::is_granted) on a concrete domain object.
    pub fn is_granted_on<T: Any>(&self, actor: &Actor, attribute: &str, subject: &T) -> bool {
        self.is_granted(actor, attribute, Some(Subject::new(subject)))
    }

    /// Like [`is_granted`](Self::is_granted), but surfaces voter faults when
    /// the manager does not degrade them.
    pub fn try_is_granted(
        &self,
        actor: &Actor,
        attribute: &str,
        subject: Option<Subject<'_>>,
    ) -> Result<bool> {
        self.manager.try_decide(actor, attribute, subject)
    }

    /// The decision with its per-voter trace.
    pub fn explain(
        &self,
        actor: &Actor,
        attribute: &str,
        subject: Option<Subject<'_>>,
    ) -> Result<Decision> {
        self.manager.decide_traced(actor, attribute, subject)
    }

    /// `Ok(())` when granted, [`AccessDenied`] otherwise.
    ///
    /// For callers that enforce rather than branch, e.g. a handler that turns
    /// the error into a 403.
    pub fn deny_unless_granted(
        &self,
        actor: &Actor,
        attribute: &str,
        subject: Option<Subject<'_>>,
    ) -> std::result::Result<(), AccessDenied> {
        if self.is_granted(actor, attribute, subject) {
            Ok(())
        } else {
            Err(AccessDenied::new(actor, attribute, subject))
        }
    }
}

impl From<DecisionManager> for AuthorizationChecker {
    fn from(manager: DecisionManager) -> Self {
        Self::new(manager)
    }
}
