//! The authenticated context a decision is made for.

use std::collections::BTreeSet;
use std::fmt;

/// An identity plus the set of labels it has been granted.
///
/// Built by whatever authenticated the caller and handed to the engine per
/// request. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    identity: Option<String>,
    labels: BTreeSet<String>,
}

impl Actor {
    /// Create an actor with an identity and its base labels.
    ///
    /// Duplicate labels collapse; order is irrelevant.
    pub fn new<I, L>(identity: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            identity: Some(identity.into()),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// An actor with no identity and no labels.
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            labels: BTreeSet::new(),
        }
    }

    /// Add a label, returning the updated actor.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// The identity, or `None` for an anonymous actor.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Whether the actor carries an identity.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The base (unexpanded) labels.
    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// Whether the base label set contains `label`.
    ///
    /// Does not consult any hierarchy; see
    /// [`LabelHierarchy::reaches`](crate::LabelHierarchy::reaches) for that.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identity {
            Some(id) => write!(f, "{id}"),
            None => write!(f, "anonymous"),
        }
    }
}
