//! Voter that treats the attribute itself as a label.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{VoteResult, Voter};
use crate::actor::Actor;
use crate::hierarchy::LabelHierarchy;
use crate::subject::Subject;
use crate::vote::Vote;

/// Prefix that marks an attribute as label-shaped unless configured otherwise.
pub const DEFAULT_LABEL_PREFIX: &str = "ROLE_";

/// What the [`LabelVoter`] says about a label-shaped attribute the actor
/// does not hold, even after hierarchy expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingLabelPolicy {
    /// Actively vote against.
    #[default]
    Deny,
    /// Stay out of it and let other voters decide.
    Abstain,
}

/// Grants when the attribute is one of the actor's labels, directly or
/// through the hierarchy.
///
/// Attributes not starting with the configured prefix are not labels and get
/// an abstention.
#[derive(Debug, Clone)]
pub struct LabelVoter {
    hierarchy: Arc<LabelHierarchy>,
    prefix: String,
    on_missing: MissingLabelPolicy,
}

impl LabelVoter {
    /// Create a voter over `hierarchy` with the default prefix and policy.
    pub fn new(hierarchy: Arc<LabelHierarchy>) -> Self {
        Self {
            hierarchy,
            prefix: DEFAULT_LABEL_PREFIX.to_string(),
            on_missing: MissingLabelPolicy::default(),
        }
    }

    /// Set the prefix that makes an attribute label-shaped.
    ///
    /// An empty prefix makes every attribute label-shaped.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the vote for label-shaped attributes the actor lacks.
    pub fn with_missing_policy(mut self, policy: MissingLabelPolicy) -> Self {
        self.on_missing = policy;
        self
    }

    /// Prefix in use.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Missing-label policy in use.
    pub fn missing_policy(&self) -> MissingLabelPolicy {
        self.on_missing
    }

    fn is_label(&self, attribute: &str) -> bool {
        attribute.starts_with(&self.prefix)
    }
}

impl Voter for LabelVoter {
    fn supports(&self, attribute: &str, _subject: Option<Subject<'_>>) -> bool {
        self.is_label(attribute)
    }

    fn vote(&self, actor: &Actor, attribute: &str, _subject: Option<Subject<'_>>) -> VoteResult {
        if !self.is_label(attribute) {
            return Ok(Vote::Abstain);
        }
        if self.hierarchy.reaches(actor.labels(), attribute) {
            return Ok(Vote::Grant);
        }
        Ok(match self.on_missing {
            MissingLabelPolicy::Deny => Vote::Deny,
            MissingLabelPolicy::Abstain => Vote::Abstain,
        })
    }
}
