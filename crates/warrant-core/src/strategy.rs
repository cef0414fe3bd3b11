//! Strategies for combining votes into one decision.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::vote::Tally;

/// How the votes of all registered voters are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Grant if anyone grants.
    #[default]
    Affirmative,
    /// Grant if grants outnumber denials.
    Consensus,
    /// Grant if someone grants and nobody denies.
    Unanimous,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Affirmative => write!(f, "affirmative"),
            Self::Consensus => write!(f, "consensus"),
            Self::Unanimous => write!(f, "unanimous"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "affirmative" => Ok(Self::Affirmative),
            "consensus" => Ok(Self::Consensus),
            "unanimous" => Ok(Self::Unanimous),
            other => Err(Error::config(format!(
                "unknown strategy '{other}' (expected affirmative, consensus or unanimous)"
            ))),
        }
    }
}

/// A strategy together with its all-abstain and tie-break sub-policies.
///
/// Both sub-policies default to deny.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyPolicy {
    /// Aggregation rule.
    pub strategy: Strategy,
    /// Outcome when no voter grants or denies.
    pub allow_if_all_abstain: bool,
    /// Outcome of a non-zero grant/deny tie under [`Strategy::Consensus`].
    pub allow_on_tie: bool,
}

impl StrategyPolicy {
    /// Policy for `strategy` with both sub-policies set to deny.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Set the all-abstain outcome.
    pub fn allow_if_all_abstain(mut self, allow: bool) -> Self {
        self.allow_if_all_abstain = allow;
        self
    }

    /// Set the consensus tie outcome.
    pub fn allow_on_tie(mut self, allow: bool) -> Self {
        self.allow_on_tie = allow;
        self
    }

    /// Turn a tally into a decision.
    pub fn resolve(&self, tally: &Tally) -> bool {
        if tally.all_abstained() {
            return self.allow_if_all_abstain;
        }
        match self.strategy {
            Strategy::Affirmative => tally.grant > 0,
            Strategy::Consensus => match tally.grant.cmp(&tally.deny) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => self.allow_on_tie,
            },
            Strategy::Unanimous => tally.grant > 0 && tally.deny == 0,
        }
    }
}
