//! Votes and vote tallies.

use std::fmt;

/// One voter's opinion on one (attribute, subject) pair.
///
/// Three-valued on purpose: "no opinion" and "actively against" are
/// different things.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    /// The voter grants access.
    Grant,
    /// The voter denies access.
    Deny,
    /// The voter has no opinion.
    Abstain,
}

impl Vote {
    /// `Grant` when `condition` holds, `Deny` otherwise.
    pub fn grant_if(condition: bool) -> Self {
        if condition { Vote::Grant } else { Vote::Deny }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grant => write!(f, "grant"),
            Self::Deny => write!(f, "deny"),
            Self::Abstain => write!(f, "abstain"),
        }
    }
}

/// Counts of each vote kind for one decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Number of `Grant` votes.
    pub grant: usize,
    /// Number of `Deny` votes.
    pub deny: usize,
    /// Number of `Abstain` votes, including unsupported and faulted voters.
    pub abstain: usize,
}

impl Tally {
    /// Record one vote.
    pub fn record(&mut self, vote: Vote) {
        match vote {
            Vote::Grant => self.grant += 1,
            Vote::Deny => self.deny += 1,
            Vote::Abstain => self.abstain += 1,
        }
    }

    /// True when nobody voted `Grant` or `Deny`.
    pub fn all_abstained(&self) -> bool {
        self.grant == 0 && self.deny == 0
    }

    /// Total number of votes recorded.
    pub fn total(&self) -> usize {
        self.grant + self.deny + self.abstain
    }
}

impl FromIterator<Vote> for Tally {
    fn from_iter<I: IntoIterator<Item = Vote>>(iter: I) -> Self {
        let mut tally = Tally::default();
        for vote in iter {
            tally.record(vote);
        }
        tally
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} grant / {} deny / {} abstain",
            self.grant, self.deny, self.abstain
        )
    }
}
