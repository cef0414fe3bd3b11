//! The decision manager: asks every voter and applies the strategy.
//!
//! Voters are consulted in registration order, each exactly once per call.
//! A voter whose `supports` answers `false` is counted as an abstention
//! without being asked to vote. A voter that fails (returns `Err` or
//! panics) is, by default, also counted as an abstention and reported to
//! the configured [`FaultObserver`]; with fault degradation switched off the
//! fault aborts the decision instead.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use warrant_core::{Actor, DecisionManager, LabelHierarchy, LabelVoter, Strategy};
//!
//! let hierarchy = Arc::new(LabelHierarchy::new([("ROLE_ADMIN", vec!["ROLE_USER"])]).unwrap());
//! let manager = DecisionManager::builder()
//!     .strategy(Strategy::Affirmative)
//!     .voter(LabelVoter::new(hierarchy))
//!     .build();
//!
//! let admin = Actor::new("root", ["ROLE_ADMIN"]);
//! assert!(manager.decide(&admin, "ROLE_USER", None));
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::actor::Actor;
use crate::config::EngineConfig;
use crate::error::{Error, Result, VoterError};
use crate::observer::{FaultObserver, LogFaultObserver};
use crate::strategy::{Strategy, StrategyPolicy};
use crate::subject::Subject;
use crate::vote::{Tally, Vote};
use crate::voter::Voter;

// ============================================================================
// Decision trace
// ============================================================================

/// What one voter contributed to a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRecord {
    /// Registered name of the voter.
    pub voter: String,
    /// The vote as counted.
    pub vote: Vote,
    /// Whether the voter's `supports` accepted the pair.
    pub supported: bool,
    /// Fault message when the voter failed and was counted as abstaining.
    pub fault: Option<String>,
}

/// A decision together with the votes that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Final outcome.
    pub granted: bool,
    /// Strategy that produced it.
    pub strategy: Strategy,
    /// Attribute that was checked.
    pub attribute: String,
    /// Vote counts.
    pub tally: Tally,
    /// Per-voter votes in registration order.
    pub votes: Vec<VoteRecord>,
}

// ============================================================================
// DecisionManager
// ============================================================================

struct RegisteredVoter {
    name: String,
    voter: Arc<dyn Voter>,
}

/// Combines the votes of an ordered, immutable set of voters.
///
/// Cheap to share behind an `Arc`; every method takes `&self` and there is
/// no interior mutability.
pub struct DecisionManager {
    voters: Vec<RegisteredVoter>,
    policy: StrategyPolicy,
    degrade_voter_faults: bool,
    observer: Arc<dyn FaultObserver>,
}

impl DecisionManager {
    /// Start building a manager.
    pub fn builder() -> DecisionManagerBuilder {
        DecisionManagerBuilder::new()
    }

    /// The strategy and sub-policies in force.
    pub fn policy(&self) -> StrategyPolicy {
        self.policy
    }

    /// The aggregation strategy in force.
    pub fn strategy(&self) -> Strategy {
        self.policy.strategy
    }

    /// Whether voter faults count as abstentions.
    pub fn degrades_voter_faults(&self) -> bool {
        self.degrade_voter_faults
    }

    /// Registered voter names, in consultation order.
    pub fn voter_names(&self) -> impl Iterator<Item = &str> {
        self.voters.iter().map(|v| v.name.as_str())
    }

    /// Number of registered voters.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Decide whether `actor` is granted `attribute` on `subject`.
    ///
    /// Never fails: a voter fault that escapes (fault degradation off) is
    /// logged and the decision fails closed.
    pub fn decide(&self, actor: &Actor, attribute: &str, subject: Option<Subject<'_>>) -> bool {
        match self.try_decide(actor, attribute, subject) {
            Ok(granted) => granted,
            Err(err) => {
                log::error!("Decision on '{attribute}' for {actor} failed closed: {err}");
                false
            }
        }
    }

    /// Like [`decide`](Self::decide), but surfaces voter faults when fault
    /// degradation is off.
    pub fn try_decide(
        &self,
        actor: &Actor,
        attribute: &str,
        subject: Option<Subject<'_>>,
    ) -> Result<bool> {
        let tally = self.poll(actor, attribute, subject, |_| {})?;
        let granted = self.policy.resolve(&tally);
        log::debug!(
            "Decision on '{attribute}' for {actor}: {} ({}, {tally})",
            verdict(granted),
            self.policy.strategy
        );
        Ok(granted)
    }

    /// Decide and return every voter's contribution alongside the outcome.
    pub fn decide_traced(
        &self,
        actor: &Actor,
        attribute: &str,
        subject: Option<Subject<'_>>,
    ) -> Result<Decision> {
        let mut votes = Vec::with_capacity(self.voters.len());
        let tally = self.poll(actor, attribute, subject, |record| votes.push(record))?;
        let granted = self.policy.resolve(&tally);
        log::debug!(
            "Traced decision on '{attribute}' for {actor}: {} ({}, {tally})",
            verdict(granted),
            self.policy.strategy
        );
        Ok(Decision {
            granted,
            strategy: self.policy.strategy,
            attribute: attribute.to_string(),
            tally,
            votes,
        })
    }

    /// Consult every voter once, in order, and tally the votes.
    fn poll(
        &self,
        actor: &Actor,
        attribute: &str,
        subject: Option<Subject<'_>>,
        mut record: impl FnMut(VoteRecord),
    ) -> Result<Tally> {
        let mut tally = Tally::default();
        for registered in &self.voters {
            let (vote, supported, fault) = self.cast(registered, actor, attribute, subject)?;
            tally.record(vote);
            record(VoteRecord {
                voter: registered.name.clone(),
                vote,
                supported,
                fault,
            });
        }
        Ok(tally)
    }

    fn cast(
        &self,
        registered: &RegisteredVoter,
        actor: &Actor,
        attribute: &str,
        subject: Option<Subject<'_>>,
    ) -> Result<(Vote, bool, Option<String>)> {
        let voter = &registered.voter;
        // Stays false if `supports` panics before answering.
        let mut supported = false;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            if voter.supports(attribute, subject) {
                supported = true;
                voter.vote(actor, attribute, subject)
            } else {
                Ok(Vote::Abstain)
            }
        }))
        .unwrap_or_else(|payload| Err(VoterError::Panicked(panic_message(&*payload))));

        match outcome {
            Ok(vote) => Ok((vote, supported, None)),
            Err(err) if self.degrade_voter_faults => {
                self.observer
                    .voter_failed(&registered.name, attribute, &err);
                Ok((Vote::Abstain, supported, Some(err.to_string())))
            }
            Err(err) => Err(Error::VoterFault {
                voter: registered.name.clone(),
                source: err,
            }),
        }
    }
}

impl fmt::Debug for DecisionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionManager")
            .field("voters", &self.voter_names().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .field("degrade_voter_faults", &self.degrade_voter_faults)
            .finish()
    }
}

fn verdict(granted: bool) -> &'static str {
    if granted { "granted" } else { "denied" }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Registered name for a voter type: the type name without path or generics.
fn short_type_name<V: ?Sized>() -> String {
    let full = std::any::type_name::<V>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

// ============================================================================
// DecisionManagerBuilder
// ============================================================================

/// Assembles a [`DecisionManager`]; the voter list is fixed once built.
pub struct DecisionManagerBuilder {
    voters: Vec<RegisteredVoter>,
    policy: StrategyPolicy,
    degrade_voter_faults: bool,
    observer: Option<Arc<dyn FaultObserver>>,
}

impl DecisionManagerBuilder {
    /// Affirmative strategy, deny sub-policies, fault degradation on, no
    /// voters.
    pub fn new() -> Self {
        Self {
            voters: Vec::new(),
            policy: StrategyPolicy::default(),
            degrade_voter_faults: true,
            observer: None,
        }
    }

    /// Apply the policy settings of an [`EngineConfig`].
    ///
    /// Voters are not touched; see [`EngineConfig::manager_builder`] for a
    /// builder with the label voter already registered.
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.policy = config.policy();
        self.degrade_voter_faults = config.degrade_voter_faults;
        self
    }

    /// Set the aggregation strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.policy.strategy = strategy;
        self
    }

    /// Replace strategy and sub-policies at once.
    pub fn policy(mut self, policy: StrategyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Outcome when every voter abstains.
    pub fn allow_if_all_abstain(mut self, allow: bool) -> Self {
        self.policy.allow_if_all_abstain = allow;
        self
    }

    /// Outcome of a consensus tie.
    pub fn allow_on_tie(mut self, allow: bool) -> Self {
        self.policy.allow_on_tie = allow;
        self
    }

    /// Whether voter faults count as abstentions (default) or abort the
    /// decision.
    pub fn degrade_voter_faults(mut self, degrade: bool) -> Self {
        self.degrade_voter_faults = degrade;
        self
    }

    /// Where degraded voter faults are reported. Defaults to
    /// [`LogFaultObserver`].
    pub fn observer(mut self, observer: Arc<dyn FaultObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Register a voter under its type name.
    pub fn voter<V: Voter + 'static>(self, voter: V) -> Self {
        let name = short_type_name::<V>();
        self.named_voter(name, voter)
    }

    /// Register a voter under an explicit name.
    pub fn named_voter<V: Voter + 'static>(self, name: impl Into<String>, voter: V) -> Self {
        self.shared_voter(name, Arc::new(voter))
    }

    /// Register an already shared voter.
    pub fn shared_voter(mut self, name: impl Into<String>, voter: Arc<dyn Voter>) -> Self {
        self.voters.push(RegisteredVoter {
            name: name.into(),
            voter,
        });
        self
    }

    /// Number of voters registered so far.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Freeze the configuration.
    pub fn build(self) -> DecisionManager {
        let manager = DecisionManager {
            voters: self.voters,
            policy: self.policy,
            degrade_voter_faults: self.degrade_voter_faults,
            observer: self
                .observer
                .unwrap_or_else(|| Arc::new(LogFaultObserver)),
        };
        log::info!(
            "Decision manager ready: {} voters, {} strategy",
            manager.voter_count(),
            manager.policy.strategy
        );
        manager
    }
}

impl Default for DecisionManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DecisionManagerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionManagerBuilder")
            .field(
                "voters",
                &self.voters.iter().map(|v| v.name.as_str()).collect::<Vec<_>>(),
            )
            .field("policy", &self.policy)
            .field("degrade_voter_faults", &self.degrade_voter_faults)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
