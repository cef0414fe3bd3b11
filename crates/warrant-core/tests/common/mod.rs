//! Shared fixtures: a forum post domain and its voters.

use std::sync::Arc;

use warrant_core::{
    Actor, AuthorizationChecker, EngineConfig, LabelHierarchy, Strategy, Subject, Vote,
    VoteResult, Voter, VoterError,
};

/// Attribute checked before editing a post.
pub const CAN_EDIT_POST: &str = "CAN_EDIT_POST";

/// A forum post as the application stores it.
#[derive(Debug, Clone)]
pub struct Post {
    pub owner: String,
    pub locked: bool,
}

impl Post {
    pub fn new(owner: &str, locked: bool) -> Self {
        Self {
            owner: owner.to_string(),
            locked,
        }
    }
}

/// Owners may edit their unlocked posts; moderators and admins may edit any.
pub struct PostVoter {
    hierarchy: Arc<LabelHierarchy>,
}

impl PostVoter {
    pub fn new(hierarchy: Arc<LabelHierarchy>) -> Self {
        Self { hierarchy }
    }
}

impl Voter for PostVoter {
    fn supports(&self, attribute: &str, subject: Option<Subject<'_>>) -> bool {
        attribute == CAN_EDIT_POST && subject.is_some_and(|s| s.is::<Post>())
    }

    fn vote(&self, actor: &Actor, _attribute: &str, subject: Option<Subject<'_>>) -> VoteResult {
        let Some(post) = subject.and_then(|s| s.downcast_ref::<Post>()) else {
            return Ok(Vote::Abstain);
        };
        if actor.identity() == Some(post.owner.as_str()) && !post.locked {
            return Ok(Vote::Grant);
        }
        let privileged = self.hierarchy.reaches(actor.labels(), "ROLE_MODERATOR")
            || self.hierarchy.reaches(actor.labels(), "ROLE_ADMIN");
        Ok(Vote::grant_if(privileged))
    }
}

/// Always fails, standing in for a voter whose backing store is down.
pub struct BrokenVoter;

impl Voter for BrokenVoter {
    fn supports(&self, _attribute: &str, _subject: Option<Subject<'_>>) -> bool {
        true
    }

    fn vote(&self, _actor: &Actor, _attribute: &str, _subject: Option<Subject<'_>>) -> VoteResult {
        Err(VoterError::failed("post store unreachable"))
    }
}

/// Forum configuration: admin > moderator > user.
pub fn forum_config(strategy: Strategy) -> EngineConfig {
    let mut config = EngineConfig::from_toml_str(
        r#"
[hierarchy]
ROLE_ADMIN = ["ROLE_MODERATOR"]
ROLE_MODERATOR = ["ROLE_USER"]
"#,
    )
    .expect("forum config parses");
    config.strategy = strategy;
    config
}

/// Checker with the label voter and the post voter registered.
pub fn forum_checker(strategy: Strategy) -> AuthorizationChecker {
    let (builder, hierarchy) = forum_config(strategy)
        .manager_builder()
        .expect("forum hierarchy is acyclic");
    builder
        .named_voter("posts", PostVoter::new(hierarchy))
        .build()
        .into()
}
