//! The forum post editing scenario, end to end.

use std::sync::Arc;

use warrant_core::{
    Actor, AttributeVoter, AuthorizationChecker, DecisionManager, LabelHierarchy, LabelVoter,
    Strategy, Subject, Vote,
};

use crate::common::{BrokenVoter, CAN_EDIT_POST, Post, PostVoter, forum_checker, forum_config};

fn alice() -> Actor {
    Actor::new("alice", ["ROLE_USER"])
}

#[test]
fn test_owner_edits_unlocked_post() {
    let checker = forum_checker(Strategy::Affirmative);
    let post = Post::new("alice", false);
    assert!(checker.is_granted(&alice(), CAN_EDIT_POST, Some(Subject::new(&post))));
}

#[test]
fn test_owner_cannot_edit_locked_post() {
    let checker = forum_checker(Strategy::Affirmative);
    let post = Post::new("alice", true);
    assert!(!checker.is_granted_on(&alice(), CAN_EDIT_POST, &post));
}

#[test]
fn test_stranger_cannot_edit() {
    let checker = forum_checker(Strategy::Affirmative);
    let post = Post::new("alice", false);
    let bob = Actor::new("bob", ["ROLE_USER"]);
    assert!(!checker.is_granted_on(&bob, CAN_EDIT_POST, &post));
}

#[test]
fn test_admin_edits_locked_post_through_hierarchy() {
    let checker = forum_checker(Strategy::Affirmative);
    let post = Post::new("alice", true);
    let root = Actor::new("root", ["ROLE_ADMIN"]);
    let mod_ = Actor::new("mia", ["ROLE_MODERATOR"]);
    assert!(checker.is_granted_on(&root, CAN_EDIT_POST, &post));
    assert!(checker.is_granted_on(&mod_, CAN_EDIT_POST, &post));
}

#[test]
fn test_missing_subject_abstains_and_denies() {
    let checker = forum_checker(Strategy::Affirmative);
    let decision = checker.explain(&alice(), CAN_EDIT_POST, None).unwrap();
    assert!(!decision.granted);
    assert!(decision.tally.all_abstained());
}

#[test]
fn test_label_checks_share_the_checker() {
    let checker = forum_checker(Strategy::Affirmative);
    let root = Actor::new("root", ["ROLE_ADMIN"]);
    assert!(checker.is_granted(&root, "ROLE_USER", None));
    assert!(!checker.is_granted(&alice(), "ROLE_MODERATOR", None));
}

#[test]
fn test_broken_voter_does_not_block_grant() {
    let (builder, hierarchy) = forum_config(Strategy::Affirmative)
        .manager_builder()
        .unwrap();
    let checker: AuthorizationChecker = builder
        .named_voter("broken", BrokenVoter)
        .named_voter("posts", PostVoter::new(hierarchy))
        .build()
        .into();

    let post = Post::new("alice", false);
    let decision = checker
        .explain(&alice(), CAN_EDIT_POST, Some(Subject::new(&post)))
        .unwrap();
    assert!(decision.granted);
    let broken = decision.votes.iter().find(|r| r.voter == "broken").unwrap();
    assert_eq!(broken.vote, Vote::Abstain);
    assert!(broken.fault.is_some());
}

#[test]
fn test_broken_voter_surfaces_when_degradation_disabled() {
    let mut config = forum_config(Strategy::Affirmative);
    config.degrade_voter_faults = false;
    let (builder, hierarchy) = config.manager_builder().unwrap();
    let checker: AuthorizationChecker = builder
        .named_voter("broken", BrokenVoter)
        .named_voter("posts", PostVoter::new(hierarchy))
        .build()
        .into();

    let post = Post::new("alice", false);
    assert!(
        checker
            .try_is_granted(&alice(), CAN_EDIT_POST, Some(Subject::new(&post)))
            .is_err()
    );
    assert!(!checker.is_granted_on(&alice(), CAN_EDIT_POST, &post));
}

#[test]
fn test_unanimous_owner_without_privilege() {
    // Under unanimous the post voter's grant stands alone; the label voter
    // abstains on non-label attributes.
    let checker = forum_checker(Strategy::Unanimous);
    let post = Post::new("alice", false);
    assert!(checker.is_granted_on(&alice(), CAN_EDIT_POST, &post));
}

#[test]
fn test_guard_reports_denial() {
    let checker = forum_checker(Strategy::Affirmative);
    let post = Post::new("alice", true);
    let denied = checker
        .deny_unless_granted(&alice(), CAN_EDIT_POST, Some(Subject::new(&post)))
        .unwrap_err();
    assert_eq!(denied.attribute(), CAN_EDIT_POST);
    assert!(denied.to_string().contains("Post"));
}

#[test]
fn test_same_rules_through_attribute_voter() {
    let hierarchy = Arc::new(
        LabelHierarchy::new([
            ("ROLE_ADMIN", vec!["ROLE_MODERATOR"]),
            ("ROLE_MODERATOR", vec!["ROLE_USER"]),
        ])
        .unwrap(),
    );
    let roles = hierarchy.clone();
    let post_rules = AttributeVoter::new(
        [CAN_EDIT_POST],
        move |actor: &Actor, _attr: &str, post: &Post| {
            let owns = actor.identity() == Some(post.owner.as_str()) && !post.locked;
            let privileged = roles.reaches(actor.labels(), "ROLE_MODERATOR");
            Ok(Vote::grant_if(owns || privileged))
        },
    );
    let checker = AuthorizationChecker::new(
        DecisionManager::builder()
            .strategy(Strategy::Affirmative)
            .voter(LabelVoter::new(hierarchy))
            .named_voter("posts", post_rules)
            .build(),
    );

    assert!(checker.is_granted_on(&alice(), CAN_EDIT_POST, &Post::new("alice", false)));
    assert!(!checker.is_granted_on(&alice(), CAN_EDIT_POST, &Post::new("alice", true)));
    let root = Actor::new("root", ["ROLE_ADMIN"]);
    assert!(checker.is_granted_on(&root, CAN_EDIT_POST, &Post::new("alice", true)));
}
