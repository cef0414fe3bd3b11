//! Parallel decisions over one shared checker.

use warrant_core::{Actor, Strategy};

use crate::common::{CAN_EDIT_POST, Post, forum_checker};

#[test]
fn test_parallel_decisions_agree_with_sequential() {
    let checker = forum_checker(Strategy::Affirmative);
    let posts: Vec<Post> = (0..16)
        .map(|i| Post::new(if i % 2 == 0 { "alice" } else { "bob" }, i % 3 == 0))
        .collect();
    let alice = Actor::new("alice", ["ROLE_USER"]);

    let expected: Vec<bool> = posts
        .iter()
        .map(|p| checker.is_granted_on(&alice, CAN_EDIT_POST, p))
        .collect();

    let results: Vec<Vec<bool>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let checker = checker.clone();
                let posts = &posts;
                let alice = &alice;
                scope.spawn(move || {
                    posts
                        .iter()
                        .map(|p| checker.is_granted_on(alice, CAN_EDIT_POST, p))
                        .collect::<Vec<bool>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}
