//! Voter for the authentication-state pseudo attributes.

use super::{VoteResult, Voter};
use crate::actor::Actor;
use crate::subject::Subject;
use crate::vote::Vote;

/// Granted to any actor that carries an identity.
pub const IS_AUTHENTICATED: &str = "IS_AUTHENTICATED";

/// Granted to everyone, anonymous actors included.
pub const PUBLIC_ACCESS: &str = "PUBLIC_ACCESS";

/// Answers [`IS_AUTHENTICATED`] and [`PUBLIC_ACCESS`]; abstains on anything
/// else.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticatedVoter;

impl Voter for AuthenticatedVoter {
    fn supports(&self, attribute: &str, _subject: Option<Subject<'_>>) -> bool {
        attribute == IS_AUTHENTICATED || attribute == PUBLIC_ACCESS
    }

    fn vote(&self, actor: &Actor, attribute: &str, _subject: Option<Subject<'_>>) -> VoteResult {
        Ok(match attribute {
            PUBLIC_ACCESS => Vote::Grant,
            IS_AUTHENTICATED => Vote::grant_if(actor.is_authenticated()),
            _ => Vote::Abstain,
        })
    }
}
