use serde::{Deserialize, Serialize};

use crate::model::{db::candidate::Candidate, mongodb::Id};

/// An API-friendly candidate description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDescription {
    /// Candidate unique ID.
    pub id: Id,
    /// Display name.
    pub full_name: String,
    /// Party label; empty for independents.
    pub party: String,
    /// Biography.
    pub bio: String,
    /// Campaign programme.
    pub program: String,
    /// Display colour.
    pub color: String,
}

impl From<Candidate> for CandidateDescription {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            full_name: candidate.candidate.full_name,
            party: candidate.candidate.party,
            bio: candidate.candidate.bio,
            program: candidate.candidate.program,
            color: candidate.candidate.color,
        }
    }
}
