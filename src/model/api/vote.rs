use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{db::vote::Vote, mongodb::Id};

/// A vote the user wishes to cast: a specific candidate in the election
/// named by the request path.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSpec {
    pub candidate_id: Id,
}

/// Confirmation of a recorded vote.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    /// Unique ID of the vote record.
    pub vote_id: Id,
    /// The election the vote was cast in.
    pub election_id: Id,
    /// The candidate voted for.
    pub candidate_id: Id,
    /// When the vote was recorded.
    pub voted_at: DateTime<Utc>,
}

impl From<Vote> for VoteReceipt {
    fn from(vote: Vote) -> Self {
        Self {
            vote_id: vote.id,
            election_id: vote.election_id,
            candidate_id: vote.candidate_id,
            voted_at: vote.voted_at,
        }
    }
}
