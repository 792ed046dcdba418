use std::net::IpAddr;
use std::ops::Deref;

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core vote data, as stored in the database.
///
/// The `(voter_id, election_id)` pair is covered by a unique index (see
/// `ensure_indexes_exist`), so at most one such record can ever exist.
/// Votes are created exactly once and never updated.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct VoteCore {
    /// Who voted.
    pub voter_id: Id,
    /// Who they voted for.
    pub candidate_id: Id,
    /// The election the vote was cast in.
    pub election_id: Id,
    /// When the vote was cast.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub voted_at: DateTime<Utc>,
    /// Origin address of the cast request, when known.
    pub origin_ip: Option<IpAddr>,
}

impl VoteCore {
    /// Create a new vote record.
    pub fn new(
        voter_id: Id,
        candidate_id: Id,
        election_id: Id,
        voted_at: DateTime<Utc>,
        origin_ip: Option<IpAddr>,
    ) -> Self {
        Self {
            voter_id,
            candidate_id,
            election_id,
            voted_at,
            origin_ip,
        }
    }
}

/// A new vote ready for DB insertion is just [`VoteCore`].
pub type NewVote = VoteCore;

/// A vote from the database, with its unique ID.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub vote: VoteCore,
}

impl Deref for Vote {
    type Target = VoteCore;

    fn deref(&self) -> &Self::Target {
        &self.vote
    }
}
