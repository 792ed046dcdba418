use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core candidate data, as stored in the database.
///
/// A candidate is created once for a user identity and is immutable
/// afterwards except through administrative edits (not exposed here).
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CandidateCore {
    /// The voter identity this candidacy belongs to, one-to-one.
    pub user_id: Id,
    /// Display name.
    pub full_name: String,
    /// Party label; empty for independents.
    pub party: String,
    /// Biography.
    pub bio: String,
    /// Campaign programme.
    pub program: String,
    /// Display colour, e.g. `#1e3a8a`. This stored field is the single
    /// authoritative colour for the candidate wherever results are shown.
    pub color: String,
    /// Creation time.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// A new candidate ready for DB insertion is just [`CandidateCore`].
pub type NewCandidate = CandidateCore;

/// A candidate from the database, with its unique ID.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub candidate: CandidateCore,
}

impl Deref for Candidate {
    type Target = CandidateCore;

    fn deref(&self) -> &Self::Target {
        &self.candidate
    }
}

impl DerefMut for Candidate {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.candidate
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Candidate {
        pub fn example(full_name: &str, created_at: DateTime<Utc>) -> Self {
            Self {
                id: Id::new(),
                candidate: CandidateCore {
                    user_id: Id::new(),
                    full_name: full_name.to_string(),
                    party: "Independent".to_string(),
                    bio: "Bio".to_string(),
                    program: "Programme".to_string(),
                    color: "#1e3a8a".to_string(),
                    created_at,
                },
            }
        }
    }
}
