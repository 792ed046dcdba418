use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core voter user data, as stored in the database.
///
/// Voter records are owned by the identity collaborator that registers
/// users and issues auth tokens; this server only reads them (existence
/// checks when authenticating, and the turnout denominator).
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct VoterCore {
    /// Unique username.
    pub username: String,
}

/// A voter user from the database, with its unique ID.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Voter {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub voter: VoterCore,
}

impl Deref for Voter {
    type Target = VoterCore;

    fn deref(&self) -> &Self::Target {
        &self.voter
    }
}
