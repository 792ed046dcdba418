use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{common::ElectionPhase, db::election::Election, mongodb::Id};

/// A summary of an election, shorter than the full [`ElectionDescription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSummary {
    /// Election unique ID.
    pub id: Id,
    /// Election title.
    pub title: String,
    /// Lifecycle phase at the time of the request.
    pub phase: ElectionPhase,
    /// Start of the voting window.
    pub start_date: DateTime<Utc>,
    /// End of the voting window.
    pub end_date: DateTime<Utc>,
}

impl ElectionSummary {
    pub fn new(election: &Election, now: DateTime<Utc>) -> Self {
        Self {
            id: election.id,
            title: election.title.clone(),
            phase: election.phase(now),
            start_date: election.start_date,
            end_date: election.end_date,
        }
    }
}

/// An API-friendly election description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionDescription {
    /// Election unique ID.
    pub id: Id,
    /// Election title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Lifecycle phase at the time of the request.
    pub phase: ElectionPhase,
    /// Start of the voting window.
    pub start_date: DateTime<Utc>,
    /// End of the voting window.
    pub end_date: DateTime<Utc>,
}

impl ElectionDescription {
    pub fn new(election: &Election, now: DateTime<Utc>) -> Self {
        Self {
            id: election.id,
            title: election.title.clone(),
            description: election.description.clone(),
            phase: election.phase(now),
            start_date: election.start_date,
            end_date: election.end_date,
        }
    }
}
