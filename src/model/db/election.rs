use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::{common::ElectionPhase, mongodb::Id};

/// Core election data, as stored in the database.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ElectionCore {
    /// Election title.
    pub title: String,
    /// Free-text description shown to voters.
    pub description: String,
    /// Start of the voting window.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub start_date: DateTime<Utc>,
    /// End of the voting window.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub end_date: DateTime<Utc>,
    /// Administrative kill-switch: votes are only accepted while set.
    pub is_active: bool,
    /// Creation time.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ElectionCore {
    /// Create a new election. Returns `None` if the window is inverted
    /// (`start_date > end_date`).
    pub fn new(
        title: String,
        description: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Option<Self> {
        if start_date > end_date {
            return None;
        }
        Some(Self {
            title,
            description,
            start_date,
            end_date,
            is_active,
            created_at,
        })
    }

    /// Does the voting window contain the given instant?
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    /// Is this election accepting votes right now?
    pub fn accepts_votes(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.is_open(now)
    }

    /// Compute the lifecycle phase at the given instant.
    ///
    /// An election deactivated mid-window counts as closed, not scheduled:
    /// clearing `is_active` is how an administrator ends a vote early.
    pub fn phase(&self, now: DateTime<Utc>) -> ElectionPhase {
        if self.accepts_votes(now) {
            ElectionPhase::Active
        } else if now < self.start_date {
            ElectionPhase::Scheduled
        } else {
            ElectionPhase::Closed
        }
    }
}

/// A new election ready for DB insertion is just [`ElectionCore`].
pub type NewElection = ElectionCore;

/// An election from the database, with its unique ID.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Election {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub election: ElectionCore,
}

impl Deref for Election {
    type Target = ElectionCore;

    fn deref(&self) -> &Self::Target {
        &self.election
    }
}

impl DerefMut for Election {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.election
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use chrono::Duration;

    use super::*;

    impl ElectionCore {
        /// An active election whose window covers `now`.
        pub fn current_example(now: DateTime<Utc>) -> Self {
            Self::new(
                "Student Union President".to_string(),
                "Annual election for the union presidency.".to_string(),
                now - Duration::days(1),
                now + Duration::days(30),
                true,
                now - Duration::days(7),
            )
            .unwrap()
        }

        /// An election whose window has not opened yet.
        pub fn future_example(now: DateTime<Utc>) -> Self {
            Self::new(
                "Next Year's Committee".to_string(),
                "Committee election, opening next month.".to_string(),
                now + Duration::days(30),
                now + Duration::days(37),
                false,
                now,
            )
            .unwrap()
        }
    }

    impl Election {
        pub fn current_example(now: DateTime<Utc>) -> Self {
            Self {
                id: Id::new(),
                election: ElectionCore::current_example(now),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn base(start: DateTime<Utc>, end: DateTime<Utc>, is_active: bool) -> ElectionCore {
        ElectionCore::new(
            "Election".to_string(),
            "Description".to_string(),
            start,
            end,
            is_active,
            start,
        )
        .unwrap()
    }

    #[test]
    fn inverted_window_is_rejected() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert!(ElectionCore::new(
            "Election".to_string(),
            "Description".to_string(),
            now,
            now - Duration::seconds(1),
            true,
            now,
        )
        .is_none());
        // A zero-length window is legal.
        assert!(ElectionCore::new(
            "Election".to_string(),
            "Description".to_string(),
            now,
            now,
            true,
            now,
        )
        .is_some());
    }

    #[test]
    fn phase_follows_window() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let election = base(now - Duration::days(1), now + Duration::days(1), true);

        assert_eq!(election.phase(now - Duration::days(2)), ElectionPhase::Scheduled);
        assert_eq!(election.phase(now), ElectionPhase::Active);
        assert_eq!(election.phase(now + Duration::days(2)), ElectionPhase::Closed);

        // Window edges are inclusive.
        assert_eq!(election.phase(election.start_date), ElectionPhase::Active);
        assert_eq!(election.phase(election.end_date), ElectionPhase::Active);
    }

    #[test]
    fn deactivated_election_does_not_accept_votes() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let election = base(now - Duration::days(1), now + Duration::days(1), false);

        assert!(election.is_open(now));
        assert!(!election.accepts_votes(now));
        // Deactivated mid-window means closed, not scheduled.
        assert_eq!(election.phase(now), ElectionPhase::Closed);
        // But a future election that isn't active yet is still scheduled.
        assert_eq!(election.phase(now - Duration::days(2)), ElectionPhase::Scheduled);
    }
}
