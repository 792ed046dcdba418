use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{db::candidate::Candidate, db::election::Election, mongodb::Id};

use super::election::ElectionSummary;

/// One candidate's standing in an election: an explicit value object,
/// so result computation never touches the stored candidate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTally {
    /// Candidate unique ID.
    pub candidate_id: Id,
    /// Display name.
    pub full_name: String,
    /// Party label.
    pub party: String,
    /// Display colour, straight from the stored candidate record.
    pub color: String,
    /// Number of votes received in this election.
    pub votes: u64,
    /// Share of the total vote, rounded to one decimal place. Rounding is
    /// per-candidate, so the column need not sum to exactly 100.
    pub percentage: f64,
}

impl CandidateTally {
    /// Build the result rows from per-candidate counts, sorted by
    /// descending vote count with ties broken by candidate ID ascending
    /// so the ordering is deterministic.
    pub fn from_counts(counts: Vec<(Candidate, u64)>, total_votes: u64) -> Vec<Self> {
        let mut rows = counts
            .into_iter()
            .map(|(candidate, votes)| Self {
                candidate_id: candidate.id,
                full_name: candidate.candidate.full_name,
                party: candidate.candidate.party,
                color: candidate.candidate.color,
                votes,
                percentage: percentage(votes, total_votes),
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| {
            b.votes
                .cmp(&a.votes)
                .then(a.candidate_id.cmp(&b.candidate_id))
        });
        rows
    }
}

/// Tallies and turnout for one election.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionResults {
    /// The election these results belong to.
    pub election: ElectionSummary,
    /// Per-candidate standings, best first.
    pub results: Vec<CandidateTally>,
    /// Total votes cast in the election.
    pub total_votes: u64,
    /// Number of registered voters.
    pub eligible_voters: u64,
    /// Distinct voters who voted as a share of eligible voters, rounded to
    /// one decimal place. Distinct voters equals `total_votes` because a
    /// voter casts at most one vote per election.
    pub turnout: f64,
}

impl ElectionResults {
    pub fn new(
        election: &Election,
        now: DateTime<Utc>,
        results: Vec<CandidateTally>,
        total_votes: u64,
        eligible_voters: u64,
    ) -> Self {
        Self {
            election: ElectionSummary::new(election, now),
            results,
            total_votes,
            eligible_voters,
            turnout: percentage(total_votes, eligible_voters),
        }
    }
}

/// `100 * part / whole` rounded to one decimal place, `0` for an empty whole.
fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use mongodb::bson::oid::ObjectId;

    use super::*;

    fn candidate(name: &str) -> Candidate {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Candidate::example(name, now)
    }

    /// A candidate with a fixed ID, for ordering tests.
    fn candidate_with_id(name: &str, hex: &str) -> Candidate {
        let mut candidate = candidate(name);
        candidate.id = ObjectId::parse_str(hex).unwrap().into();
        candidate
    }

    #[test]
    fn three_to_one_split() {
        let rows = CandidateTally::from_counts(
            vec![(candidate("A"), 3), (candidate("B"), 1)],
            4,
        );
        assert_eq!(rows[0].full_name, "A");
        assert_eq!((rows[0].votes, rows[0].percentage), (3, 75.0));
        assert_eq!(rows[1].full_name, "B");
        assert_eq!((rows[1].votes, rows[1].percentage), (1, 25.0));
    }

    #[test]
    fn no_votes_means_zero_percent() {
        let rows = CandidateTally::from_counts(vec![(candidate("A"), 0)], 0);
        assert_eq!((rows[0].votes, rows[0].percentage), (0, 0.0));
    }

    #[test]
    fn percentages_round_independently() {
        let rows = CandidateTally::from_counts(
            vec![(candidate("A"), 1), (candidate("B"), 1), (candidate("C"), 1)],
            3,
        );
        // Each rounds to 33.3 on its own; the column sums to 99.9.
        for row in &rows {
            assert_eq!(row.percentage, 33.3);
        }
    }

    #[test]
    fn sorted_by_votes_then_id() {
        let first = candidate_with_id("Z", "000000000000000000000001");
        let second = candidate_with_id("Y", "000000000000000000000002");
        let winner = candidate_with_id("W", "000000000000000000000003");

        let rows = CandidateTally::from_counts(
            vec![(second.clone(), 2), (winner.clone(), 5), (first.clone(), 2)],
            9,
        );
        assert_eq!(rows[0].candidate_id, winner.id);
        // The tie resolves by ID, not by insertion or name order.
        assert_eq!(rows[1].candidate_id, first.id);
        assert_eq!(rows[2].candidate_id, second.id);
    }

    #[test]
    fn turnout_uses_eligible_voters() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let election = Election::current_example(now);
        let results = ElectionResults::new(&election, now, Vec::new(), 3, 8);
        assert_eq!(results.turnout, 37.5);
        assert_eq!(results.election.id, election.id);

        let nobody_registered = ElectionResults::new(&election, now, Vec::new(), 0, 0);
        assert_eq!(nobody_registered.turnout, 0.0);
    }
}
