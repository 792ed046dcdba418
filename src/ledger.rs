//! The vote ledger: recording votes and computing tallies.
//!
//! Everything stateful lives in the database; the ledger is a
//! request-scoped bundle of collection handles, so operations receive
//! their context (including the current time) explicitly.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    options::{FindOneOptions, FindOptions},
    Database,
};
use rocket::{
    futures::TryStreamExt,
    request::{self, FromRequest, Request},
    State,
};

use crate::error::{Error, Result};
use crate::model::{
    api::{CandidateTally, ElectionResults},
    db::{
        candidate::Candidate,
        election::Election,
        vote::{NewVote, Vote},
        voter::Voter,
    },
    mongodb::{is_duplicate_key_error, Coll, Id},
};

/// The one component with a real invariant: at most one vote per voter
/// per election. The invariant itself is enforced by the unique index on
/// `(voter_id, election_id)`; the ledger turns index violations into
/// [`Error::DuplicateVote`] and keeps every other rule in one place.
pub struct VoteLedger {
    elections: Coll<Election>,
    candidates: Coll<Candidate>,
    votes: Coll<Vote>,
    new_votes: Coll<NewVote>,
    voters: Coll<Voter>,
}

impl VoteLedger {
    /// Get a ledger over the given database.
    pub fn from_db(db: &Database) -> Self {
        Self {
            elections: Coll::from_db(db),
            candidates: Coll::from_db(db),
            votes: Coll::from_db(db),
            new_votes: Coll::from_db(db),
            voters: Coll::from_db(db),
        }
    }

    /// Record a vote by `voter_id` for `candidate_id` in `election_id`.
    ///
    /// The election must be accepting votes at `now` and the candidate
    /// must exist. A second vote by the same voter in the same election
    /// fails with [`Error::DuplicateVote`] and leaves no trace; the insert
    /// itself is the uniqueness check, there is no read-then-write window.
    pub async fn cast_vote(
        &self,
        voter_id: Id,
        election_id: Id,
        candidate_id: Id,
        origin_ip: Option<IpAddr>,
        now: DateTime<Utc>,
    ) -> Result<Vote> {
        let election = self
            .elections
            .find_one(election_id.as_doc(), None)
            .await?
            .filter(|election| election.accepts_votes(now))
            .ok_or(Error::ElectionNotActive)?;

        let candidate = self
            .candidates
            .find_one(candidate_id.as_doc(), None)
            .await?
            .ok_or(Error::CandidateNotFound)?;

        let vote = NewVote::new(voter_id, candidate.id, election.id, now, origin_ip);
        let inserted = match self.new_votes.insert_one(&vote, None).await {
            Ok(inserted) => inserted,
            Err(err) if is_duplicate_key_error(&err) => return Err(Error::DuplicateVote),
            Err(err) => return Err(err.into()),
        };

        let id = inserted
            .inserted_id
            .as_object_id()
            .unwrap() // Valid because the ID comes directly from the DB.
            .into();
        Ok(Vote { id, vote })
    }

    /// Tallies and turnout for the election with the given ID.
    pub async fn tally(&self, election_id: Id, now: DateTime<Utc>) -> Result<ElectionResults> {
        let election = self
            .elections
            .find_one(election_id.as_doc(), None)
            .await?
            .ok_or_else(|| Error::not_found(format!("Election with ID '{election_id}'")))?;
        self.results_for(&election, now).await
    }

    /// Tallies and turnout for an already-loaded election. Pure read.
    pub async fn results_for(
        &self,
        election: &Election,
        now: DateTime<Utc>,
    ) -> Result<ElectionResults> {
        let total_votes = self
            .votes
            .count_documents(doc! { "election_id": election.id }, None)
            .await?;

        let candidates: Vec<Candidate> = self.candidates.find(None, None).await?.try_collect().await?;
        let mut counts = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let votes = self
                .votes
                .count_documents(
                    doc! { "election_id": election.id, "candidate_id": candidate.id },
                    None,
                )
                .await?;
            counts.push((candidate, votes));
        }
        let results = CandidateTally::from_counts(counts, total_votes);

        let eligible_voters = self.voters.count_documents(None, None).await?;
        Ok(ElectionResults::new(
            election,
            now,
            results,
            total_votes,
            eligible_voters,
        ))
    }

    /// The election open for voting at `now`: active, with the window
    /// containing `now`. When several qualify, the latest-started wins.
    ///
    /// Only this selection may authorise a vote; [`Self::latest_election`]
    /// is for display fallback alone.
    pub async fn active_election(&self, now: DateTime<Utc>) -> Result<Option<Election>> {
        let now = BsonDateTime::from_chrono(now);
        let filter = doc! {
            "is_active": true,
            "start_date": { "$lte": now },
            "end_date": { "$gte": now },
        };
        let options = FindOneOptions::builder()
            .sort(doc! { "start_date": -1 })
            .build();
        Ok(self.elections.find_one(filter, options).await?)
    }

    /// The most recently started election at `now`, whether or not it is
    /// still (or ever was) accepting votes.
    pub async fn latest_election(&self, now: DateTime<Utc>) -> Result<Option<Election>> {
        let now = BsonDateTime::from_chrono(now);
        let filter = doc! {
            "start_date": { "$lte": now },
        };
        let options = FindOneOptions::builder()
            .sort(doc! { "start_date": -1 })
            .build();
        Ok(self.elections.find_one(filter, options).await?)
    }

    /// All elections, newest first.
    pub async fn all_elections(&self) -> Result<Vec<Election>> {
        let options = FindOptions::builder()
            .sort(doc! { "start_date": -1 })
            .build();
        Ok(self.elections.find(None, options).await?.try_collect().await?)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for VoteLedger {
    type Error = ();

    /// Build a ledger from the managed database.
    ///
    /// Panics iff the [`Database`] is not managed by [`rocket::Rocket`].
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let db = req.guard::<&State<Database>>().await.unwrap();
        request::Outcome::Success(VoteLedger::from_db(db))
    }
}
