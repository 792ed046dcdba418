//! Read-only endpoints: elections, candidates, and results.

use chrono::Utc;
use rocket::{futures::TryStreamExt, serde::json::Json, Route};

use crate::error::{Error, Result};
use crate::ledger::VoteLedger;
use crate::model::{
    api::{CandidateDescription, ElectionDescription, ElectionResults, ElectionSummary},
    db::{candidate::Candidate, election::Election},
    mongodb::{Coll, Id},
};

pub fn routes() -> Vec<Route> {
    routes![
        elections,
        active_election,
        election,
        election_results,
        current_results,
        candidates,
        candidate,
    ]
}

#[get("/elections")]
async fn elections(ledger: VoteLedger) -> Result<Json<Vec<ElectionSummary>>> {
    let now = Utc::now();
    let summaries = ledger
        .all_elections()
        .await?
        .iter()
        .map(|election| ElectionSummary::new(election, now))
        .collect();
    Ok(Json(summaries))
}

#[get("/elections/active")]
async fn active_election(ledger: VoteLedger) -> Result<Json<ElectionDescription>> {
    let now = Utc::now();
    let election = ledger
        .active_election(now)
        .await?
        .ok_or_else(|| Error::not_found("An election accepting votes".to_string()))?;
    Ok(Json(ElectionDescription::new(&election, now)))
}

#[get("/elections/<election_id>")]
async fn election(election_id: Id, elections: Coll<Election>) -> Result<Json<ElectionDescription>> {
    let election = elections
        .find_one(election_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Election with ID '{election_id}'")))?;
    Ok(Json(ElectionDescription::new(&election, Utc::now())))
}

#[get("/elections/<election_id>/results")]
async fn election_results(election_id: Id, ledger: VoteLedger) -> Result<Json<ElectionResults>> {
    let results = ledger.tally(election_id, Utc::now()).await?;
    Ok(Json(results))
}

/// Results for the election currently accepting votes, falling back to the
/// most recently started one. The fallback is display-only; nothing here
/// can authorise a vote.
#[get("/results")]
async fn current_results(ledger: VoteLedger) -> Result<Json<ElectionResults>> {
    let now = Utc::now();
    let election = match ledger.active_election(now).await? {
        Some(election) => election,
        None => ledger
            .latest_election(now)
            .await?
            .ok_or_else(|| Error::not_found("An election that has started".to_string()))?,
    };
    let results = ledger.results_for(&election, now).await?;
    Ok(Json(results))
}

#[get("/candidates")]
async fn candidates(candidates: Coll<Candidate>) -> Result<Json<Vec<CandidateDescription>>> {
    let all: Vec<Candidate> = candidates.find(None, None).await?.try_collect().await?;
    Ok(Json(all.into_iter().map(Into::into).collect()))
}

#[get("/candidates/<candidate_id>")]
async fn candidate(
    candidate_id: Id,
    candidates: Coll<Candidate>,
) -> Result<Json<CandidateDescription>> {
    let candidate = candidates
        .find_one(candidate_id.as_doc(), None)
        .await?
        .ok_or(Error::CandidateNotFound)?;
    Ok(Json(candidate.into()))
}
