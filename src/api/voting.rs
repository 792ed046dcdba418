//! The vote-casting endpoint.

use chrono::Utc;
use rocket::{serde::json::Json, Route};

use crate::error::Result;
use crate::ledger::VoteLedger;
use crate::model::{
    api::{VoteReceipt, VoteSpec},
    auth::{AuthToken, ClientIp},
    mongodb::Id,
};

pub fn routes() -> Vec<Route> {
    routes![cast_vote]
}

#[post("/elections/<election_id>/votes", data = "<spec>", format = "json")]
async fn cast_vote(
    token: AuthToken,
    election_id: Id,
    spec: Json<VoteSpec>,
    origin: ClientIp,
    ledger: VoteLedger,
) -> Result<Json<VoteReceipt>> {
    let vote = ledger
        .cast_vote(token.id, election_id, spec.0.candidate_id, origin.0, Utc::now())
        .await?;
    info!(
        "Vote recorded in election {} for candidate {}",
        vote.election_id, vote.candidate_id
    );
    Ok(Json(vote.into()))
}
