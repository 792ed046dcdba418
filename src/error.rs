use rocket::{http::Status, response::Responder};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while serving a request.
///
/// The voting-specific variants are all recoverable, user-visible
/// conditions; only database and token-decoding failures are opaque.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] mongodb::error::Error),
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    OidParse(#[from] mongodb::bson::oid::Error),
    /// The election is missing, inactive, or outside its voting window.
    #[error("Election is not open for voting")]
    ElectionNotActive,
    /// The requested candidate does not exist.
    #[error("Candidate not found")]
    CandidateNotFound,
    /// The voter has already cast a vote in this election.
    #[error("Vote already cast in this election")]
    DuplicateVote,
    /// No valid voter identity accompanied the request.
    #[error("Not authenticated as a voter")]
    Unauthenticated,
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        warn!("{self}");
        Err(match self {
            Self::Db(_) => Status::InternalServerError,
            Self::Jwt(_) | Self::Unauthenticated => Status::Unauthorized,
            Self::OidParse(_) => Status::BadRequest,
            Self::ElectionNotActive => Status::UnprocessableEntity,
            Self::CandidateNotFound | Self::NotFound(_) => Status::NotFound,
            Self::DuplicateVote => Status::Conflict,
        })
    }
}
