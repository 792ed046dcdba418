//! DB-compatible (e.g. de/serialisable) types.
//!
//! The types in this module are serialised in a DB-friendly way, e.g.:
//!
//! - IDs and datetimes are serialised in MongoDB's own format.

pub mod candidate;
pub mod election;
pub mod vote;
pub mod voter;

pub use candidate::{Candidate, CandidateCore, NewCandidate};
pub use election::{Election, ElectionCore, NewElection};
pub use vote::{NewVote, Vote, VoteCore};
pub use voter::{Voter, VoterCore};
