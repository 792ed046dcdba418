//! API-compatible types.
//!
//! The types in this module are serialised in an API-friendly way:
//! datetimes become RFC 3339 strings rather than BSON datetimes, and no
//! stored record is exposed directly. IDs keep MongoDB's extended JSON
//! form; inbound IDs are also accepted as plain hex strings.

pub mod candidate;
pub mod election;
pub mod results;
pub mod vote;

pub use candidate::CandidateDescription;
pub use election::{ElectionDescription, ElectionSummary};
pub use results::{CandidateTally, ElectionResults};
pub use vote::{VoteReceipt, VoteSpec};
