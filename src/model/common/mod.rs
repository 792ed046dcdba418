mod election;

pub use election::ElectionPhase;
