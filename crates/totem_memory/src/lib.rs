//! # Totem Memory: the Symbolic Memory Engine
//!
//! Tracks recurring symbols ("mirror", "river") used in conversation and the
//! emotional weight they accumulate over time:
//!
//! - Each recorded use appends a weighted, timestamped association; the
//!   effective weight of an association is a pure function of its age
//!   (exponential decay, ~1-week half-life, floored multiplier).
//! - A symbol's top-3 emotions by summed effective weight are its dominant
//!   emotions. When a newly-used emotion lands far from the primary dominant,
//!   the symbol *drifts*: it gains a new free-text meaning and loses some
//!   meaning stability.
//! - Symbols used together grow co-occurrence edges in an undirected weighted
//!   network.
//! - State persists as a whole-file JSON snapshot, written via temp-file +
//!   atomic rename.
//!
//! The store is single-threaded and synchronous; a concurrent host must
//! serialize access itself.

pub mod dream;
pub mod drift;
pub mod meaning;
pub mod network;
pub mod store;
pub mod symbol;

pub use dream::dream_recency_score;
pub use drift::{drift_amount, DriftEvent};
pub use network::{SymbolConnection, SymbolNetwork};
pub use store::{EmotionalSymbol, SymbolStore};
pub use symbol::{EmotionalAssociation, SymbolicMemory};

#[cfg(test)]
mod tests;
