//! Fuzzy name matching across listing sources
//!
//! The two travel sites spell hotel names differently ("Conrad Seoul" vs
//! "Conrad Hotels & Resorts Conrad Seoul"), so joining them needs a
//! similarity score rather than equality. This crate provides the scoring
//! seam ([`Similarity`]), a character-sequence ratio implementation
//! ([`SequenceRatio`]), and the best-match pairing over two lists
//! ([`pair`]).
//!
//! Scoring runs on *normalized* names; callers are expected to fold case
//! and strip brand suffixes before pairing.

mod pair;
mod similarity;

pub use pair::{Pairing, pair};
pub use similarity::{SequenceRatio, Similarity};
