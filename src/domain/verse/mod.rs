//! Quranic verse entities and the index seam

mod entity;
mod index;

pub use entity::{dedupe_by_key, VerseCandidate, VerseKey, VersePayload};
pub use index::{VerseIndex, DEFAULT_RETRIEVAL_LIMIT};

#[cfg(test)]
pub use index::mock::MockVerseIndex;
