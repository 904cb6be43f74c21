//! Verse index implementations

mod qdrant;
mod snapshot;

pub use qdrant::{QdrantVerseIndex, DEFAULT_COLLECTION};
pub use snapshot::{SnapshotRecord, SnapshotVerseIndex};
