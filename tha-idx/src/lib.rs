//! Dense, type-safe index types used throughout the timed-hybrid-automaton
//! crates. Every numeric id in the symbolic model -- mode ids, spatial
//! symbols, time indices, global input ids, augmented-state ids -- is a
//! distinct newtype implementing [`IndexRef`] rather than a bare `usize`,
//! so the builder can't accidentally index one space with another's key.
mod index_trait;
mod indexed_map;
mod macros;

pub use index_trait::{IndexRange, IndexRangeIterator, IndexRef};
pub use indexed_map::IndexedMap;
