//! Durable step completion markers.

pub mod store;

pub use store::{CompletedMarker, FileMarkerStore, MarkerStore, MemoryMarkerStore};
