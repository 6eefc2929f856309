//! Stop name lookup.
//!
//! An immutable table of stop names and coordinates, built once from the
//! stop dataset and shared by the geometry projector, walk-origin search
//! and the autocomplete endpoint.

mod directory;

pub use directory::{StopDirectory, StopMatch};
