//! Public library API for decoding OpenFlight `.flt` scene databases.

/// Record stream decoding, scene-graph building, and external reference resolution.
pub mod flt;
