//! Standard MIDI File marshaling for the midisplit engine.
//!
//! Bridges `midly` and the format-agnostic `midisplit-core` types: parsing
//! an SMF into delta-timed event streams, and writing allocated voices and
//! merged meta events back out as a well-formed multi-track file.

pub mod error;
pub use error::{Error, Result};

mod file;
pub use file::ParsedSmf;

mod writer;
pub use writer::{save_split, write_split};

pub use midly;
