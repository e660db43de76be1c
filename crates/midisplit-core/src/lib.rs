//! Voice separation core for the midisplit engine.
//!
//! Format-agnostic algorithms for turning a polyphonic set of note
//! intervals into monophonic voices:
//!
//! - [`extract`] - delta-timed event streams to absolute-time intervals
//! - [`peak_concurrency`] - maximum number of simultaneously active notes
//! - [`allocate`] - greedy voice assignment under a [`Strategy`]
//! - [`merge_control`] - stable time-ordered merge of control events
//! - [`DeltaEncoder`] - absolute time back to delta time
//!
//! Nothing in this crate knows about Standard MIDI Files; the `midisplit-smf`
//! crate handles marshaling to and from `midly` types.

pub mod error;
pub use error::{Error, Result};

mod event;
pub use event::{ControlEvent, DeltaEvent, EventKind, NoteInterval, Tick};

mod extract;
pub use extract::{extract, Extraction};

mod analyze;
pub use analyze::peak_concurrency;

mod allocate;
pub use allocate::{allocate, Allocation, Strategy};

mod merge;
pub use merge::merge_control;

mod delta;
pub use delta::{decode_deltas, encode_deltas, DeltaEncoder};
