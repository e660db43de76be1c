//! Error types for the voice separation core.

use crate::event::{NoteInterval, Tick};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No voice could take the note and the strategy forbids dropping.
    ///
    /// Carries the configured voice limit and the note that failed to
    /// place, for diagnostics. Notes placed before the failure are
    /// abandoned, not rolled back.
    #[error(
        "more than {max_voices} simultaneous notes at tick {}: \
         raise the voice limit or use the drop-excess strategy",
        .note.start
    )]
    CapacityExceeded { max_voices: usize, note: NoteInterval },

    #[error("invalid voice count {0}: at least one voice is required")]
    InvalidVoiceCount(usize),

    /// Delta encoding was handed a timestamp earlier than its cursor.
    #[error("non-monotonic event time: {next} after {prev}")]
    NonMonotonicTime { prev: Tick, next: Tick },
}

pub type Result<T> = std::result::Result<T, Error>;
