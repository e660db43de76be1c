//! Error types for SMF marshaling.

use midisplit_core::Tick;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MIDI parse error: {0}")]
    Parse(String),

    /// SMPTE-timecode files carry no tick-per-beat resolution to pass
    /// through, so they are rejected up front.
    #[error("unsupported MIDI timing format (SMPTE timecode)")]
    UnsupportedTiming,

    #[error("ticks-per-beat value {0} does not fit the SMF header")]
    InvalidTicksPerBeat(u16),

    #[error("delta time {0} does not fit in an SMF variable-length field")]
    DeltaOverflow(Tick),

    #[error(transparent)]
    Core(#[from] midisplit_core::Error),
}

impl From<midly::Error> for Error {
    fn from(e: midly::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
