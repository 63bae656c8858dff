use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Process {0} has a burst time of 0, burst must be >= 1.")]
    ZeroBurst(String),
    #[error("Arrival and burst times are too large, the schedule would overflow.")]
    TimeOverflow,
    #[error("Round-Robin needs a quantum >= 1.")]
    MissingQuantum,
    #[error("At least one frame is needed, got 0.")]
    NoFrames,
    #[error("Track {0} is outside the disk, tracks go from 0 to {1}.")]
    TrackOutOfRange(u32, u32),
    #[error("Head position {0} is outside the disk, tracks go from 0 to {1}.")]
    HeadOutOfRange(u32, u32),
    #[error("Invalid process on line {0}: '{1}', expected LABEL ARRIVAL BURST.")]
    InvalidProcess(usize, String),
    #[error("Unknown algorithm '{0}'.")]
    ParseAlgorithmError(String),
    #[error("Unknown direction '{0}', expected up or down.")]
    ParseDirectionError(String),
    #[error("Invalid workload file: {0}")]
    InvalidWorkload(String),
    #[error("File select dialog closed.")]
    DialogClosed,
    #[error("IO Error")]
    IO(io::ErrorKind),
    #[error("No workload has been opened, first open a file.")]
    NoWorkloadOpened,
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::InvalidWorkload(error.to_string())
    }
}
