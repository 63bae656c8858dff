//! Textbook simulators for CPU scheduling, page replacement and disk
//! scheduling.
//!
//! Every engine is a pure function from a workload to a complete trace, so
//! a front end can replay, rewind or compare runs without re-simulating.

pub mod compare;
pub mod config;
pub mod error;
pub mod logger;
pub mod parser;
pub mod playback;
pub mod simulator;

pub use compare::{compare_cpu, compare_disk, compare_paging, Comparison};
pub use playback::Playback;
