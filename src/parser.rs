use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

use crate::config::Config;
use crate::error::Error;
use crate::simulator::{Direction, Page, Process, Time, Track};

// Split free text on whitespace and keep the tokens that are integers
pub fn parse_numbers(text: &str) -> Vec<i64> {
    text.split_whitespace()
        .filter_map(|token| token.parse::<i64>().ok())
        .collect()
}

/// Page numbers are non-negative: negative and fractional tokens are dropped
/// along with anything else that is not a valid page.
pub fn parse_reference_string(text: &str) -> Vec<Page> {
    text.split_whitespace()
        .filter_map(|token| token.parse::<Page>().ok())
        .collect()
}

// Requests outside the disk are pulled back to the nearest edge
pub fn parse_requests(text: &str, max_track: Track) -> Vec<Track> {
    parse_numbers(text)
        .into_iter()
        .map(|track| track.clamp(0, i64::from(max_track)) as Track)
        .collect()
}

// One process per line: LABEL ARRIVAL BURST
pub fn parse_processes(text: &str) -> Result<Vec<Process>, Error> {
    let mut processes: Vec<Process> = vec![];

    for (i, line) in text.lines().enumerate() {
        let fields = line.split_whitespace().collect::<Vec<&str>>();

        // Ignore empty lines
        if fields.is_empty() {
            continue;
        }

        let invalid = || Error::InvalidProcess(i + 1, line.trim().to_string());
        let &[label, arrival, burst] = fields.as_slice() else {
            return Err(invalid());
        };
        let arrival = arrival.parse::<Time>().map_err(|_| invalid())?;
        let burst = burst.parse::<Time>().map_err(|_| invalid())?;

        processes.push(Process::new(label, arrival, burst));
    }

    Ok(processes)
}

/// Everything the three engines need, as read from a workload file. Inputs
/// that are left out fall back to the configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Workload {
    pub processes: Vec<Process>,
    // Extra processes in LABEL ARRIVAL BURST lines
    pub process_table: String,
    pub quantum: Option<NonZeroU64>,
    pub reference_string: String,
    pub frames: Option<usize>,
    pub requests: String,
    pub head: Option<Track>,
    pub direction: Option<Direction>,
}

impl Workload {
    pub fn from_json(stream: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(stream)?)
    }

    pub fn all_processes(&self) -> Result<Vec<Process>, Error> {
        let mut processes = self.processes.clone();
        processes.extend(parse_processes(&self.process_table)?);
        Ok(processes)
    }

    pub fn pages(&self) -> Vec<Page> {
        parse_reference_string(&self.reference_string)
    }

    pub fn tracks(&self, config: &Config) -> Vec<Track> {
        parse_requests(&self.requests, config.max_track)
    }

    pub fn quantum(&self, config: &Config) -> NonZeroU64 {
        self.quantum.unwrap_or(config.quantum)
    }

    pub fn frames(&self, config: &Config) -> usize {
        self.frames.unwrap_or(config.frames)
    }

    pub fn head(&self, config: &Config) -> Track {
        self.head.unwrap_or(config.head).min(config.max_track)
    }

    pub fn direction(&self, config: &Config) -> Direction {
        self.direction.unwrap_or(config.direction)
    }
}
