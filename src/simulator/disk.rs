use log::{debug, trace};
use serde::Serialize;

use crate::error::Error;
use crate::simulator::{Direction, DiskAlgorithm};

pub type Track = u32;

pub const MAX_TRACK: Track = 199;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub from: Track,
    pub to: Track,
    pub seek_time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeekPlan {
    pub algorithm: DiskAlgorithm,
    pub head: Track,
    // Number of requests as given, duplicates included
    pub request_count: usize,
    pub moves: Vec<Move>,
    pub total_seek_time: u64,
}

impl SeekPlan {
    pub fn average_seek_time(&self) -> f64 {
        match self.request_count {
            0 => 0.0,
            count => self.total_seek_time as f64 / count as f64,
        }
    }

    /// Tracks in the order the head visits them.
    pub fn sequence(&self) -> Vec<Track> {
        self.moves.iter().map(|m| m.to).collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Disk {
    max_track: Track,
}

impl Default for Disk {
    fn default() -> Self {
        Self::new(MAX_TRACK)
    }
}

impl Disk {
    pub fn new(max_track: Track) -> Self {
        Self { max_track }
    }

    pub fn schedule(
        &self,
        requests: &[Track],
        head: Track,
        algorithm: DiskAlgorithm,
        direction: Direction,
    ) -> Result<SeekPlan, Error> {
        if head > self.max_track {
            return Err(Error::HeadOutOfRange(head, self.max_track));
        }
        if let Some(&track) = requests.iter().find(|&&track| track > self.max_track) {
            return Err(Error::TrackOutOfRange(track, self.max_track));
        }

        let sequence = match algorithm {
            DiskAlgorithm::FCFS => requests.to_vec(),
            DiskAlgorithm::SSTF => shortest_seek_first(requests, head),
            DiskAlgorithm::SCAN => scan(requests, head, direction),
            DiskAlgorithm::CSCAN => circular_scan(requests, head),
        };

        let mut moves = Vec::with_capacity(sequence.len());
        let mut current = head;
        for to in sequence {
            let seek_time = u64::from(current.abs_diff(to));
            trace!("head {} -> {} ({})", current, to, seek_time);
            moves.push(Move {
                from: current,
                to,
                seek_time,
            });
            current = to;
        }
        let total_seek_time = moves.iter().map(|m| m.seek_time).sum();

        debug!(
            "{} from head {}: {} moves, total seek {}",
            algorithm,
            head,
            moves.len(),
            total_seek_time
        );

        Ok(SeekPlan {
            algorithm,
            head,
            request_count: requests.len(),
            moves,
            total_seek_time,
        })
    }
}

pub fn simulate(
    requests: &[Track],
    head: Track,
    algorithm: DiskAlgorithm,
    direction: Direction,
    max_track: Track,
) -> Result<SeekPlan, Error> {
    Disk::new(max_track).schedule(requests, head, algorithm, direction)
}

fn sorted_unique(requests: &[Track]) -> Vec<Track> {
    let mut tracks = requests.to_vec();
    tracks.sort_unstable();
    tracks.dedup();
    tracks
}

fn shortest_seek_first(requests: &[Track], head: Track) -> Vec<Track> {
    let mut remaining = requests.to_vec();
    let mut sequence = Vec::with_capacity(remaining.len());
    let mut current = head;

    // Equal distance goes to the lower track
    while let Some(index) = remaining
        .iter()
        .enumerate()
        .min_by_key(|&(_, &track)| (track.abs_diff(current), track))
        .map(|(index, _)| index)
    {
        let track = remaining.swap_remove(index);
        sequence.push(track);
        current = track;
    }

    sequence
}

// The head turns around at the last pending request, not at the disk edge
fn scan(requests: &[Track], head: Track, direction: Direction) -> Vec<Track> {
    let tracks = sorted_unique(requests);
    match direction {
        Direction::Up => {
            let split = tracks.partition_point(|&track| track < head);
            let (below, above) = tracks.split_at(split);
            above.iter().chain(below.iter().rev()).copied().collect()
        }
        Direction::Down => {
            let split = tracks.partition_point(|&track| track <= head);
            let (below, above) = tracks.split_at(split);
            below.iter().rev().chain(above.iter()).copied().collect()
        }
    }
}

fn circular_scan(requests: &[Track], head: Track) -> Vec<Track> {
    let tracks = sorted_unique(requests);
    let split = tracks.partition_point(|&track| track < head);
    let (below, above) = tracks.split_at(split);
    above.iter().chain(below.iter()).copied().collect()
}
