use log::{debug, trace};
use serde::Serialize;
use std::cmp::Reverse;

use crate::error::Error;
use crate::simulator::PageAlgorithm;

pub type Page = u32;

/// State of one reference after it has been served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub page: Page,
    // Snapshot after the reference, `None` marks an empty frame
    pub frames: Vec<Option<Page>>,
    pub fault: bool,
    // Frame written on a fault
    pub loaded_into: Option<usize>,
    pub evicted: Option<Page>,
}

impl Step {
    /// Frame whose resident page was thrown out, `None` on hits and when an
    /// empty frame was filled.
    pub fn replaced_frame(&self) -> Option<usize> {
        self.evicted.and(self.loaded_into)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageTrace {
    pub algorithm: PageAlgorithm,
    pub frame_count: usize,
    pub steps: Vec<Step>,
    pub fault_count: usize,
    pub hit_ratio: f64,
}

impl PageTrace {
    pub fn hit_count(&self) -> usize {
        self.steps.len() - self.fault_count
    }

    pub fn miss_ratio(&self) -> f64 {
        match self.steps.len() {
            0 => 0.0,
            total => self.fault_count as f64 / total as f64,
        }
    }
}

#[derive(Debug)]
struct Frames {
    slots: Vec<Option<Page>>,
    // Position of the last reference served by each frame
    last_used: Vec<Option<usize>>,
    // Next frame to overwrite under FIFO
    pointer: usize,
}

impl Frames {
    fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
            last_used: vec![None; count],
            pointer: 0,
        }
    }

    fn find(&self, page: Page) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(page))
    }

    fn victim(&mut self, algorithm: PageAlgorithm, reference: &[Page], position: usize) -> usize {
        match algorithm {
            PageAlgorithm::FIFO => {
                let victim = self.pointer;
                self.pointer = (self.pointer + 1) % self.slots.len();
                victim
            }
            // Empty frames sort before any used one
            PageAlgorithm::LRU => (0..self.slots.len())
                .min_by_key(|&frame| self.last_used[frame])
                .unwrap_or(0),
            PageAlgorithm::Optimal => {
                if let Some(empty) = self.slots.iter().position(Option::is_none) {
                    return empty;
                }
                let upcoming = &reference[position + 1..];
                (0..self.slots.len())
                    .min_by_key(|&frame| {
                        let next_use = self.slots[frame]
                            .and_then(|page| upcoming.iter().position(|&p| p == page))
                            .unwrap_or(usize::MAX);
                        Reverse(next_use)
                    })
                    .unwrap_or(0)
            }
        }
    }
}

pub fn simulate(
    reference: &[Page],
    frame_count: usize,
    algorithm: PageAlgorithm,
) -> Result<PageTrace, Error> {
    if frame_count == 0 {
        return Err(Error::NoFrames);
    }

    let mut frames = Frames::new(frame_count);
    let mut steps = Vec::with_capacity(reference.len());
    let mut fault_count = 0;

    for (position, &page) in reference.iter().enumerate() {
        if let Some(frame) = frames.find(page) {
            trace!("#{} page {} hit in frame {}", position, page, frame);
            frames.last_used[frame] = Some(position);
            steps.push(Step {
                page,
                frames: frames.slots.clone(),
                fault: false,
                loaded_into: None,
                evicted: None,
            });
            continue;
        }

        fault_count += 1;
        let frame = frames.victim(algorithm, reference, position);
        let evicted = frames.slots[frame].replace(page);
        frames.last_used[frame] = Some(position);
        trace!(
            "#{} page {} fault, frame {} evicts {:?}",
            position,
            page,
            frame,
            evicted
        );

        steps.push(Step {
            page,
            frames: frames.slots.clone(),
            fault: true,
            loaded_into: Some(frame),
            evicted,
        });
    }

    let hit_ratio = match reference.len() {
        0 => 0.0,
        total => (total - fault_count) as f64 / total as f64,
    };
    debug!(
        "{} with {} frames: {} faults over {} references",
        algorithm,
        frame_count,
        fault_count,
        reference.len()
    );

    Ok(PageTrace {
        algorithm,
        frame_count,
        steps,
        fault_count,
        hit_ratio,
    })
}
