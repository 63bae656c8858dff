use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuAlgorithm {
    FCFS,
    SJF,
    RR,
}

impl CpuAlgorithm {
    pub const ALL: [CpuAlgorithm; 3] = [CpuAlgorithm::FCFS, CpuAlgorithm::SJF, CpuAlgorithm::RR];
}

impl fmt::Display for CpuAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CpuAlgorithm::FCFS => write!(f, "FCFS"),
            CpuAlgorithm::SJF => write!(f, "SJF"),
            CpuAlgorithm::RR => write!(f, "RR"),
        }
    }
}

impl FromStr for CpuAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(CpuAlgorithm::FCFS),
            "sjf" => Ok(CpuAlgorithm::SJF),
            "rr" | "round-robin" => Ok(CpuAlgorithm::RR),
            _ => Err(Self::Err::ParseAlgorithmError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageAlgorithm {
    FIFO,
    LRU,
    Optimal,
}

impl PageAlgorithm {
    pub const ALL: [PageAlgorithm; 3] = [PageAlgorithm::FIFO, PageAlgorithm::LRU, PageAlgorithm::Optimal];
}

impl fmt::Display for PageAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PageAlgorithm::FIFO => write!(f, "FIFO"),
            PageAlgorithm::LRU => write!(f, "LRU"),
            PageAlgorithm::Optimal => write!(f, "Optimal"),
        }
    }
}

impl FromStr for PageAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PageAlgorithm::FIFO),
            "lru" => Ok(PageAlgorithm::LRU),
            "optimal" | "opt" => Ok(PageAlgorithm::Optimal),
            _ => Err(Self::Err::ParseAlgorithmError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskAlgorithm {
    FCFS,
    SSTF,
    SCAN,
    CSCAN,
}

impl DiskAlgorithm {
    pub const ALL: [DiskAlgorithm; 4] = [
        DiskAlgorithm::FCFS,
        DiskAlgorithm::SSTF,
        DiskAlgorithm::SCAN,
        DiskAlgorithm::CSCAN,
    ];
}

impl fmt::Display for DiskAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiskAlgorithm::FCFS => write!(f, "FCFS"),
            DiskAlgorithm::SSTF => write!(f, "SSTF"),
            DiskAlgorithm::SCAN => write!(f, "SCAN"),
            DiskAlgorithm::CSCAN => write!(f, "C-SCAN"),
        }
    }
}

impl FromStr for DiskAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(DiskAlgorithm::FCFS),
            "sstf" => Ok(DiskAlgorithm::SSTF),
            "scan" => Ok(DiskAlgorithm::SCAN),
            "cscan" | "c-scan" => Ok(DiskAlgorithm::CSCAN),
            _ => Err(Self::Err::ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Initial sweep direction of the disk head under SCAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(Self::Err::ParseDirectionError(s.to_string())),
        }
    }
}
