pub mod algorithm;
pub mod cpu;
pub mod disk;
pub mod paging;

pub use algorithm::{CpuAlgorithm, Direction, DiskAlgorithm, PageAlgorithm};
pub use cpu::{Process, ProcessMetrics, Schedule, Segment, Time};
pub use disk::{Disk, Move, SeekPlan, Track, MAX_TRACK};
pub use paging::{Page, PageTrace, Step};
