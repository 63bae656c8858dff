//! Side-by-side summaries of every algorithm of one engine on the same input.

use serde::Serialize;
use std::num::NonZeroU64;

use crate::error::Error;
use crate::simulator::{
    cpu, disk, paging, CpuAlgorithm, Direction, DiskAlgorithm, Page, PageAlgorithm, Process,
    Time, Track,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuRow {
    pub algorithm: CpuAlgorithm,
    pub average_waiting: f64,
    pub average_turnaround: f64,
    pub makespan: Time,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagingRow {
    pub algorithm: PageAlgorithm,
    pub fault_count: usize,
    pub hit_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskRow {
    pub algorithm: DiskAlgorithm,
    pub total_seek_time: u64,
    pub average_seek_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison<R> {
    pub rows: Vec<R>,
}

impl Comparison<CpuRow> {
    /// Lowest average waiting time, first algorithm wins ties.
    pub fn best(&self) -> Option<&CpuRow> {
        self.rows
            .iter()
            .reduce(|best, row| if row.average_waiting < best.average_waiting { row } else { best })
    }
}

impl Comparison<PagingRow> {
    pub fn best(&self) -> Option<&PagingRow> {
        self.rows.iter().min_by_key(|row| row.fault_count)
    }
}

impl Comparison<DiskRow> {
    pub fn best(&self) -> Option<&DiskRow> {
        self.rows.iter().min_by_key(|row| row.total_seek_time)
    }
}

pub fn compare_cpu(processes: &[Process], quantum: NonZeroU64) -> Result<Comparison<CpuRow>, Error> {
    let rows = CpuAlgorithm::ALL
        .iter()
        .map(|&algorithm| {
            let schedule = cpu::simulate(processes, algorithm, Some(quantum))?;
            Ok(CpuRow {
                algorithm,
                average_waiting: schedule.average_waiting(),
                average_turnaround: schedule.average_turnaround(),
                makespan: schedule.makespan(),
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(Comparison { rows })
}

pub fn compare_paging(reference: &[Page], frame_count: usize) -> Result<Comparison<PagingRow>, Error> {
    let rows = PageAlgorithm::ALL
        .iter()
        .map(|&algorithm| {
            let trace = paging::simulate(reference, frame_count, algorithm)?;
            Ok(PagingRow {
                algorithm,
                fault_count: trace.fault_count,
                hit_ratio: trace.hit_ratio,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(Comparison { rows })
}

pub fn compare_disk(
    requests: &[Track],
    head: Track,
    direction: Direction,
    max_track: Track,
) -> Result<Comparison<DiskRow>, Error> {
    let disk = disk::Disk::new(max_track);
    let rows = DiskAlgorithm::ALL
        .iter()
        .map(|&algorithm| {
            let plan = disk.schedule(requests, head, algorithm, direction)?;
            Ok(DiskRow {
                algorithm,
                total_seek_time: plan.total_seek_time,
                average_seek_time: plan.average_seek_time(),
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(Comparison { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_rows_follow_algorithm_order() {
        let processes = vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 8),
            Process::new("P4", 3, 2),
        ];
        let report = compare_cpu(&processes, NonZeroU64::new(2).unwrap()).unwrap();

        let algorithms: Vec<CpuAlgorithm> = report.rows.iter().map(|r| r.algorithm).collect();
        assert_eq!(algorithms, CpuAlgorithm::ALL.to_vec());
        assert!(report.rows.iter().all(|r| r.makespan == 18));
        assert_eq!(report.best().map(|r| r.algorithm), Some(CpuAlgorithm::SJF));
    }

    #[test]
    fn paging_best_is_optimal() {
        let reference = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];
        let report = compare_paging(&reference, 3).unwrap();

        let faults: Vec<usize> = report.rows.iter().map(|r| r.fault_count).collect();
        assert_eq!(faults, vec![15, 12, 9]);
        assert_eq!(report.best().map(|r| r.algorithm), Some(PageAlgorithm::Optimal));
    }

    #[test]
    fn disk_best_is_sstf_for_textbook_queue() {
        let requests = [98, 183, 37, 122, 14, 124, 65, 67];
        let report = compare_disk(&requests, 53, Direction::Up, 199).unwrap();

        let totals: Vec<u64> = report.rows.iter().map(|r| r.total_seek_time).collect();
        assert_eq!(totals, vec![640, 236, 299, 322]);
        assert_eq!(report.best().map(|r| r.algorithm), Some(DiskAlgorithm::SSTF));
    }

    #[test]
    fn ties_go_to_first_algorithm() {
        let report = compare_disk(&[10], 10, Direction::Up, 199).unwrap();

        assert_eq!(report.best().map(|r| r.algorithm), Some(DiskAlgorithm::FCFS));
    }

    #[test]
    fn errors_propagate() {
        assert_eq!(compare_paging(&[1, 2], 0), Err(Error::NoFrames));
    }
}
