use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::num::NonZeroU64;

use crate::error::Error;
use crate::simulator::CpuAlgorithm;

pub type Time = u64;

pub const IDLE_LABEL: &str = "Idle";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Process {
    pub label: String,
    pub arrival: Time,
    pub burst: Time,
}

impl Process {
    pub fn new(label: impl Into<String>, arrival: Time, burst: Time) -> Self {
        Self {
            label: label.into(),
            arrival,
            burst,
        }
    }
}

/// One bar of the Gantt chart. `pid` is the index of the process in the
/// input list, `None` while the CPU is idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub pid: Option<usize>,
    pub label: String,
    pub start: Time,
    pub end: Time,
}

impl Segment {
    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub label: String,
    pub arrival: Time,
    pub burst: Time,
    pub completion: Time,
    pub turnaround: Time,
    pub waiting: Time,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub algorithm: CpuAlgorithm,
    pub segments: Vec<Segment>,
    // Same order as the input processes
    pub metrics: Vec<ProcessMetrics>,
}

impl Schedule {
    pub fn makespan(&self) -> Time {
        self.segments.last().map_or(0, |segment| segment.end)
    }

    pub fn idle_time(&self) -> Time {
        self.segments
            .iter()
            .filter(|segment| segment.is_idle())
            .map(Segment::duration)
            .sum()
    }

    pub fn busy_time(&self) -> Time {
        self.makespan() - self.idle_time()
    }

    pub fn cpu_utilisation(&self) -> f64 {
        match self.makespan() {
            0 => 0.0,
            makespan => self.busy_time() as f64 / makespan as f64,
        }
    }

    pub fn average_waiting(&self) -> f64 {
        average(self.metrics.iter().map(|m| m.waiting))
    }

    pub fn average_turnaround(&self) -> f64 {
        average(self.metrics.iter().map(|m| m.turnaround))
    }

    /// Segment occupying the CPU during `[time, time + 1)`.
    pub fn running_at(&self, time: Time) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|segment| segment.start <= time && time < segment.end)
    }
}

fn average(values: impl ExactSizeIterator<Item = Time>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.map(|value| value as f64).sum::<f64>() / count as f64
}

/// Run `processes` through `algorithm`. `quantum` is only read by Round-Robin.
pub fn simulate(
    processes: &[Process],
    algorithm: CpuAlgorithm,
    quantum: Option<NonZeroU64>,
) -> Result<Schedule, Error> {
    if let Some(process) = processes.iter().find(|p| p.burst == 0) {
        return Err(Error::ZeroBurst(process.label.clone()));
    }
    // The clock never passes the last arrival plus the total burst
    let latest_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |end, p| end.checked_add(p.burst))
        .ok_or(Error::TimeOverflow)?;

    let mut timeline = Timeline::new(processes);
    match algorithm {
        CpuAlgorithm::FCFS => first_come_first_serve(&mut timeline),
        CpuAlgorithm::SJF => shortest_job_first(&mut timeline),
        CpuAlgorithm::RR => {
            let quantum = quantum.ok_or(Error::MissingQuantum)?;
            round_robin(&mut timeline, quantum.get());
        }
    }

    let schedule = timeline.finish(algorithm);
    debug!(
        "{} scheduled {} processes, makespan {}, avg waiting {:.2}",
        algorithm,
        processes.len(),
        schedule.makespan(),
        schedule.average_waiting()
    );
    Ok(schedule)
}

struct Timeline<'a> {
    processes: &'a [Process],
    clock: Time,
    segments: Vec<Segment>,
    completion: Vec<Option<Time>>,
}

impl<'a> Timeline<'a> {
    fn new(processes: &'a [Process]) -> Self {
        Self {
            processes,
            clock: 0,
            segments: vec![],
            completion: vec![None; processes.len()],
        }
    }

    // Indices sorted by arrival, ties keep input order
    fn arrival_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.processes.len()).collect();
        order.sort_by_key(|&pid| self.processes[pid].arrival);
        order
    }

    fn idle_until(&mut self, time: Time) {
        if time > self.clock {
            trace!("t={} idle until {}", self.clock, time);
            self.segments.push(Segment {
                pid: None,
                label: IDLE_LABEL.to_string(),
                start: self.clock,
                end: time,
            });
            self.clock = time;
        }
    }

    fn run(&mut self, pid: usize, duration: Time) {
        let process = &self.processes[pid];
        trace!("t={} run {} for {}", self.clock, process.label, duration);
        self.segments.push(Segment {
            pid: Some(pid),
            label: process.label.clone(),
            start: self.clock,
            end: self.clock + duration,
        });
        self.clock += duration;
    }

    fn complete(&mut self, pid: usize) {
        self.completion[pid] = Some(self.clock);
    }

    fn is_complete(&self, pid: usize) -> bool {
        self.completion[pid].is_some()
    }

    fn finish(self, algorithm: CpuAlgorithm) -> Schedule {
        let metrics = self
            .processes
            .iter()
            .zip(&self.completion)
            .map(|(process, completion)| {
                // Every engine completes every process before finishing
                let completion = completion.unwrap_or(self.clock);
                let turnaround = completion - process.arrival;
                ProcessMetrics {
                    label: process.label.clone(),
                    arrival: process.arrival,
                    burst: process.burst,
                    completion,
                    turnaround,
                    waiting: turnaround - process.burst,
                }
            })
            .collect();

        Schedule {
            algorithm,
            segments: self.segments,
            metrics,
        }
    }
}

fn first_come_first_serve(timeline: &mut Timeline) {
    for pid in timeline.arrival_order() {
        let process = &timeline.processes[pid];
        let (arrival, burst) = (process.arrival, process.burst);
        timeline.idle_until(arrival);
        timeline.run(pid, burst);
        timeline.complete(pid);
    }
}

fn shortest_job_first(timeline: &mut Timeline) {
    let processes = timeline.processes;
    let count = processes.len();
    let mut completed = 0;

    while completed < count {
        let clock = timeline.clock;
        let candidate = (0..count)
            .filter(|&pid| !timeline.is_complete(pid) && processes[pid].arrival <= clock)
            .min_by_key(|&pid| (processes[pid].burst, processes[pid].arrival, pid));

        match candidate {
            Some(pid) => {
                timeline.run(pid, processes[pid].burst);
                timeline.complete(pid);
                completed += 1;
            }
            None => {
                let next_arrival = (0..count)
                    .filter(|&pid| !timeline.is_complete(pid))
                    .map(|pid| processes[pid].arrival)
                    .min();
                match next_arrival {
                    Some(arrival) => timeline.idle_until(arrival),
                    None => break,
                }
            }
        }
    }
}

fn round_robin(timeline: &mut Timeline, quantum: Time) {
    let processes = timeline.processes;
    let order = timeline.arrival_order();
    let mut remaining: Vec<Time> = processes.iter().map(|p| p.burst).collect();
    let mut ready: VecDeque<usize> = VecDeque::new();
    let mut admitted = 0;

    // Queue everything that has arrived by the current clock, in arrival order
    let admit = |clock: Time, admitted: &mut usize, ready: &mut VecDeque<usize>| {
        while *admitted < order.len() && processes[order[*admitted]].arrival <= clock {
            ready.push_back(order[*admitted]);
            *admitted += 1;
        }
    };

    loop {
        admit(timeline.clock, &mut admitted, &mut ready);

        let Some(pid) = ready.pop_front() else {
            match order.get(admitted) {
                Some(&next) => {
                    timeline.idle_until(processes[next].arrival);
                    continue;
                }
                None => break,
            }
        };

        let slice = quantum.min(remaining[pid]);
        timeline.run(pid, slice);
        remaining[pid] -= slice;

        // Arrivals during the slice go ahead of the preempted process
        admit(timeline.clock, &mut admitted, &mut ready);

        if remaining[pid] > 0 {
            ready.push_back(pid);
        } else {
            timeline.complete(pid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantum(q: u64) -> Option<NonZeroU64> {
        NonZeroU64::new(q)
    }

    fn spans(schedule: &Schedule) -> Vec<(&str, Time, Time)> {
        schedule
            .segments
            .iter()
            .map(|s| (s.label.as_str(), s.start, s.end))
            .collect()
    }

    fn textbook() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 8),
            Process::new("P4", 3, 2),
        ]
    }

    #[test]
    fn fcfs_runs_in_arrival_order() {
        let schedule = simulate(&textbook(), CpuAlgorithm::FCFS, None).unwrap();

        assert_eq!(
            spans(&schedule),
            vec![("P1", 0, 5), ("P2", 5, 8), ("P3", 8, 16), ("P4", 16, 18)]
        );
        let waiting: Vec<Time> = schedule.metrics.iter().map(|m| m.waiting).collect();
        assert_eq!(waiting, vec![0, 4, 6, 13]);
    }

    #[test]
    fn fcfs_ties_keep_input_order() {
        let processes = vec![Process::new("B", 0, 2), Process::new("A", 0, 1)];
        let schedule = simulate(&processes, CpuAlgorithm::FCFS, None).unwrap();

        assert_eq!(spans(&schedule), vec![("B", 0, 2), ("A", 2, 3)]);
    }

    #[test]
    fn fcfs_inserts_idle_gaps() {
        let processes = vec![Process::new("P1", 2, 3), Process::new("P2", 10, 1)];
        let schedule = simulate(&processes, CpuAlgorithm::FCFS, None).unwrap();

        assert_eq!(
            spans(&schedule),
            vec![("Idle", 0, 2), ("P1", 2, 5), ("Idle", 5, 10), ("P2", 10, 11)]
        );
        assert_eq!(schedule.idle_time(), 7);
        assert_eq!(schedule.busy_time(), 4);
    }

    #[test]
    fn sjf_picks_shortest_arrived_job() {
        let schedule = simulate(&textbook(), CpuAlgorithm::SJF, None).unwrap();

        assert_eq!(
            spans(&schedule),
            vec![("P1", 0, 5), ("P4", 5, 7), ("P2", 7, 10), ("P3", 10, 18)]
        );
        assert_eq!(schedule.metrics[3].waiting, 2);
        assert_eq!(schedule.metrics[2].completion, 18);
    }

    #[test]
    fn sjf_breaks_ties_by_arrival_then_input_order() {
        let processes = vec![
            Process::new("Long", 0, 4),
            Process::new("Late", 2, 2),
            Process::new("Early", 1, 2),
            Process::new("Twin", 1, 2),
        ];
        let schedule = simulate(&processes, CpuAlgorithm::SJF, None).unwrap();

        let order: Vec<&str> = schedule.segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(order, vec!["Long", "Early", "Twin", "Late"]);
    }

    #[test]
    fn sjf_idles_until_next_arrival() {
        let processes = vec![Process::new("P1", 3, 2), Process::new("P2", 8, 1)];
        let schedule = simulate(&processes, CpuAlgorithm::SJF, None).unwrap();

        assert_eq!(
            spans(&schedule),
            vec![("Idle", 0, 3), ("P1", 3, 5), ("Idle", 5, 8), ("P2", 8, 9)]
        );
    }

    #[test]
    fn round_robin_requeues_arrivals_before_preempted_process() {
        let schedule = simulate(&textbook(), CpuAlgorithm::RR, quantum(2)).unwrap();

        assert_eq!(
            spans(&schedule),
            vec![
                ("P1", 0, 2),
                ("P2", 2, 4),
                ("P3", 4, 6),
                ("P1", 6, 8),
                ("P4", 8, 10),
                ("P2", 10, 11),
                ("P3", 11, 13),
                ("P1", 13, 14),
                ("P3", 14, 16),
                ("P3", 16, 18),
            ]
        );
        let completion: Vec<Time> = schedule.metrics.iter().map(|m| m.completion).collect();
        assert_eq!(completion, vec![14, 11, 18, 10]);
    }

    #[test]
    fn round_robin_idles_when_queue_drains() {
        let processes = vec![Process::new("P1", 0, 1), Process::new("P2", 4, 3)];
        let schedule = simulate(&processes, CpuAlgorithm::RR, quantum(2)).unwrap();

        assert_eq!(
            spans(&schedule),
            vec![("P1", 0, 1), ("Idle", 1, 4), ("P2", 4, 6), ("P2", 6, 7)]
        );
    }

    #[test]
    fn round_robin_requires_quantum() {
        assert_eq!(
            simulate(&textbook(), CpuAlgorithm::RR, None),
            Err(Error::MissingQuantum)
        );
    }

    #[test]
    fn zero_burst_is_rejected() {
        let processes = vec![Process::new("P1", 0, 0)];
        assert_eq!(
            simulate(&processes, CpuAlgorithm::FCFS, None),
            Err(Error::ZeroBurst("P1".to_string()))
        );
    }

    #[test]
    fn huge_times_are_rejected() {
        let processes = vec![Process::new("P1", Time::MAX, 1)];
        assert_eq!(
            simulate(&processes, CpuAlgorithm::FCFS, None),
            Err(Error::TimeOverflow)
        );

        let processes = vec![
            Process::new("P1", 0, Time::MAX / 2 + 1),
            Process::new("P2", 0, Time::MAX / 2 + 1),
        ];
        for algorithm in CpuAlgorithm::ALL {
            assert_eq!(
                simulate(&processes, algorithm, quantum(4)),
                Err(Error::TimeOverflow)
            );
        }
    }

    #[test]
    fn largest_representable_times_are_scheduled() {
        let processes = vec![Process::new("P1", Time::MAX - 1, 1)];
        let schedule = simulate(&processes, CpuAlgorithm::FCFS, None).unwrap();

        assert_eq!(schedule.makespan(), Time::MAX);
        assert_eq!(schedule.metrics[0].waiting, 0);
        assert_eq!(schedule.average_turnaround(), 1.0);
    }

    #[test]
    fn empty_process_list_gives_empty_schedule() {
        for algorithm in CpuAlgorithm::ALL {
            let schedule = simulate(&[], algorithm, quantum(1)).unwrap();
            assert!(schedule.segments.is_empty());
            assert!(schedule.metrics.is_empty());
            assert_eq!(schedule.average_waiting(), 0.0);
            assert_eq!(schedule.cpu_utilisation(), 0.0);
        }
    }

    #[test]
    fn running_at_finds_segment() {
        let schedule = simulate(&textbook(), CpuAlgorithm::FCFS, None).unwrap();

        assert_eq!(schedule.running_at(0).map(|s| s.label.as_str()), Some("P1"));
        assert_eq!(schedule.running_at(5).map(|s| s.label.as_str()), Some("P2"));
        assert_eq!(schedule.running_at(18), None);
    }
}
