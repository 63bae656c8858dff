use os_sim::config::Config;
use os_sim::parser::{parse_processes, parse_reference_string, parse_requests, Workload};
use os_sim::simulator::{cpu, disk, paging};
use os_sim::simulator::{CpuAlgorithm, Direction, DiskAlgorithm, PageAlgorithm, Process, MAX_TRACK};

#[test]
fn fcfs_three_processes() {
    let processes = vec![
        Process::new("P1", 0, 6),
        Process::new("P2", 2, 4),
        Process::new("P3", 4, 8),
    ];
    let schedule = cpu::simulate(&processes, CpuAlgorithm::FCFS, None).unwrap();

    let spans: Vec<(&str, u64, u64)> = schedule
        .segments
        .iter()
        .map(|s| (s.label.as_str(), s.start, s.end))
        .collect();
    assert_eq!(spans, vec![("P1", 0, 6), ("P2", 6, 10), ("P3", 10, 18)]);

    let waiting: Vec<u64> = schedule.metrics.iter().map(|m| m.waiting).collect();
    assert_eq!(waiting, vec![0, 4, 6]);
    assert!((schedule.average_waiting() - 10.0 / 3.0).abs() < 1e-9);
    assert_eq!(format!("{:.2}", schedule.average_waiting()), "3.33");
}

#[test]
fn fifo_short_reference_string() {
    let reference = parse_reference_string("7 0 1 2 0 3 0 4");
    let trace = paging::simulate(&reference, 3, PageAlgorithm::FIFO).unwrap();

    assert_eq!(trace.fault_count, 7);
    let faults: Vec<bool> = trace.steps.iter().map(|s| s.fault).collect();
    assert_eq!(faults, vec![true, true, true, true, false, true, true, true]);
    assert_eq!(trace.steps[7].frames, vec![Some(4), Some(3), Some(0)]);
}

#[test]
fn scan_upwards_from_53() {
    let requests = parse_requests("98 183 37 122 14 124 65 67", MAX_TRACK);
    let plan = disk::simulate(&requests, 53, DiskAlgorithm::SCAN, Direction::Up, MAX_TRACK).unwrap();

    assert_eq!(plan.sequence(), vec![65, 67, 98, 122, 124, 183, 37, 14]);
    assert_eq!(plan.total_seek_time, (183 - 53) + (183 - 14));
    assert_eq!(plan.total_seek_time, 299);
    assert!(plan.moves.windows(2).all(|pair| pair[0].to == pair[1].from));
    assert_eq!(plan.moves[0].from, 53);
}

#[test]
fn optimal_never_loses() {
    let reference = parse_reference_string("7 0 1 2 0 3 0 4 2 3 0 3 2 1 2 0 1 7 0 1");
    for frames in 1..=5 {
        let fifo = paging::simulate(&reference, frames, PageAlgorithm::FIFO).unwrap();
        let lru = paging::simulate(&reference, frames, PageAlgorithm::LRU).unwrap();
        let optimal = paging::simulate(&reference, frames, PageAlgorithm::Optimal).unwrap();

        assert!(optimal.fault_count <= lru.fault_count, "{frames} frames");
        assert!(optimal.fault_count <= fifo.fault_count, "{frames} frames");
    }
}

#[test]
fn beladys_anomaly_under_fifo() {
    let reference = parse_reference_string("1 2 3 4 1 2 5 1 2 3 4 5");
    let three = paging::simulate(&reference, 3, PageAlgorithm::FIFO).unwrap();
    let four = paging::simulate(&reference, 4, PageAlgorithm::FIFO).unwrap();

    assert_eq!(three.fault_count, 9);
    assert_eq!(four.fault_count, 10);
}

#[test]
fn text_table_round_robin() {
    let processes = parse_processes("P1 0 5\nP2 1 3\nP3 2 8\nP4 3 2").unwrap();
    let schedule = cpu::simulate(
        &processes,
        CpuAlgorithm::RR,
        std::num::NonZeroU64::new(2),
    )
    .unwrap();

    assert_eq!(schedule.makespan(), 18);
    assert!((schedule.average_waiting() - 7.25).abs() < 1e-9);
}

#[test]
fn demo_workload_runs_every_engine() {
    let workload = Workload::from_json(include_bytes!("../demos/textbook.json")).unwrap();
    let config = Config::default();

    let processes = workload.all_processes().unwrap();
    assert_eq!(processes.len(), 4);
    let schedule = cpu::simulate(&processes, CpuAlgorithm::SJF, Some(workload.quantum(&config))).unwrap();
    assert_eq!(schedule.makespan(), 18);

    let trace = paging::simulate(&workload.pages(), workload.frames(&config), PageAlgorithm::LRU).unwrap();
    assert_eq!(trace.fault_count, 12);

    let plan = disk::simulate(
        &workload.tracks(&config),
        workload.head(&config),
        DiskAlgorithm::CSCAN,
        workload.direction(&config),
        config.max_track,
    )
    .unwrap();
    assert_eq!(plan.total_seek_time, 322);
}
