use iced::font;
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{color, Font, Length};
use iced::{widget, Task};
use log::{info, warn};

use os_sim::parser::Workload;
use os_sim::simulator::{cpu, disk, paging};
use os_sim::simulator::{CpuAlgorithm, DiskAlgorithm, Move, PageAlgorithm, Segment, Step};
use os_sim::{compare_cpu, compare_disk, compare_paging, logger, Playback};
use os_sim::{config::Config, error::Error};

const BOLD: Font = Font {
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};

fn main() -> iced::Result {
    let config = Config::load();
    if let Err(error) = logger::init(config.log_level) {
        eprintln!("{}", error);
    }

    iced::application("OS Scheduling Simulator", Visualizer::update, Visualizer::view)
        .run_with(move || Visualizer::new(config))
}

struct Visualizer {
    config: Config,
    workload: Option<Workload>,
    cpu_algorithm: CpuAlgorithm,
    page_algorithm: PageAlgorithm,
    disk_algorithm: DiskAlgorithm,
    segments: Playback<Segment>,
    steps: Playback<Step>,
    moves: Playback<Move>,
    summary: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    OpenFile,
    WorkloadOpened(Result<Workload, Error>),
    SelectCpu(CpuAlgorithm),
    SelectPaging(PageAlgorithm),
    SelectDisk(DiskAlgorithm),
    Next,
    Prev,
    Reset,
    Finish,
    DialogResult(rfd::MessageDialogResult),
}

impl Visualizer {
    fn new(config: Config) -> (Self, Task<Message>) {
        (
            Self {
                config,
                workload: None,
                cpu_algorithm: CpuAlgorithm::FCFS,
                page_algorithm: PageAlgorithm::FIFO,
                disk_algorithm: DiskAlgorithm::FCFS,
                segments: Playback::default(),
                steps: Playback::default(),
                moves: Playback::default(),
                summary: vec![],
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFile => Task::perform(open_workload(), Message::WorkloadOpened),
            Message::WorkloadOpened(Ok(workload)) => {
                self.workload = Some(workload);
                self.rerun()
            }
            Message::WorkloadOpened(Err(Error::DialogClosed)) => Task::none(),
            Message::WorkloadOpened(Err(error)) => error_dialog(error),
            Message::SelectCpu(algorithm) => {
                self.cpu_algorithm = algorithm;
                self.rerun()
            }
            Message::SelectPaging(algorithm) => {
                self.page_algorithm = algorithm;
                self.rerun()
            }
            Message::SelectDisk(algorithm) => {
                self.disk_algorithm = algorithm;
                self.rerun()
            }
            Message::Next => {
                self.segments.next();
                self.steps.next();
                self.moves.next();
                Task::none()
            }
            Message::Prev => {
                self.segments.prev();
                self.steps.prev();
                self.moves.prev();
                Task::none()
            }
            Message::Reset => {
                self.segments.reset();
                self.steps.reset();
                self.moves.reset();
                Task::none()
            }
            Message::Finish => {
                self.segments.finish();
                self.steps.finish();
                self.moves.finish();
                Task::none()
            }
            Message::DialogResult(_result) => Task::none(),
        }
    }

    // Nothing to simulate until a workload has been opened
    fn rerun(&mut self) -> Task<Message> {
        if self.workload.is_none() {
            return Task::none();
        }
        match self.simulate() {
            Ok(()) => Task::none(),
            Err(error) => {
                warn!("simulation failed: {}", error);
                error_dialog(error)
            }
        }
    }

    fn simulate(&mut self) -> Result<(), Error> {
        let workload = self.workload.as_ref().ok_or(Error::NoWorkloadOpened)?;
        let config = &self.config;

        let processes = workload.all_processes()?;
        let quantum = workload.quantum(config);
        let pages = workload.pages();
        let frames = workload.frames(config);
        let tracks = workload.tracks(config);
        let head = workload.head(config);
        let direction = workload.direction(config);

        info!(
            "simulating {} processes, {} page references, {} disk requests",
            processes.len(),
            pages.len(),
            tracks.len()
        );

        let schedule = cpu::simulate(&processes, self.cpu_algorithm, Some(quantum))?;
        let trace = paging::simulate(&pages, frames, self.page_algorithm)?;
        let plan = disk::simulate(&tracks, head, self.disk_algorithm, direction, config.max_track)?;

        let mut summary = vec![
            format!(
                "{}: avg waiting {:.2}, avg turnaround {:.2}, utilisation {:.0}%",
                schedule.algorithm,
                schedule.average_waiting(),
                schedule.average_turnaround(),
                schedule.cpu_utilisation() * 100.0
            ),
            format!(
                "{} ({} frames): {} faults, hit ratio {:.2}",
                trace.algorithm, frames, trace.fault_count, trace.hit_ratio
            ),
            format!(
                "{} from {} ({}): total seek {}, avg {:.2}",
                plan.algorithm,
                head,
                direction,
                plan.total_seek_time,
                plan.average_seek_time()
            ),
            String::new(),
        ];

        for row in compare_cpu(&processes, quantum)?.rows {
            summary.push(format!(
                "{:<8} waiting {:>6.2}  turnaround {:>6.2}  makespan {}",
                row.algorithm, row.average_waiting, row.average_turnaround, row.makespan
            ));
        }
        for row in compare_paging(&pages, frames)?.rows {
            summary.push(format!(
                "{:<8} faults {:>3}  hit ratio {:.2}",
                row.algorithm, row.fault_count, row.hit_ratio
            ));
        }
        for row in compare_disk(&tracks, head, direction, config.max_track)?.rows {
            summary.push(format!(
                "{:<8} seek {:>5}  avg {:.2}",
                row.algorithm, row.total_seek_time, row.average_seek_time
            ));
        }

        self.summary = summary;
        self.segments = Playback::new(schedule.segments);
        self.steps = Playback::new(trace.steps);
        self.moves = Playback::new(plan.moves);
        Ok(())
    }

    fn view(&self) -> iced::Element<'_, Message> {
        let mut menu_bar = row![button("File").on_press(Message::OpenFile)]
            .spacing(5)
            .height(40)
            .padding([5, 10]);
        for algorithm in CpuAlgorithm::ALL {
            menu_bar = menu_bar.push(button(text(algorithm.to_string())).on_press(Message::SelectCpu(algorithm)));
        }
        for algorithm in PageAlgorithm::ALL {
            menu_bar = menu_bar.push(button(text(algorithm.to_string())).on_press(Message::SelectPaging(algorithm)));
        }
        for algorithm in DiskAlgorithm::ALL {
            menu_bar = menu_bar.push(button(text(algorithm.to_string())).on_press(Message::SelectDisk(algorithm)));
        }
        menu_bar = menu_bar.push(widget::Space::new(Length::Fill, Length::Shrink));

        let controls = row![
            button("Prev").on_press(Message::Prev),
            button("Next").on_press(Message::Next),
            button("Reset").on_press(Message::Reset),
            button("Finish").on_press(Message::Finish),
            text(format!("step {}/{}", self.steps.position(), self.steps.len())),
        ]
        .spacing(5)
        .padding([5, 10]);

        let gantt = self
            .segments
            .revealed()
            .iter()
            .map(|segment| format!("{:>4} - {:<4} {}", segment.start, segment.end, segment.label))
            .collect();

        let frames = self
            .steps
            .revealed()
            .iter()
            .map(|step| {
                let frames = step
                    .frames
                    .iter()
                    .map(|frame| frame.map_or("-".to_string(), |page| page.to_string()))
                    .collect::<Vec<_>>()
                    .join(" ");
                let marker = if step.fault { "F" } else { "" };
                format!("{:>3} | {} {}", step.page, frames, marker)
            })
            .collect();

        let seeks = self
            .moves
            .revealed()
            .iter()
            .map(|m| format!("{:>3} -> {:>3}  ({})", m.from, m.to, m.seek_time))
            .collect();

        widget::container(column![
            menu_bar,
            controls,
            row![
                pane(format!("CPU {}", self.cpu_algorithm), gantt),
                pane(format!("Paging {}", self.page_algorithm), frames),
                pane(format!("Disk {}", self.disk_algorithm), seeks),
                pane("Comparison".to_string(), self.summary.clone()),
            ]
            .spacing(20)
            .padding([10, 10])
        ])
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

fn pane<'a>(title: String, lines: Vec<String>) -> iced::Element<'a, Message> {
    let mut content = column![text(title).font(BOLD).color(color!(0xff0000))].padding([5, 10]);
    for line in lines {
        content = content.push(text(line).font(Font::MONOSPACE));
    }

    container(scrollable(content))
        .height(Length::Fill)
        .width(Length::FillPortion(1))
        .style(container::rounded_box)
        .into()
}

fn error_dialog(error: Error) -> Task<Message> {
    let dialog = rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(format!("{}", error))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();

    Task::perform(dialog, Message::DialogResult)
}

async fn open_workload() -> Result<Workload, Error> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Choose a workload...")
        .add_filter("Workload", &["json"])
        .pick_file()
        .await
        .ok_or(Error::DialogClosed)?;

    let contents = tokio::fs::read(handle.path())
        .await
        .map_err(|error| error.kind())
        .map_err(Error::IO)?;

    Workload::from_json(&contents)
}
