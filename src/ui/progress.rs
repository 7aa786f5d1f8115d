use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::progress::{ProgressTracker, ProgressView, StageRow};
use crate::ui::icons::{CHECK, STAGE_CURRENT, STAGE_DONE, STAGE_PENDING, WARNING};

/// Terminal view of the progress phase, rendered via `indicatif`.
///
/// Stacked lines:
/// - Percentage bar with the latest server message
/// - One checklist line per known stage
/// - Status line carrying the connecting warning
pub struct ProgressUI {
    multi: MultiProgress,
    bar: ProgressBar,
    stages: Vec<ProgressBar>,
    status: ProgressBar,
}

impl ProgressUI {
    pub fn new(company: &str) -> Self {
        Self::with_target(company, ProgressDrawTarget::stderr())
    }

    /// Build the view without drawing anything. Used when output is JSON.
    pub fn hidden() -> Self {
        Self::with_target("", ProgressDrawTarget::hidden())
    }

    fn with_target(company: &str, target: ProgressDrawTarget) -> Self {
        let multi = MultiProgress::with_draw_target(target);

        let bar_style = ProgressStyle::default_bar()
            .template("{prefix:.bold.dim} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .expect("progress bar template is a valid static string")
            .progress_chars("█▓▒░");
        let bar = multi.add(ProgressBar::new(100));
        bar.set_style(bar_style);
        bar.set_prefix(if company.is_empty() {
            "Analyzing".to_string()
        } else {
            format!("Analyzing {}", company)
        });

        let line_style = ProgressStyle::default_bar()
            .template("{msg}")
            .expect("progress bar template is a valid static string");
        let stages = (0..intel_common::STAGES.len())
            .map(|_| {
                let line = multi.add(ProgressBar::new(0));
                line.set_style(line_style.clone());
                line
            })
            .collect();
        let status = multi.add(ProgressBar::new(0));
        status.set_style(line_style);

        Self {
            multi,
            bar,
            stages,
            status,
        }
    }

    /// Print a line via `MultiProgress`, falling back to `eprintln!` if the rich UI fails.
    fn print_line(&self, msg: impl AsRef<str>) {
        if self.multi.println(msg.as_ref()).is_err() {
            eprintln!("{}", msg.as_ref());
        }
    }
}

impl ProgressView for ProgressUI {
    fn render(&mut self, tracker: &ProgressTracker) {
        self.bar.set_position(u64::from(tracker.percent()));
        self.bar.set_message(latest_message(tracker));
        for (line, row) in self.stages.iter().zip(tracker.checklist()) {
            line.set_message(checklist_line(&row));
        }
        self.status.set_message(status_line(tracker));
    }

    fn finish(&mut self, tracker: &ProgressTracker) {
        self.bar.finish();
        for line in &self.stages {
            line.finish();
        }
        self.status.finish_and_clear();
        self.print_line(format!(
            "{}Analysis complete (session {})",
            CHECK,
            style(tracker.session_id()).cyan()
        ));
    }
}

/// One styled checklist row: ✓ complete, ▶ in progress, · pending.
pub fn checklist_line(row: &StageRow) -> String {
    let label = row.stage.label();
    if row.complete {
        format!("  {} {}", style(STAGE_DONE).green(), style(label).dim())
    } else if row.current {
        format!("  {} {}", style(STAGE_CURRENT).cyan(), style(label).bold())
    } else {
        format!("  {} {}", style(STAGE_PENDING).dim(), style(label).dim())
    }
}

/// Warning shown while the channel is not live; empty otherwise.
pub fn status_line(tracker: &ProgressTracker) -> String {
    if tracker.is_connecting() {
        format!("{}{}", WARNING, style("Connecting to server...").yellow())
    } else {
        String::new()
    }
}

fn latest_message(tracker: &ProgressTracker) -> String {
    match tracker.latest() {
        Some(event) if !event.message.is_empty() => event.message.clone(),
        Some(_) => String::new(),
        None => "Starting analysis...".to_string(),
    }
}
