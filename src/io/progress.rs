//! Terminal progress for a run of test batches, one bar per batch run

use crate::algorithm::executor::CaseOutcome;
use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static CASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static RUN_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Batch runs: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Cases decided so far in one batch run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchProgress {
    /// Batch label with the method that runs it
    pub label: String,
    /// Cases in the batch
    pub total: usize,
    /// Cases reported so far, including skipped and unstarted ones
    pub reported: usize,
    /// Cases with a decomposition
    pub found: usize,
    /// Cases abandoned at a time limit or never started
    pub cut: usize,
    /// Set once every case has been reported
    pub complete: bool,
}

impl BatchProgress {
    /// Progress of a batch run with nothing reported yet
    pub fn new(label: &str, total: usize) -> Self {
        Self {
            label: label.to_string(),
            total,
            ..Self::default()
        }
    }

    /// Count one reported case
    pub const fn record(&mut self, outcome: &CaseOutcome) {
        self.reported += 1;
        match outcome {
            CaseOutcome::Found(_) => self.found += 1,
            CaseOutcome::LimitExceeded(_) | CaseOutcome::NotStarted => self.cut += 1,
            CaseOutcome::NotFound | CaseOutcome::Skipped(_) => {}
        }
    }

    /// Text shown before the bar
    pub fn prefix(&self) -> String {
        if self.complete {
            format!("✓ {}", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Text shown after the bar
    pub fn message(&self) -> String {
        let width = self.total.to_string().len();
        let counts = format!("{:>width$}/{} found {}", self.reported, self.total, self.found);
        if self.cut > 0 {
            format!("{counts}, {} cut by time limits", self.cut)
        } else {
            counts
        }
    }
}

/// Coordinates progress display for a run of batches
///
/// The newest batch runs each get a bar. A counter of finished batch runs is
/// added when the run has more batch runs than bars.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    run_bar: Option<ProgressBar>,
    case_bars: Vec<ProgressBar>,
    runs: BTreeMap<usize, BatchProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            run_bar: None,
            case_bars: Vec::new(),
            runs: BTreeMap::new(),
        }
    }

    /// Create the bars for a run of `batch_runs` method and batch pairs
    pub fn initialize(&mut self, batch_runs: usize) {
        if batch_runs > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let run_bar = ProgressBar::new(batch_runs as u64);
            run_bar.set_style(RUN_STYLE.clone());
            self.run_bar = Some(self.multi_progress.add(run_bar));
        }

        for _ in 0..batch_runs.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(CASE_STYLE.clone());
            self.case_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Start tracking a batch run of `cases` cases
    pub fn start_batch(&mut self, index: usize, label: &str, cases: usize) {
        self.runs.insert(index, BatchProgress::new(label, cases));
        self.redraw();
    }

    /// Count one reported case of a batch run
    pub fn record_case(&mut self, index: usize, outcome: &CaseOutcome) {
        if let Some(run) = self.runs.get_mut(&index) {
            run.record(outcome);
            self.redraw();
        }
    }

    /// Mark a batch run finished
    pub fn complete_batch(&mut self, index: usize) {
        if let Some(run) = self.runs.get_mut(&index) {
            run.complete = true;
            if let Some(run_bar) = &self.run_bar {
                run_bar.inc(1);
            }
            self.redraw();
        }
    }

    /// Clear every bar from the terminal
    pub fn finish(&self) {
        if let Some(run_bar) = &self.run_bar {
            run_bar.finish_with_message("All batches processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the newest batch runs, blanking bars left over
    fn redraw(&self) {
        let shown = self.runs.len().min(self.case_bars.len());
        let newest = self.runs.values().skip(self.runs.len().saturating_sub(shown));

        for (bar, run) in self.case_bars.iter().zip(newest) {
            bar.set_length(run.total as u64);
            bar.set_position(run.reported as u64);
            bar.set_prefix(run.prefix());
            bar.set_message(run.message());
        }

        for bar in self.case_bars.iter().skip(shown) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_prefix(String::new());
            bar.set_message(String::new());
        }
    }
}
