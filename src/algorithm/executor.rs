//! Batch execution of test cases under per-test and per-batch time limits

use crate::{
    algorithm::{
        search::{Decomposition, Method, Verdict, decide},
        timeout::{Deadline, Timeout, TimeoutGuard},
    },
    io::{
        configuration::{MIN_SEARCH_STACK_BYTES, SEARCH_DEPTH_FACTOR, SEARCH_FRAME_BYTES},
        dataset::TestCase,
    },
};
use std::{
    panic, thread,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};

/// Method and time limits applied to one batch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Engine every case is decided with
    pub method: Method,
    /// Time allowed per case
    pub test_timeout: Option<Duration>,
    /// Time allowed for the whole batch
    pub global_timeout: Option<Duration>,
}

impl BatchConfig {
    /// Configuration without time limits
    pub const fn unbounded(method: Method) -> Self {
        Self {
            method,
            test_timeout: None,
            global_timeout: None,
        }
    }
}

/// What happened to a single case
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseOutcome {
    /// A decomposition was found
    Found(Decomposition),
    /// The search proved no decomposition exists
    NotFound,
    /// A deadline expired while searching
    LimitExceeded(Timeout),
    /// The case failed validation and was not searched
    Skipped(String),
    /// The batch deadline had expired before the case was reached
    NotStarted,
}

/// Outcome of one case with its position and search time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseReport {
    /// Position of the case in its batch
    pub index: usize,
    /// Result of the case
    pub outcome: CaseOutcome,
    /// Wall time spent searching
    pub elapsed: Duration,
}

/// Per-batch tallies of case outcomes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchSummary {
    /// Engine the batch ran with
    pub method: Method,
    /// Label of the batch (vertex count or file name)
    pub label: String,
    /// Cases with a decomposition
    pub found: usize,
    /// Total search time of found cases
    pub found_time: Duration,
    /// Cases proven not decomposable
    pub not_found: usize,
    /// Total search time of not found cases
    pub not_found_time: Duration,
    /// Cases abandoned at a deadline
    pub limit_exceeded: usize,
    /// Cases rejected by validation
    pub skipped: usize,
    /// Cases never reached because the batch deadline expired
    pub not_started: usize,
}

impl BatchSummary {
    /// Empty tally for a batch
    pub fn new(method: Method, label: impl Into<String>) -> Self {
        Self {
            method,
            label: label.into(),
            found: 0,
            found_time: Duration::ZERO,
            not_found: 0,
            not_found_time: Duration::ZERO,
            limit_exceeded: 0,
            skipped: 0,
            not_started: 0,
        }
    }

    /// Add one case to the tally
    pub fn record(&mut self, report: &CaseReport) {
        match report.outcome {
            CaseOutcome::Found(_) => {
                self.found += 1;
                self.found_time += report.elapsed;
            }
            CaseOutcome::NotFound => {
                self.not_found += 1;
                self.not_found_time += report.elapsed;
            }
            CaseOutcome::LimitExceeded(_) => self.limit_exceeded += 1,
            CaseOutcome::Skipped(_) => self.skipped += 1,
            CaseOutcome::NotStarted => self.not_started += 1,
        }
    }

    /// Mean search time of found cases in seconds
    pub fn mean_found_seconds(&self) -> Option<f64> {
        mean_seconds(self.found_time, self.found)
    }

    /// Mean search time of not found cases in seconds
    pub fn mean_not_found_seconds(&self) -> Option<f64> {
        mean_seconds(self.not_found_time, self.not_found)
    }

    /// Number of cases recorded
    pub const fn total(&self) -> usize {
        self.found + self.not_found + self.limit_exceeded + self.skipped + self.not_started
    }

    /// Test if the batch deadline cut the batch short
    pub const fn was_cut_short(&self) -> bool {
        self.not_started > 0
    }
}

fn mean_seconds(total: Duration, count: usize) -> Option<f64> {
    (count > 0).then(|| total.as_secs_f64() / count as f64)
}

/// Stack size of the worker thread searching a graph on `n` vertices
pub fn search_stack_bytes(n: usize) -> usize {
    MIN_SEARCH_STACK_BYTES.max(
        SEARCH_DEPTH_FACTOR
            .saturating_mul(n)
            .saturating_mul(SEARCH_FRAME_BYTES),
    )
}

/// Run a search on a worker thread with a stack sized for `n` vertices
///
/// The worker is joined before returning. If the thread cannot be spawned
/// the task runs on the calling thread instead.
pub fn run_with_search_stack<T, F>(n: usize, task: F) -> T
where
    T: Send,
    F: Fn() -> T + Sync,
{
    thread::scope(|scope| {
        let spawned = thread::Builder::new()
            .name(format!("search-n{n}"))
            .stack_size(search_stack_bytes(n))
            .spawn_scoped(scope, &task);
        match spawned {
            Ok(handle) => match handle.join() {
                Ok(value) => value,
                Err(payload) => panic::resume_unwind(payload),
            },
            Err(error) => {
                warn!(%error, "search thread unavailable, running inline");
                task()
            }
        }
    })
}

/// Runs batches of test cases one at a time
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    /// Create a runner for one configuration
    pub const fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Configuration the runner applies
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Decide every case in order, reporting each one to `on_case`
    ///
    /// The batch deadline starts when this is called. Once it expires the
    /// case being searched counts as exceeded and every later case is
    /// reported as not started.
    pub fn run<F>(&self, label: &str, cases: &[TestCase], mut on_case: F) -> BatchSummary
    where
        F: FnMut(&CaseReport),
    {
        let method = self.config.method;
        let title = method.title();
        let batch = self.config.global_timeout.map(Deadline::starting_now);
        let mut summary = BatchSummary::new(method, label);
        let mut batch_expired = false;

        info!(method = %title, batch = label, cases = cases.len(), "starting batch");

        for (index, case) in cases.iter().enumerate() {
            let started = Instant::now();
            let outcome = if batch_expired || batch.is_some_and(|deadline| deadline.expired()) {
                batch_expired = true;
                CaseOutcome::NotStarted
            } else {
                self.run_case(index, case, batch)
            };

            match &outcome {
                CaseOutcome::LimitExceeded(Timeout::SingleTest) => {
                    warn!(case = index, "{title}: single test timeout exceeded!");
                }
                CaseOutcome::LimitExceeded(Timeout::AllTests) => {
                    warn!(case = index, "{title}: all tests timeout exceeded!");
                    batch_expired = true;
                }
                CaseOutcome::Skipped(reason) => {
                    warn!(case = index, %reason, "skipping invalid case");
                }
                _ => {}
            }

            let report = CaseReport {
                index,
                outcome,
                elapsed: started.elapsed(),
            };
            summary.record(&report);
            on_case(&report);
        }

        info!(
            method = %title,
            batch = label,
            found = summary.found,
            not_found = summary.not_found,
            limit_exceeded = summary.limit_exceeded,
            skipped = summary.skipped,
            not_started = summary.not_started,
            "finished batch"
        );
        summary
    }

    fn run_case(&self, index: usize, case: &TestCase, batch: Option<Deadline>) -> CaseOutcome {
        let method = self.config.method;
        if let Err(error) = case.validate(method.orientation) {
            return CaseOutcome::Skipped(error.to_string());
        }

        let guard = TimeoutGuard::new(
            self.config.test_timeout.map(Deadline::starting_now),
            batch,
        );
        let n = case.vertex_count();
        let result = run_with_search_stack(n, || decide(method, &case.x, &case.y, guard));
        debug!(
            case = index,
            vertices = n,
            decomposable = ?result.as_ref().map(Verdict::is_decomposable),
            "case decided"
        );

        match result {
            Ok(Verdict::Decomposable(decomposition)) => CaseOutcome::Found(decomposition),
            Ok(Verdict::NotDecomposable) => CaseOutcome::NotFound,
            Err(timeout) => CaseOutcome::LimitExceeded(timeout),
        }
    }
}
