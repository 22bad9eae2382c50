//! Command-line interface for running batches of decomposition tests

use crate::algorithm::executor::{BatchConfig, BatchRunner, CaseOutcome};
use crate::algorithm::search::{Decomposition, Method};
use crate::io::configuration::{DEFAULT_METHOD, DEFAULT_SEED, DEFAULT_TIMES, MIN_VERTEX_COUNT};
use crate::io::dataset::{TestCase, import_from_file, import_from_vns_file};
use crate::io::error::{Result, invalid_parameter};
use crate::io::generator::CaseGenerator;
use crate::io::image::export_decomposition_png;
use crate::io::progress::ProgressManager;
use crate::io::report::ResultTable;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "hamcycle-adjacency")]
#[command(
    author,
    version,
    about = "Decide whether two Hamiltonian cycles can be exchanged for two others on their edges"
)]
/// Command-line arguments for the decomposition test runner
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Vertex counts to generate random cases for (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub number: Vec<usize>,

    /// Dataset files to read cases from (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub path: Vec<PathBuf>,

    /// Read dataset files in the VNS log format
    #[arg(long)]
    pub vns: bool,

    /// Number of random cases generated per vertex count
    #[arg(short, long, default_value_t = DEFAULT_TIMES)]
    pub times: usize,

    /// Time limit per case, in minutes
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Time limit per batch of cases, in minutes
    #[arg(short, long)]
    pub global_timeout: Option<f64>,

    /// Methods to run (comma separated): 0 directed simple path, 1 undirected
    /// simple path, 2 directed chain fixing, 3 undirected chain fixing
    #[arg(short, long, value_delimiter = ',', default_values_t = [DEFAULT_METHOD])]
    pub method: Vec<usize>,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Generate pyramidal cycles instead of uniformly random ones
    #[arg(long)]
    pub pyramidal: bool,

    /// Directory to save a PNG of every decomposition found
    #[arg(short, long, value_name = "DIR")]
    pub render: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every batch and search at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Most verbose level the log subscriber should emit
    pub const fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else {
            Level::WARN
        }
    }
}

/// Install the stderr log subscriber
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Where test cases come from
#[derive(Clone, Debug, PartialEq)]
pub enum CaseSource {
    /// Seeded random cases for each vertex count
    Generated {
        /// Vertex counts, one batch each
        sizes: Vec<usize>,
        /// Cases per batch
        times: usize,
        /// Whether cycles are pyramidal
        pyramidal: bool,
        /// Generator seed
        seed: u64,
    },
    /// Cases read from dataset files, one batch per file
    Files {
        /// Dataset files
        paths: Vec<PathBuf>,
        /// Whether the files are VNS logs
        vns: bool,
    },
}

/// Validated settings of one run
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Methods to run every batch with
    pub methods: Vec<Method>,
    /// Origin of the test cases
    pub source: CaseSource,
    /// Time limit per case
    pub test_timeout: Option<Duration>,
    /// Time limit per batch
    pub global_timeout: Option<Duration>,
    /// Directory for rendered decompositions
    pub render: Option<PathBuf>,
    /// Whether to draw progress bars
    pub show_progress: bool,
}

fn minutes(parameter: &'static str, value: Option<f64>) -> Result<Option<Duration>> {
    value
        .map(|minutes| {
            if minutes.is_finite() && minutes > 0.0 {
                Duration::try_from_secs_f64(minutes * 60.0)
                    .map_err(|e| invalid_parameter(parameter, minutes, e.to_string()))
            } else {
                Err(invalid_parameter(
                    parameter,
                    minutes,
                    "must be a positive number of minutes",
                ))
            }
        })
        .transpose()
}

impl RunConfig {
    /// Validate command-line arguments into a run configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A method number is outside `0..=3`
    /// - A time limit is not a positive number of minutes
    /// - Neither vertex counts nor dataset files are given
    /// - A vertex count is below three
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let methods = cli
            .method
            .iter()
            .map(|&index| {
                Method::from_index(index)
                    .ok_or_else(|| invalid_parameter("method", index, "must be between 0 and 3"))
            })
            .collect::<Result<Vec<_>>>()?;

        let source = if cli.path.is_empty() {
            Self::generated_source(cli)?
        } else {
            CaseSource::Files {
                paths: cli.path.clone(),
                vns: cli.vns,
            }
        };

        Ok(Self {
            methods,
            source,
            test_timeout: minutes("timeout", cli.timeout)?,
            global_timeout: minutes("global-timeout", cli.global_timeout)?,
            render: cli.render.clone(),
            show_progress: cli.should_show_progress(),
        })
    }

    fn generated_source(cli: &Cli) -> Result<CaseSource> {
        if cli.number.is_empty() {
            return Err(invalid_parameter(
                "number",
                "",
                "give vertex counts with --number or dataset files with --path",
            ));
        }
        if let Some(&n) = cli.number.iter().find(|&&n| n < MIN_VERTEX_COUNT) {
            return Err(invalid_parameter(
                "number",
                n,
                format!("cycles need at least {MIN_VERTEX_COUNT} vertices"),
            ));
        }
        Ok(CaseSource::Generated {
            sizes: cli.number.clone(),
            times: cli.times,
            pyramidal: cli.pyramidal,
            seed: cli.seed,
        })
    }
}

/// A named list of cases run as one unit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    /// Vertex count or file name
    pub label: String,
    /// Cases in run order
    pub cases: Vec<TestCase>,
}

/// Build the batches a case source describes
///
/// # Errors
///
/// Returns an error if a dataset file cannot be read or parsed
pub fn load_batches(source: &CaseSource) -> Result<Vec<Batch>> {
    match source {
        CaseSource::Generated {
            sizes,
            times,
            pyramidal,
            seed,
        } => {
            let mut generator = CaseGenerator::new(*seed);
            Ok(sizes
                .iter()
                .map(|&n| Batch {
                    label: n.to_string(),
                    cases: if *pyramidal {
                        generator.pyramidal_cases(n, *times)
                    } else {
                        generator.random_cases(n, *times)
                    },
                })
                .collect())
        }
        CaseSource::Files { paths, vns } => paths
            .iter()
            .map(|path| {
                let cases = if *vns {
                    import_from_vns_file(path)?
                } else {
                    import_from_file(path)?
                };
                Ok(Batch {
                    label: file_label(path),
                    cases,
                })
            })
            .collect(),
    }
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Orchestrates every batch of a run with progress tracking
pub struct BatchProcessor {
    config: RunConfig,
    progress_manager: Option<ProgressManager>,
}

impl BatchProcessor {
    /// Create a processor for a validated configuration
    pub fn new(config: RunConfig) -> Self {
        let progress_manager = config.show_progress.then(ProgressManager::new);

        Self {
            config,
            progress_manager,
        }
    }

    /// Run every method over every batch and tabulate the results
    ///
    /// Rows follow the batches, with one row per method inside each batch.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A dataset file cannot be read or parsed
    /// - A rendered decomposition cannot be saved
    pub fn process(&mut self) -> Result<ResultTable> {
        let batches = load_batches(&self.config.source)?;
        let mut table = ResultTable::new();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(batches.len() * self.config.methods.len());
        }

        let methods = self.config.methods.clone();
        let mut index = 0;
        for batch in &batches {
            for &method in &methods {
                self.process_batch(index, method, batch, &mut table)?;
                index += 1;
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(table)
    }

    fn process_batch(
        &mut self,
        index: usize,
        method: Method,
        batch: &Batch,
        table: &mut ResultTable,
    ) -> Result<()> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_batch(
                index,
                &format!("{} {}", batch.label, method.title()),
                batch.cases.len(),
            );
        }

        let runner = BatchRunner::new(BatchConfig {
            method,
            test_timeout: self.config.test_timeout,
            global_timeout: self.config.global_timeout,
        });
        let rendering = self.config.render.is_some();
        let progress = &mut self.progress_manager;
        let mut found: Vec<(usize, Decomposition)> = Vec::new();

        let summary = runner.run(&batch.label, &batch.cases, |report| {
            if let Some(pm) = progress.as_mut() {
                pm.record_case(index, &report.outcome);
            }
            if let (true, CaseOutcome::Found(decomposition)) = (rendering, &report.outcome) {
                found.push((report.index, decomposition.clone()));
            }
        });

        if let Some(directory) = &self.config.render {
            for (case, decomposition) in &found {
                let name = format!("{}_method{}_case{case}.png", batch.label, method.index());
                export_decomposition_png(decomposition, &directory.join(name))?;
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_batch(index);
        }
        table.push(&summary);
        Ok(())
    }
}
