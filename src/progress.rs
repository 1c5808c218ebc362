//! Generation progress reporting.
//!
//! Table generation can take a while (the diagonal areas are sampled by brute
//! force), so the generator reports what it is doing through a
//! [`ProgressReporter`]. Console output goes to stderr with optional colors;
//! JSON output emits one object per line for tooling.
//!
//! # Example
//!
//! ```ignore
//! use areatex::progress::{ConsoleProgress, ProgressEvent, ProgressReporter};
//!
//! let reporter = ConsoleProgress::new().with_verbose(true);
//! reporter.report(ProgressEvent::GenerationStarted { slices: 12, evaluations: 5_740_000 });
//! ```

use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Family of patterns a table slice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Horizontal/vertical crossing patterns
    Ortho,
    /// Diagonal crossing patterns
    Diag,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Ortho => write!(f, "ortho"),
            TableKind::Diag => write!(f, "diag"),
        }
    }
}

/// Events that can be reported during generation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Generation started
    GenerationStarted {
        /// Number of (kind, phase) slices to compute
        slices: usize,
        /// Total number of solver invocations
        evaluations: u64,
    },
    /// All sixteen patterns of one phase were computed
    SliceCompleted {
        /// Pattern family
        kind: TableKind,
        /// Index into the phase set
        phase: usize,
        /// Solver invocations in this slice
        evaluations: u64,
        /// Duration in milliseconds
        duration_ms: u64,
    },
    /// A file was written
    ArtifactWritten {
        /// Path of the written file
        path: PathBuf,
    },
    /// Generation finished
    GenerationCompleted {
        /// Whether every step succeeded
        success: bool,
        /// Number of files written
        artifacts: usize,
        /// Total duration in milliseconds
        duration_ms: u64,
    },
    /// A non-fatal problem
    Warning {
        /// Warning message
        message: String,
    },
    /// A fatal problem
    Error {
        /// Error message
        message: String,
    },
}

/// Trait for progress reporters.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event.
    fn report(&self, event: ProgressEvent);

    /// Check if this reporter wants verbose output.
    fn is_verbose(&self) -> bool {
        false
    }
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    /// Create a new null progress reporter.
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Console progress reporter with optional colors.
pub struct ConsoleProgress {
    use_colors: bool,
    verbose: bool,
    /// Slices completed so far
    current: AtomicUsize,
    /// Slices announced by `GenerationStarted`
    total: AtomicUsize,
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress")
            .field("use_colors", &self.use_colors)
            .field("verbose", &self.verbose)
            .field("current", &self.current)
            .field("total", &self.total)
            .finish()
    }
}

impl ConsoleProgress {
    /// Create a new console progress reporter writing to stderr.
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Create a console progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self {
            use_colors: false,
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(output)),
        }
    }

    /// Set whether to use colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.color(text, "\x1b[32m")
    }

    fn yellow(&self, text: &str) -> String {
        self.color(text, "\x1b[33m")
    }

    fn red(&self, text: &str) -> String {
        self.color(text, "\x1b[31m")
    }

    fn cyan(&self, text: &str) -> String {
        self.color(text, "\x1b[36m")
    }

    fn writeln(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", line);
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::GenerationStarted { slices, evaluations } => {
                self.total.store(slices, Ordering::SeqCst);
                self.current.store(0, Ordering::SeqCst);
                self.writeln(&format!(
                    "{} Computing {} slice{} ({} areas)...",
                    self.cyan("[areatex]"),
                    slices,
                    if slices == 1 { "" } else { "s" },
                    evaluations
                ));
            }
            ProgressEvent::SliceCompleted { kind, phase, evaluations, duration_ms } => {
                let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
                if self.verbose {
                    let total = self.total.load(Ordering::SeqCst);
                    self.writeln(&format!(
                        "{} [{}/{}] {} {} phase {} ({} areas, {})",
                        self.cyan("[areatex]"),
                        current,
                        total,
                        self.green("ok"),
                        kind,
                        phase,
                        evaluations,
                        format_duration(duration_ms)
                    ));
                }
            }
            ProgressEvent::ArtifactWritten { path } => {
                self.writeln(&format!("{} wrote {}", self.cyan("[areatex]"), path.display()));
            }
            ProgressEvent::GenerationCompleted { success, artifacts, duration_ms } => {
                if success {
                    self.writeln(&format!(
                        "{} {} file{} in {}",
                        self.green("[done]"),
                        artifacts,
                        if artifacts == 1 { "" } else { "s" },
                        format_duration(duration_ms)
                    ));
                } else {
                    self.writeln(&format!(
                        "{} Generation failed after {}",
                        self.red("[error]"),
                        format_duration(duration_ms)
                    ));
                }
            }
            ProgressEvent::Warning { message } => {
                self.writeln(&format!("{} {}", self.yellow("[warn]"), message));
            }
            ProgressEvent::Error { message } => {
                self.writeln(&format!("{} {}", self.red("[error]"), message));
            }
        }
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// JSON-lines progress reporter for machine-readable output.
pub struct JsonProgress {
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for JsonProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonProgress").finish()
    }
}

impl JsonProgress {
    /// Create a new JSON progress reporter writing to stderr.
    pub fn new() -> Self {
        Self { output: Mutex::new(Box::new(std::io::stderr())) }
    }

    /// Create a JSON progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self { output: Mutex::new(Box::new(output)) }
    }
}

impl Default for JsonProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let Ok(json) = serde_json::to_string(&event) else {
            return;
        };
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", json);
        }
    }
}

/// Format a duration in milliseconds to a human-readable string.
pub(crate) fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1000;
        format!("{}m {}s", minutes, seconds)
    }
}
