//! Batch evaluation of the area solvers.
//!
//! Enumerates every pattern, distance pair and sub-pixel phase, invokes the
//! matching solver exactly once per combination and collects the results
//! into [`CoverageGrid`]s.
//!
//! # How It Works
//!
//! 1. Each phase of each pattern family is one slice of 16 work items
//! 2. A slice's patterns are evaluated in parallel on a rayon pool
//! 3. Each worker fills its own grid; results are collected by index
//! 4. A `SliceCompleted` event is reported once all 16 grids are done
//!
//! # Example
//!
//! ```ignore
//! use areatex::generate::{GeneratorSettings, TableGenerator};
//!
//! let tables = TableGenerator::new(GeneratorSettings::default())
//!     .with_jobs(4)
//!     .generate()?;
//! let grid = tables.ortho(0, 7).unwrap();
//! println!("{}", grid.get(0, 0).unwrap());
//! ```

use crate::area::{
    area_diag_sampled, area_ortho_smoothed, AreaResult, DiagPattern, OrthoPattern, SampleGrid,
    PATTERN_COUNT,
};
use crate::geometry::{Vec2, SMOOTH_MAX_DISTANCE};
use crate::progress::{NullProgress, ProgressEvent, ProgressReporter, TableKind};
use crate::tables::{
    ortho_grid_size, SAMPLES_DIAG, SIZE_DIAG, SIZE_ORTHO, SUBSAMPLE_OFFSETS_DIAG,
    SUBSAMPLE_OFFSETS_ORTHO,
};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Errors raised while setting up generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The worker pool could not be created
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Default number of parallel jobs (uses available parallelism).
fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Sizes and tuning knobs for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    /// Distances computed per axis for orthogonal patterns
    pub ortho_distances: u32,
    /// Distances computed per axis for diagonal patterns
    pub diag_distances: u32,
    /// Samples per axis for diagonal coverage
    pub diag_samples: u32,
    /// Distance at which U-shape smoothing stops
    pub smooth_max_distance: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            ortho_distances: ortho_grid_size(SIZE_ORTHO),
            diag_distances: SIZE_DIAG,
            diag_samples: SAMPLES_DIAG,
            smooth_max_distance: SMOOTH_MAX_DISTANCE,
        }
    }
}

impl GeneratorSettings {
    /// Solver invocations needed to fill every grid.
    pub fn evaluations(&self) -> u64 {
        let ortho = self.ortho_distances as u64 * self.ortho_distances as u64;
        let diag = self.diag_distances as u64 * self.diag_distances as u64;
        let per_pattern = ortho * SUBSAMPLE_OFFSETS_ORTHO.len() as u64
            + diag * SUBSAMPLE_OFFSETS_DIAG.len() as u64;
        PATTERN_COUNT as u64 * per_pattern
    }
}

/// Coverage results for one pattern at one phase, addressed by `(left, right)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageGrid {
    size: u32,
    cells: Vec<AreaResult>,
}

impl CoverageGrid {
    /// Fill a `size x size` grid by calling `f(left, right)` for every cell.
    pub fn from_fn(size: u32, mut f: impl FnMut(u32, u32) -> AreaResult) -> Self {
        let mut cells = Vec::with_capacity(size as usize * size as usize);
        for right in 0..size {
            for left in 0..size {
                cells.push(f(left, right));
            }
        }
        Self { size, cells }
    }

    /// Number of distances per axis.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Result for a distance pair, if it lies inside the grid.
    pub fn get(&self, left: u32, right: u32) -> Option<AreaResult> {
        if left >= self.size || right >= self.size {
            return None;
        }
        self.cells.get(right as usize * self.size as usize + left as usize).copied()
    }

    /// All cells, row by row (`right` major).
    pub fn cells(&self) -> &[AreaResult] {
        &self.cells
    }
}

/// Every grid of a generation run, indexed by `[phase][pattern]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaTables {
    /// Orthogonal grids, one row of 16 per orthogonal phase
    pub ortho: Vec<Vec<CoverageGrid>>,
    /// Diagonal grids, one row of 16 per diagonal phase
    pub diag: Vec<Vec<CoverageGrid>>,
}

impl AreaTables {
    /// Orthogonal grid for a phase and pattern code.
    pub fn ortho(&self, phase: usize, pattern: usize) -> Option<&CoverageGrid> {
        self.ortho.get(phase)?.get(pattern)
    }

    /// Diagonal grid for a phase and pattern code.
    pub fn diag(&self, phase: usize, pattern: usize) -> Option<&CoverageGrid> {
        self.diag.get(phase)?.get(pattern)
    }
}

/// Parallel table generator.
pub struct TableGenerator {
    settings: GeneratorSettings,
    jobs: usize,
    reporter: Arc<dyn ProgressReporter>,
}

impl TableGenerator {
    /// Create a generator with the given settings.
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings, jobs: default_jobs(), reporter: Arc::new(NullProgress::new()) }
    }

    /// Set the number of parallel jobs.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Set the progress reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Get the number of parallel jobs.
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Get the generation settings.
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Compute every orthogonal and diagonal grid.
    pub fn generate(&self) -> Result<AreaTables, GenerateError> {
        let pool = self.pool()?;
        self.reporter.report(ProgressEvent::GenerationStarted {
            slices: SUBSAMPLE_OFFSETS_ORTHO.len() + SUBSAMPLE_OFFSETS_DIAG.len(),
            evaluations: self.settings.evaluations(),
        });

        let ortho = self.ortho_slices(&pool);
        let diag = self.diag_slices(&pool);
        Ok(AreaTables { ortho, diag })
    }

    /// Compute only the orthogonal grids, `[phase][pattern]`.
    pub fn generate_ortho(&self) -> Result<Vec<Vec<CoverageGrid>>, GenerateError> {
        let pool = self.pool()?;
        Ok(self.ortho_slices(&pool))
    }

    /// Compute only the diagonal grids, `[phase][pattern]`.
    pub fn generate_diag(&self) -> Result<Vec<Vec<CoverageGrid>>, GenerateError> {
        let pool = self.pool()?;
        Ok(self.diag_slices(&pool))
    }

    fn pool(&self) -> Result<rayon::ThreadPool, GenerateError> {
        Ok(rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build()?)
    }

    fn ortho_slices(&self, pool: &rayon::ThreadPool) -> Vec<Vec<CoverageGrid>> {
        let size = self.settings.ortho_distances;
        let smooth = self.settings.smooth_max_distance;
        let patterns: Vec<OrthoPattern> = OrthoPattern::all().collect();

        SUBSAMPLE_OFFSETS_ORTHO
            .iter()
            .enumerate()
            .map(|(phase, &offset)| {
                self.slice(pool, TableKind::Ortho, phase, size, &patterns, |pattern| {
                    CoverageGrid::from_fn(size, |left, right| {
                        area_ortho_smoothed(pattern, left, right, offset, smooth)
                    })
                })
            })
            .collect()
    }

    fn diag_slices(&self, pool: &rayon::ThreadPool) -> Vec<Vec<CoverageGrid>> {
        let size = self.settings.diag_distances;
        let grid = SampleGrid::new(self.settings.diag_samples);
        let patterns: Vec<DiagPattern> = DiagPattern::all().collect();

        SUBSAMPLE_OFFSETS_DIAG
            .iter()
            .enumerate()
            .map(|(phase, &offset)| {
                let offset = Vec2::from(offset);
                self.slice(pool, TableKind::Diag, phase, size, &patterns, |pattern| {
                    CoverageGrid::from_fn(size, |left, right| {
                        area_diag_sampled(&grid, pattern, left, right, offset)
                    })
                })
            })
            .collect()
    }

    /// Evaluate the 16 patterns of one phase and report completion.
    fn slice<P, F>(
        &self,
        pool: &rayon::ThreadPool,
        kind: TableKind,
        phase: usize,
        size: u32,
        patterns: &[P],
        fill: F,
    ) -> Vec<CoverageGrid>
    where
        P: Copy + Sync,
        F: Fn(P) -> CoverageGrid + Sync,
    {
        let start = Instant::now();
        let grids: Vec<CoverageGrid> =
            pool.install(|| patterns.par_iter().map(|&pattern| fill(pattern)).collect());

        self.reporter.report(ProgressEvent::SliceCompleted {
            kind,
            phase,
            evaluations: patterns.len() as u64 * size as u64 * size as u64,
            duration_ms: start.elapsed().as_millis() as u64,
        });
        grids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::area_ortho;
    use std::sync::Mutex;

    fn small_settings() -> GeneratorSettings {
        GeneratorSettings { ortho_distances: 10, diag_distances: 4, diag_samples: 8, ..Default::default() }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<ProgressEvent>>);

    impl ProgressReporter for Recorder {
        fn report(&self, event: ProgressEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.ortho_distances, 226);
        assert_eq!(settings.diag_distances, 20);
        assert_eq!(settings.diag_samples, 30);
        assert_eq!(settings.smooth_max_distance, 32.0);
    }

    #[test]
    fn test_evaluations() {
        let settings = small_settings();
        assert_eq!(settings.evaluations(), 16 * (100 * 7 + 16 * 5));
    }

    #[test]
    fn test_coverage_grid_addressing() {
        let grid = CoverageGrid::from_fn(3, |l, r| AreaResult::new(l as f64, r as f64));
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.cells().len(), 9);
        assert_eq!(grid.get(2, 1), Some(AreaResult::new(2.0, 1.0)));
        assert_eq!(grid.cells()[5], AreaResult::new(2.0, 1.0));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_generate_shape() {
        let tables = TableGenerator::new(small_settings()).with_jobs(2).generate().unwrap();
        assert_eq!(tables.ortho.len(), 7);
        assert_eq!(tables.diag.len(), 5);
        assert!(tables.ortho.iter().all(|phase| phase.len() == 16));
        assert!(tables.diag.iter().all(|phase| phase.len() == 16));
        assert_eq!(tables.ortho(0, 0).unwrap().size(), 10);
        assert_eq!(tables.diag(4, 15).unwrap().size(), 4);
        assert!(tables.ortho(7, 0).is_none());
        assert!(tables.diag(0, 16).is_none());
    }

    #[test]
    fn test_generate_matches_direct_calls() {
        let tables = TableGenerator::new(small_settings()).with_jobs(3).generate().unwrap();
        let pattern = OrthoPattern::new(12).unwrap();
        let grid = tables.ortho(2, 12).unwrap();
        for (left, right) in [(0, 0), (1, 4), (9, 2)] {
            assert_eq!(
                grid.get(left, right).unwrap(),
                area_ortho(pattern, left, right, SUBSAMPLE_OFFSETS_ORTHO[2])
            );
        }
    }

    #[test]
    fn test_generate_independent_of_jobs() {
        let single = TableGenerator::new(small_settings()).with_jobs(1).generate().unwrap();
        let many = TableGenerator::new(small_settings()).with_jobs(4).generate().unwrap();
        assert_eq!(single, many);
    }

    #[test]
    fn test_with_jobs_clamps_to_one() {
        let generator = TableGenerator::new(small_settings()).with_jobs(0);
        assert_eq!(generator.jobs(), 1);
    }

    #[test]
    fn test_reports_every_slice() {
        let recorder = Arc::new(Recorder::default());
        TableGenerator::new(small_settings())
            .with_reporter(recorder.clone())
            .generate()
            .unwrap();

        let events = recorder.0.lock().unwrap();
        assert!(matches!(events[0], ProgressEvent::GenerationStarted { slices: 12, .. }));
        let slices: Vec<(TableKind, usize)> = events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::SliceCompleted { kind, phase, .. } => Some((*kind, *phase)),
                _ => None,
            })
            .collect();
        assert_eq!(slices.len(), 12);
        assert_eq!(slices[0], (TableKind::Ortho, 0));
        assert_eq!(slices[7], (TableKind::Diag, 0));
    }

    #[test]
    fn test_generate_ortho_only() {
        let ortho = TableGenerator::new(small_settings()).generate_ortho().unwrap();
        assert_eq!(ortho.len(), 7);
        let diag = TableGenerator::new(small_settings()).generate_diag().unwrap();
        assert_eq!(diag.len(), 5);
    }
}
