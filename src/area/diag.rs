//! Diagonal coverage areas.
//!
//! Diagonal areas are estimated by brute-force sampling: a regular grid of
//! points inside the pixel is tested against the revectorized line and the
//! fraction of points on the inner side is the coverage. This is quick and
//! dirty, but it is what the published tables were baked with, so the sample
//! grid and the sign test must stay exactly as they are.
//!
//! Unlike orthogonal patterns, the line ends of the unfiltered pattern and of
//! the L patterns are not known locally (the adjacent pattern decides where
//! the line really ends). For those patterns two plausible lines are
//! evaluated and their coverage is averaged.

use super::{check_pattern, AreaError, AreaResult};
use crate::geometry::Vec2;
use crate::tables::{EDGES_DIAG, SAMPLES_DIAG};

/// A candidate line through the diagonal run.
///
/// `end` is relative to the far corner: the actual end point is
/// `end + (d, d)` with `d = left + right + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    const fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Self { start: Vec2::new(start.0, start.1), end: Vec2::new(end.0, end.1) }
    }
}

/// How a diagonal pattern is revectorized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagShape {
    /// Both line ends are known from the crossing edges
    Determined(Segment),
    /// At least one end is unknown; the two candidates are averaged
    Ambiguous(Segment, Segment),
}

const BOTTOM: (f64, f64) = (1.0, 0.0);
const TOP: (f64, f64) = (1.0, 1.0);
const ORIGIN: (f64, f64) = (0.0, 0.0);

/// Line hypotheses for each diagonal pattern.
///
/// Start points: `(1, 0)` continues a vertical crossing edge, `(1, 1)` a
/// horizontal one and `(0, 0)` an open end. End points mirror this at the
/// far corner.
const DIAG_SHAPES: [DiagShape; 16] = [
    DiagShape::Ambiguous(Segment::new(TOP, TOP), Segment::new(BOTTOM, BOTTOM)),
    DiagShape::Ambiguous(Segment::new(BOTTOM, ORIGIN), Segment::new(BOTTOM, BOTTOM)),
    DiagShape::Ambiguous(Segment::new(ORIGIN, BOTTOM), Segment::new(BOTTOM, BOTTOM)),
    DiagShape::Determined(Segment::new(BOTTOM, BOTTOM)),
    DiagShape::Ambiguous(Segment::new(TOP, ORIGIN), Segment::new(TOP, BOTTOM)),
    DiagShape::Ambiguous(Segment::new(TOP, ORIGIN), Segment::new(BOTTOM, BOTTOM)),
    DiagShape::Determined(Segment::new(TOP, BOTTOM)),
    DiagShape::Ambiguous(Segment::new(TOP, BOTTOM), Segment::new(BOTTOM, BOTTOM)),
    DiagShape::Ambiguous(Segment::new(ORIGIN, TOP), Segment::new(BOTTOM, TOP)),
    DiagShape::Determined(Segment::new(BOTTOM, TOP)),
    DiagShape::Ambiguous(Segment::new(ORIGIN, TOP), Segment::new(BOTTOM, BOTTOM)),
    DiagShape::Ambiguous(Segment::new(BOTTOM, TOP), Segment::new(BOTTOM, BOTTOM)),
    DiagShape::Determined(Segment::new(TOP, TOP)),
    DiagShape::Ambiguous(Segment::new(TOP, TOP), Segment::new(BOTTOM, TOP)),
    DiagShape::Ambiguous(Segment::new(TOP, TOP), Segment::new(TOP, BOTTOM)),
    DiagShape::Ambiguous(Segment::new(TOP, TOP), Segment::new(BOTTOM, BOTTOM)),
];

/// A validated diagonal pattern code (`0..16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiagPattern(u8);

impl DiagPattern {
    /// Validate a pattern code.
    pub fn new(code: u32) -> Result<Self, AreaError> {
        check_pattern("diagonal", code).map(DiagPattern)
    }

    /// Iterate over all sixteen patterns in code order.
    pub fn all() -> impl Iterator<Item = DiagPattern> {
        (0..super::PATTERN_COUNT).map(DiagPattern)
    }

    /// The raw pattern code.
    pub fn code(self) -> u8 {
        self.0
    }

    /// The line hypotheses for this pattern.
    pub fn shape(self) -> DiagShape {
        DIAG_SHAPES[self.0 as usize]
    }

    /// Whether the start and end of the line follow the sub-pixel offset.
    pub fn jitter(self) -> (bool, bool) {
        let (e1, e2) = EDGES_DIAG[self.0 as usize];
        (e1 > 0, e2 > 0)
    }
}

impl TryFrom<u32> for DiagPattern {
    type Error = AreaError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        DiagPattern::new(code)
    }
}

impl std::fmt::Display for DiagPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Regular grid of sample offsets covering the unit square, borders included.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    offsets: Vec<Vec2>,
}

impl SampleGrid {
    /// Build an `n x n` grid (`n >= 2`).
    pub fn new(n: u32) -> Self {
        let n = n.max(2);
        let step = (n - 1) as f64;
        let mut offsets = Vec::with_capacity(n as usize * n as usize);
        for x in 0..n {
            for y in 0..n {
                offsets.push(Vec2::new(x as f64, y as f64) / step);
            }
        }
        Self { offsets }
    }

    /// Number of samples in the grid.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the grid has no samples.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Fraction of the pixel at `p` lying on the inner side of `p1 -> p2`.
    fn coverage(&self, p1: Vec2, p2: Vec2, p: Vec2) -> f64 {
        let count = if p1 != p2 {
            let m = (p1 + p2) / 2.0;
            let a = p2.y - p1.y;
            let b = p1.x - p2.x;
            self.offsets
                .iter()
                .filter(|&&o| {
                    let s = p + o;
                    a * (s.x - m.x) + b * (s.y - m.y) > 0.0
                })
                .count()
        } else {
            self.offsets.len()
        };
        count as f64 / self.offsets.len() as f64
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self::new(SAMPLES_DIAG)
    }
}

/// Coverage of pixel `left` for a diagonal pattern, with the default sample grid.
///
/// The first channel is the area outside the line at the lower reference
/// pixel, the second the area inside it at the upper one.
pub fn area_diag(pattern: DiagPattern, left: u32, right: u32, offset: Vec2) -> AreaResult {
    area_diag_sampled(&SampleGrid::default(), pattern, left, right, offset)
}

/// Coverage of pixel `left` for a diagonal pattern, sampled with `grid`.
pub fn area_diag_sampled(
    grid: &SampleGrid,
    pattern: DiagPattern,
    left: u32,
    right: u32,
    offset: Vec2,
) -> AreaResult {
    let d = left as f64 + right as f64 + 1.0;
    let far = Vec2::splat(d);
    let corner = Vec2::splat(left as f64);
    let (jitter_start, jitter_end) = pattern.jitter();

    let hypothesis = |segment: Segment| -> Vec2 {
        let mut p1 = segment.start;
        let mut p2 = segment.end + far;
        if jitter_start {
            p1 = p1 + offset;
        }
        if jitter_end {
            p2 = p2 + offset;
        }
        let a1 = grid.coverage(p1, p2, Vec2::new(1.0, 0.0) + corner);
        let a2 = grid.coverage(p1, p2, Vec2::new(1.0, 1.0) + corner);
        Vec2::new(1.0 - a1, a2)
    };

    let area = match pattern.shape() {
        DiagShape::Determined(segment) => hypothesis(segment),
        DiagShape::Ambiguous(first, second) => (hypothesis(first) + hypothesis(second)) / 2.0,
    };

    AreaResult::from(area)
}
