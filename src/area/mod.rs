//! Coverage area solvers
//!
//! Computes the fraction of a pixel covered on each side of a reconstructed
//! edge, for every local crossing pattern and pair of distances to the
//! nearest crossing edges.
//!
//! # Module Structure
//!
//! - [`ortho`] - Closed-form areas for horizontal/vertical crossing patterns
//! - [`diag`] - Sampled areas for diagonal crossing patterns
//!
//! Both solvers are pure functions: they never allocate shared state and can
//! be called from any number of threads at once.

pub mod diag;
pub mod ortho;

pub use diag::{area_diag, area_diag_sampled, DiagPattern, DiagShape, SampleGrid, Segment};
pub use ortho::{area_ortho, area_ortho_smoothed, ArmLevel, OrthoPattern, OrthoShape, Side};

use crate::geometry::Vec2;
use serde::Serialize;
use thiserror::Error;

/// Number of distinct crossing patterns for each solver.
pub const PATTERN_COUNT: u8 = 16;

/// Precondition violations rejected before a solver is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AreaError {
    /// Pattern code outside `0..16`
    #[error("invalid {kind} pattern {code}: expected a value in 0..=15")]
    InvalidPattern {
        /// Which solver the code was meant for ("orthogonal" or "diagonal")
        kind: &'static str,
        /// The rejected code
        code: u32,
    },
}

/// Two independent coverage weights, one per output channel.
///
/// The weights are not normalized: they need not sum to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AreaResult {
    /// First (red) channel
    pub r: f64,
    /// Second (green) channel
    pub g: f64,
}

impl AreaResult {
    /// No coverage on either channel.
    pub const ZERO: AreaResult = AreaResult { r: 0.0, g: 0.0 };

    /// Create a result from its two channels.
    pub const fn new(r: f64, g: f64) -> Self {
        Self { r, g }
    }

    /// Whether both channels are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.r == 0.0 && self.g == 0.0
    }

    /// Quantize both channels to the 8-bit texture range.
    ///
    /// Values are scaled by 255 and truncated, matching the way the lookup
    /// textures have always been baked.
    pub fn to_bytes(&self) -> [u8; 2] {
        [quantize(self.r), quantize(self.g)]
    }
}

impl From<Vec2> for AreaResult {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<AreaResult> for Vec2 {
    fn from(a: AreaResult) -> Self {
        Vec2::new(a.r, a.g)
    }
}

impl std::fmt::Display for AreaResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.r, self.g)
    }
}

/// Scale a `[0, 1]` weight to a byte, truncating.
pub fn quantize(v: f64) -> u8 {
    // `as` saturates out-of-range floats, so values a hair above 1.0 map to 255
    (255.0 * v) as u8
}

/// Validate a raw pattern code.
pub(crate) fn check_pattern(kind: &'static str, code: u32) -> Result<u8, AreaError> {
    if code < PATTERN_COUNT as u32 {
        Ok(code as u8)
    } else {
        Err(AreaError::InvalidPattern { kind, code })
    }
}
