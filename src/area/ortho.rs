//! Orthogonal (horizontal/vertical) coverage areas.
//!
//! An orthogonal pattern describes which of the four crossing edges around
//! the two ends of a horizontal edge run are active:
//!
//! ```text
//!   4 |      | 8        bit 1: bottom-left arm    bit 2: bottom-right arm
//!     `------´          bit 4: top-left arm       bit 8: top-right arm
//!   1 |      | 2
//!     <--d--->
//! ```
//!
//! The edge is revectorized as one or two line segments spanning
//! `d = left + right + 1` pixels. The coverage of pixel `left` is the exact
//! area between the segment and the edge inside `[left, left + 1)`.
//!
//! | Shape | Patterns | Segments |
//! |-------|----------|----------|
//! | none | 0, 5, 10, 15 | - |
//! | corner (L) | 1, 2, 4, 8 | half line, only on the shorter side |
//! | U | 3, 12 | two smoothed half lines |
//! | zigzag (Z/S) | 6, 9 | full line, blended with two halves when offset |
//! | line (T/cross) | 7, 11, 13, 14 | full line |

use super::{check_pattern, AreaError, AreaResult};
use crate::geometry::{smooth_area, Vec2, SMOOTH_MAX_DISTANCE};

/// Slopes this close to zero at a pixel border are treated as not crossing.
const CROSSING_EPSILON: f64 = 1e-4;

/// Which end of the edge run an arm belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Arm at `x = 0`
    Left,
    /// Arm at `x = d`
    Right,
}

/// Vertical direction of a crossing arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmLevel {
    /// The arm goes up; the segment ends half a pixel above the edge
    Top,
    /// The arm goes down; the segment ends half a pixel below the edge
    Bottom,
}

impl ArmLevel {
    fn opposite(self) -> ArmLevel {
        match self {
            ArmLevel::Top => ArmLevel::Bottom,
            ArmLevel::Bottom => ArmLevel::Top,
        }
    }

    /// Height of the segment end for this arm, biased by the sub-pixel offset.
    fn height(self, offset: f64) -> f64 {
        match self {
            ArmLevel::Top => 0.5 + offset,
            ArmLevel::Bottom => 0.5 + offset - 1.0,
        }
    }
}

/// Geometric category of an orthogonal pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrthoShape {
    /// No usable crossing: both ends have zero or two arms
    None,
    /// Single arm at one end, nothing at the other (L shape)
    Corner { side: Side, level: ArmLevel },
    /// Same-direction arms at both ends
    U { level: ArmLevel },
    /// Opposite-direction arms at both ends (Z or S shape)
    ZigZag { left: ArmLevel, right: ArmLevel },
    /// One end has a single arm, the other a full crossing (T shape)
    Line { left: ArmLevel, right: ArmLevel },
}

/// Arms present at one end of the edge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Open,
    Single(ArmLevel),
    Cross,
}

impl End {
    fn from_bits(bottom: bool, top: bool) -> End {
        match (bottom, top) {
            (false, false) => End::Open,
            (true, false) => End::Single(ArmLevel::Bottom),
            (false, true) => End::Single(ArmLevel::Top),
            (true, true) => End::Cross,
        }
    }
}

/// A validated orthogonal pattern code (`0..16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrthoPattern(u8);

impl OrthoPattern {
    /// Validate a pattern code.
    pub fn new(code: u32) -> Result<Self, AreaError> {
        check_pattern("orthogonal", code).map(OrthoPattern)
    }

    /// Iterate over all sixteen patterns in code order.
    pub fn all() -> impl Iterator<Item = OrthoPattern> {
        (0..super::PATTERN_COUNT).map(OrthoPattern)
    }

    /// The raw pattern code.
    pub fn code(self) -> u8 {
        self.0
    }

    /// Classify the pattern into its geometric shape.
    pub fn shape(self) -> OrthoShape {
        let bits = self.0;
        let left = End::from_bits(bits & 1 != 0, bits & 4 != 0);
        let right = End::from_bits(bits & 2 != 0, bits & 8 != 0);

        match (left, right) {
            (End::Single(level), End::Open) => OrthoShape::Corner { side: Side::Left, level },
            (End::Open, End::Single(level)) => OrthoShape::Corner { side: Side::Right, level },
            (End::Single(l), End::Single(r)) if l == r => OrthoShape::U { level: l },
            (End::Single(l), End::Single(r)) => OrthoShape::ZigZag { left: l, right: r },
            // A full crossing on one side continues the single arm of the other
            (End::Single(l), End::Cross) => OrthoShape::Line { left: l, right: l.opposite() },
            (End::Cross, End::Single(r)) => OrthoShape::Line { left: r.opposite(), right: r },
            _ => OrthoShape::None,
        }
    }
}

impl TryFrom<u32> for OrthoPattern {
    type Error = AreaError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        OrthoPattern::new(code)
    }
}

impl std::fmt::Display for OrthoPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coverage of pixel `left` for an orthogonal pattern.
///
/// `offset` is the sub-pixel phase in `[-0.5, 0.5]`.
///
/// # Examples
///
/// ```
/// use areatex::area::{area_ortho, OrthoPattern};
///
/// let none = OrthoPattern::new(0).unwrap();
/// assert!(area_ortho(none, 5, 3, 0.25).is_zero());
/// ```
pub fn area_ortho(pattern: OrthoPattern, left: u32, right: u32, offset: f64) -> AreaResult {
    area_ortho_smoothed(pattern, left, right, offset, SMOOTH_MAX_DISTANCE)
}

/// Like [`area_ortho`], with an explicit U-shape smoothing distance.
pub fn area_ortho_smoothed(
    pattern: OrthoPattern,
    left: u32,
    right: u32,
    offset: f64,
    smooth_max_distance: f64,
) -> AreaResult {
    let d = left as f64 + right as f64 + 1.0;
    let x = left;
    let level = |arm: ArmLevel| arm.height(offset);

    // Half lines from each end to the middle of the run
    let left_half = |arm: ArmLevel| area_under(Vec2::new(0.0, level(arm)), Vec2::new(d / 2.0, 0.0), x);
    let right_half = |arm: ArmLevel| area_under(Vec2::new(d / 2.0, 0.0), Vec2::new(d, level(arm)), x);
    let full = |l: ArmLevel, r: ArmLevel| area_under(Vec2::new(0.0, level(l)), Vec2::new(d, level(r)), x);

    let area = match pattern.shape() {
        OrthoShape::None => Vec2::ZERO,
        // L shapes are only filtered on the side of the crossing edge, so they
        // converge with the unfiltered pattern 0 at the middle of the run
        OrthoShape::Corner { side: Side::Left, level } => {
            if left <= right {
                left_half(level)
            } else {
                Vec2::ZERO
            }
        }
        OrthoShape::Corner { side: Side::Right, level } => {
            if left >= right {
                right_half(level)
            } else {
                Vec2::ZERO
            }
        }
        OrthoShape::U { level } => {
            let (a1, a2) = smooth_area(d, left_half(level), right_half(level), smooth_max_distance);
            a1 + a2
        }
        // Pixels at the center of a Z see the whole shape while pixels near its
        // ends only see an L, so the offsetted Z is blended with both halves
        OrthoShape::ZigZag { left: l, right: r } => {
            if offset.abs() > 0.0 {
                let a1 = full(l, r);
                let mut a2 = left_half(l);
                a2 += right_half(r);
                (a1 + a2) / 2.0
            } else {
                full(l, r)
            }
        }
        OrthoShape::Line { left: l, right: r } => full(l, r),
    };

    AreaResult::from(area)
}

/// Area between the segment `p1 -> p2` and the edge, for the pixel `x..x+1`.
///
/// Area below the edge goes to the first component, area above it to the
/// second.
fn area_under(p1: Vec2, p2: Vec2, x: u32) -> Vec2 {
    let d = p2 - p1;
    let x1 = x as f64;
    let x2 = x1 + 1.0;
    let y1 = p1.y + d.y * (x1 - p1.x) / d.x;
    let y2 = p1.y + d.y * (x2 - p1.x) / d.x;

    let inside = (x1 >= p1.x && x1 < p2.x) || (x2 > p1.x && x2 <= p2.x);
    if !inside {
        return Vec2::ZERO;
    }

    let trapezoid = y1.is_sign_negative() == y2.is_sign_negative()
        || y1.abs() < CROSSING_EPSILON
        || y2.abs() < CROSSING_EPSILON;

    if trapezoid {
        let a = (y1 + y2) / 2.0;
        if a < 0.0 {
            Vec2::new(a.abs(), 0.0)
        } else {
            Vec2::new(0.0, a.abs())
        }
    } else {
        // The segment crosses the edge inside the pixel: two triangles
        let xc = -p1.y * d.x / d.y + p1.x;
        let frac = xc.fract();
        let a1 = if xc > p1.x { y1 * frac / 2.0 } else { 0.0 };
        let a2 = if xc < p2.x { y2 * (1.0 - frac) / 2.0 } else { 0.0 };
        let a = if a1.abs() > a2.abs() { a1 } else { -a2 };
        if a < 0.0 {
            Vec2::new(a1.abs(), a2.abs())
        } else {
            Vec2::new(a2.abs(), a1.abs())
        }
    }
}
