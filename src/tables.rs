//! Fixed lookup tables for texture generation
//!
//! Sub-pixel phase sets and the slot each pattern occupies in the atlas.
//! These are the values baked into every published area texture; changing
//! them changes the texture layout the shader expects.

/// Sub-pixel offsets for orthogonal patterns, one atlas block each.
pub const SUBSAMPLE_OFFSETS_ORTHO: [f64; 7] = [
    0.0,    // 0
    -0.25,  // 1
    0.25,   // 2
    -0.125, // 3
    0.125,  // 4
    -0.375, // 5
    0.375,  // 6
];

/// Sub-pixel offsets for diagonal patterns, one atlas block each.
pub const SUBSAMPLE_OFFSETS_DIAG: [(f64, f64); 5] = [
    (0.00, 0.00),    // 0
    (0.25, -0.25),   // 1
    (-0.25, 0.25),   // 2
    (0.125, -0.125), // 3
    (-0.125, 0.125), // 4
];

/// Texels per orthogonal pattern slot (5x5 slots per block).
pub const SIZE_ORTHO: u32 = 16;

/// Texels per diagonal pattern slot (4x4 slots per block).
pub const SIZE_DIAG: u32 = 20;

/// Slots per side of an orthogonal block.
pub const ORTHO_SLOTS: u32 = 5;

/// Slots per side of a diagonal block.
pub const DIAG_SLOTS: u32 = 4;

/// Samples per axis used to estimate diagonal areas.
pub const SAMPLES_DIAG: u32 = 30;

/// Slot of each orthogonal pattern inside its 5x5 block.
#[rustfmt::skip]
pub const EDGES_ORTHO: [(u32, u32); 16] = [
    (0, 0), (3, 0), (0, 3), (3, 3), (1, 0), (4, 0), (1, 3), (4, 3),
    (0, 1), (3, 1), (0, 4), (3, 4), (1, 1), (4, 1), (1, 4), (4, 4),
];

/// Slot of each diagonal pattern inside its 4x4 block.
///
/// A non-zero coordinate also marks the matching end of the diagonal line
/// as subject to the sub-pixel offset.
#[rustfmt::skip]
pub const EDGES_DIAG: [(u32, u32); 16] = [
    (0, 0), (1, 0), (0, 2), (1, 2), (2, 0), (3, 0), (2, 2), (3, 2),
    (0, 1), (1, 1), (0, 3), (1, 3), (2, 1), (3, 1), (2, 3), (3, 3),
];

/// Distance domain needed to fill an orthogonal slot of `size` texels.
///
/// Orthogonal slots are addressed quadratically, so texel `n` reads the
/// distance `n * n`.
pub fn ortho_grid_size(size: u32) -> u32 {
    let last = size.saturating_sub(1);
    last * last + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ortho_slots_unique_and_in_block() {
        let slots: HashSet<_> = EDGES_ORTHO.iter().collect();
        assert_eq!(slots.len(), 16);
        assert!(EDGES_ORTHO.iter().all(|&(x, y)| x < ORTHO_SLOTS && y < ORTHO_SLOTS));
    }

    #[test]
    fn test_diag_slots_cover_block() {
        let slots: HashSet<_> = EDGES_DIAG.iter().collect();
        assert_eq!(slots.len(), 16);
        assert!(EDGES_DIAG.iter().all(|&(x, y)| x < DIAG_SLOTS && y < DIAG_SLOTS));
    }

    #[test]
    fn test_offsets_within_pixel() {
        assert!(SUBSAMPLE_OFFSETS_ORTHO.iter().all(|o| (-0.5..=0.5).contains(o)));
        assert!(SUBSAMPLE_OFFSETS_DIAG
            .iter()
            .all(|(x, y)| (-0.5..=0.5).contains(x) && (-0.5..=0.5).contains(y)));
    }

    #[test]
    fn test_ortho_grid_size() {
        assert_eq!(ortho_grid_size(SIZE_ORTHO), 226);
        assert_eq!(ortho_grid_size(1), 1);
    }

    #[test]
    fn test_blocks_fill_same_width() {
        // Orthogonal and diagonal blocks sit side by side in an 80px wide column each
        assert_eq!(SIZE_ORTHO * ORTHO_SLOTS, SIZE_DIAG * DIAG_SLOTS);
    }
}
