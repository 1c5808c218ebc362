//! Atlas assembly - packs coverage grids into the area lookup texture
//!
//! The texture is two columns of blocks, orthogonal on the left and diagonal
//! on the right, with one block row per sub-pixel phase. Every block holds
//! one square slot per pattern at the position given by the slot tables.

use crate::area::AreaResult;
use crate::generate::{AreaTables, CoverageGrid};
use crate::progress::TableKind;
use crate::tables::{
    DIAG_SLOTS, EDGES_DIAG, EDGES_ORTHO, ORTHO_SLOTS, SIZE_DIAG, SIZE_ORTHO,
    SUBSAMPLE_OFFSETS_DIAG, SUBSAMPLE_OFFSETS_ORTHO,
};
use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Side of one orthogonal block in texels.
pub const ORTHO_BLOCK: u32 = SIZE_ORTHO * ORTHO_SLOTS;

/// Side of one diagonal block in texels.
pub const DIAG_BLOCK: u32 = SIZE_DIAG * DIAG_SLOTS;

/// Width of the assembled area texture.
pub const ATLAS_WIDTH: u32 = ORTHO_BLOCK + DIAG_BLOCK;

/// Height of the assembled area texture.
pub const ATLAS_HEIGHT: u32 = ORTHO_BLOCK * SUBSAMPLE_OFFSETS_ORTHO.len() as u32;

/// Errors raised while assembling the area texture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtlasError {
    /// A grid does not reach the distances its slot addresses
    #[error("{kind} grid covers {actual} distances but the atlas addresses {required}")]
    GridTooSmall {
        /// Pattern family of the grid
        kind: TableKind,
        /// Distances per axis the slot reads
        required: u32,
        /// Distances per axis the grid holds
        actual: u32,
    },
    /// A phase or pattern is absent from the tables
    #[error("no {kind} grid for phase {phase}, pattern {pattern}")]
    MissingGrid {
        /// Pattern family of the grid
        kind: TableKind,
        /// Index into the phase set
        phase: usize,
        /// Pattern code
        pattern: usize,
    },
}

/// Channel layout of the area texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureLayout {
    /// Two channels in red and green
    Dx10,
    /// First channel replicated in RGB, second in alpha
    Dx9,
}

impl TextureLayout {
    /// Base file name (without extension) for this layout.
    pub fn file_stem(self) -> &'static str {
        match self {
            TextureLayout::Dx10 => "AreaTexDX10",
            TextureLayout::Dx9 => "AreaTexDX9",
        }
    }

    /// Pixel for a coverage result in this layout.
    pub fn pixel(self, area: AreaResult) -> Rgba<u8> {
        self.texel(area.to_bytes())
    }

    /// Pixel for an already quantized channel pair.
    pub fn texel(self, [r, g]: [u8; 2]) -> Rgba<u8> {
        match self {
            TextureLayout::Dx10 => Rgba([r, g, 0, 0]),
            TextureLayout::Dx9 => Rgba([r, r, r, g]),
        }
    }
}

/// Assemble the DX10 area texture from a complete set of tables.
///
/// # Errors
///
/// Returns [`AtlasError::MissingGrid`] if a phase or pattern is absent and
/// [`AtlasError::GridTooSmall`] if a grid cannot serve every texel of its slot.
pub fn assemble_area_texture(tables: &AreaTables) -> Result<RgbaImage, AtlasError> {
    let mut atlas = RgbaImage::new(ATLAS_WIDTH, ATLAS_HEIGHT);

    for phase in 0..SUBSAMPLE_OFFSETS_ORTHO.len() {
        for (pattern, &(sx, sy)) in EDGES_ORTHO.iter().enumerate() {
            let grid = tables.ortho(phase, pattern).ok_or(AtlasError::MissingGrid {
                kind: TableKind::Ortho,
                phase,
                pattern,
            })?;
            let slot = ortho_slot(grid)?;
            let y = ORTHO_BLOCK * phase as u32;
            copy_slot_to_atlas(&mut atlas, &slot, sx * SIZE_ORTHO, y + sy * SIZE_ORTHO);
        }
    }

    for phase in 0..SUBSAMPLE_OFFSETS_DIAG.len() {
        for (pattern, &(sx, sy)) in EDGES_DIAG.iter().enumerate() {
            let grid = tables.diag(phase, pattern).ok_or(AtlasError::MissingGrid {
                kind: TableKind::Diag,
                phase,
                pattern,
            })?;
            let slot = diag_slot(grid)?;
            let y = DIAG_BLOCK * phase as u32;
            copy_slot_to_atlas(&mut atlas, &slot, ORTHO_BLOCK + sx * SIZE_DIAG, y + sy * SIZE_DIAG);
        }
    }

    Ok(atlas)
}

/// Convert a DX10 texture into the DX9 channel layout.
pub fn to_dx9(dx10: &RgbaImage) -> RgbaImage {
    let mut dx9 = dx10.clone();
    for pixel in dx9.pixels_mut() {
        let Rgba([r, g, _, _]) = *pixel;
        *pixel = TextureLayout::Dx9.texel([r, g]);
    }
    dx9
}

/// Slot for an orthogonal grid; texel `n` reads the distance `n * n`.
fn ortho_slot(grid: &CoverageGrid) -> Result<RgbaImage, AtlasError> {
    let last = SIZE_ORTHO - 1;
    let required = last * last + 1;
    if grid.size() < required {
        return Err(AtlasError::GridTooSmall { kind: TableKind::Ortho, required, actual: grid.size() });
    }
    Ok(slot_image(SIZE_ORTHO, |left, right| grid.get(left * left, right * right)))
}

/// Slot for a diagonal grid; texels read distances directly.
fn diag_slot(grid: &CoverageGrid) -> Result<RgbaImage, AtlasError> {
    if grid.size() < SIZE_DIAG {
        return Err(AtlasError::GridTooSmall {
            kind: TableKind::Diag,
            required: SIZE_DIAG,
            actual: grid.size(),
        });
    }
    Ok(slot_image(SIZE_DIAG, |left, right| grid.get(left, right)))
}

fn slot_image(size: u32, area: impl Fn(u32, u32) -> Option<AreaResult>) -> RgbaImage {
    RgbaImage::from_fn(size, size, |left, right| {
        TextureLayout::Dx10.pixel(area(left, right).unwrap_or_default())
    })
}

/// Copy a slot image into the atlas at the given position.
fn copy_slot_to_atlas(atlas: &mut RgbaImage, slot: &RgbaImage, x: u32, y: u32) {
    for sy in 0..slot.height() {
        for sx in 0..slot.width() {
            if x + sx < atlas.width() && y + sy < atlas.height() {
                atlas.put_pixel(x + sx, y + sy, *slot.get_pixel(sx, sy));
            }
        }
    }
}
