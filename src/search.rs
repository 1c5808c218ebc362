//! Search texture generation.
//!
//! The edge search in the shader ends on a bilinear fetch that blends four
//! edge flags at once. This texture maps the fetched values back to how many
//! extra pixels the search should advance: the left half serves searches
//! to the left, the right half searches to the right.

use image::{Rgb, RgbImage};

/// Texcoord steps per axis (texcoords are multiples of 1/32).
pub const SEARCH_STEPS: u32 = 33;

/// Width of the search texture (left and right halves side by side).
pub const SEARCH_WIDTH: u32 = 2 * SEARCH_STEPS;

/// Height of the search texture.
pub const SEARCH_HEIGHT: u32 = SEARCH_STEPS;

/// Four edge flags covered by one bilinear fetch.
///
/// Layout, with the current pixel at index 3:
///
/// ```text
/// e[0] e[1]
/// e[2] e[3]
/// ```
pub type EdgeQuad = [bool; 4];

fn lerp(v0: f64, v1: f64, p: f64) -> f64 {
    v0 + (v1 - v0) * p
}

/// Value a bilinear fetch at `(-0.25, -0.125)` from pixel 3 returns.
pub fn bilinear(e: EdgeQuad) -> f64 {
    let [e0, e1, e2, e3] = e.map(|v| if v { 1.0 } else { 0.0 });
    let a = lerp(e0, e1, 1.0 - 0.25);
    let b = lerp(e2, e3, 1.0 - 0.25);
    lerp(a, b, 1.0 - 0.125)
}

/// Recover the edge flags encoded in a fetched value, if any produce it.
pub fn decode_fetch(value: f64) -> Option<EdgeQuad> {
    (0..16u8)
        .map(|bits| [bits & 8 != 0, bits & 4 != 0, bits & 2 != 0, bits & 1 != 0])
        .find(|&e| bilinear(e) == value)
}

/// Extra pixels for a search to the left.
///
/// An edge at the current pixel adds one; a second edge above it adds one
/// more unless a crossing edge interrupts the run.
pub fn delta_left(left: EdgeQuad, top: EdgeQuad) -> u8 {
    let mut d = 0;
    if top[3] {
        d += 1;
    }
    if d == 1 && top[2] && !left[1] && !left[3] {
        d += 1;
    }
    d
}

/// Extra pixels for a search to the right.
pub fn delta_right(left: EdgeQuad, top: EdgeQuad) -> u8 {
    let mut d = 0;
    if top[3] && !left[1] && !left[3] {
        d += 1;
    }
    if d == 1 && top[2] && !left[0] && !left[2] {
        d += 1;
    }
    d
}

/// Build the 66x33 search texture.
///
/// Texels whose coordinates do not decode to an edge combination stay zero.
/// Deltas are stored raw (0, 1 or 2) in all three channels.
pub fn generate_search_texture() -> RgbImage {
    let mut image = RgbImage::new(SEARCH_WIDTH, SEARCH_HEIGHT);
    let step = 1.0 / (SEARCH_STEPS - 1) as f64;

    for x in 0..SEARCH_STEPS {
        for y in 0..SEARCH_STEPS {
            let texcoord = (step * x as f64, step * y as f64);
            let (Some(left), Some(top)) = (decode_fetch(texcoord.0), decode_fetch(texcoord.1)) else {
                continue;
            };

            let val = delta_left(left, top);
            image.put_pixel(x, y, Rgb([val, val, val]));
            let val = delta_right(left, top);
            image.put_pixel(SEARCH_STEPS + x, y, Rgb([val, val, val]));
        }
    }

    image
}
