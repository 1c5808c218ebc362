//! Source code emission for embedding textures in an engine.
//!
//! Textures are flattened row by row into a byte stream that keeps only the
//! channels the shader samples, then printed as a C++ array or a Rust
//! constant.

use image::{ImageBuffer, Pixel};

/// Bytes printed on each line of an emitted array.
pub const BYTES_PER_LINE: usize = 12;

/// Array name used for the area texture in C++ output.
pub const AREA_TEX_CPP_NAME: &str = "areaTexBytes";

/// Array name used for the search texture in C++ output.
pub const SEARCH_TEX_CPP_NAME: &str = "searchTexBytes";

/// Constant name used for the area texture in Rust output.
pub const AREA_TEX_RUST_NAME: &str = "AREA_TEX_BYTES";

/// Constant name used for the search texture in Rust output.
pub const SEARCH_TEX_RUST_NAME: &str = "SEARCH_TEX_BYTES";

/// Flatten an image into its first `channels` channels per pixel, row by row.
pub fn channel_bytes<P>(image: &ImageBuffer<P, Vec<u8>>, channels: usize) -> Vec<u8>
where
    P: Pixel<Subpixel = u8>,
{
    let channels = channels.min(P::CHANNEL_COUNT as usize);
    let mut bytes = Vec::with_capacity(image.width() as usize * image.height() as usize * channels);
    for pixel in image.pixels() {
        bytes.extend_from_slice(&pixel.channels()[..channels]);
    }
    bytes
}

/// Format a C++ array declaration for `bytes`.
pub fn emit_cpp(name: &str, bytes: &[u8]) -> String {
    let mut out = format!("static const unsigned char {}[] = {{\n", name);
    out.push_str(&byte_lines(bytes));
    out.push_str("};\n");
    out
}

/// Format a Rust constant declaration for `bytes`.
pub fn emit_rust(name: &str, bytes: &[u8]) -> String {
    let mut out = format!("pub const {}: [u8; {}] = [\n", name, bytes.len());
    out.push_str(&byte_lines(bytes));
    out.push_str("];\n");
    out
}

/// Hex literals, comma separated, with no comma after the final byte.
fn byte_lines(bytes: &[u8]) -> String {
    let last = bytes.len().saturating_sub(1);
    let mut out = String::with_capacity(bytes.len() * 6);
    for (line, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        out.push_str("   ");
        for (i, byte) in chunk.iter().enumerate() {
            let index = line * BYTES_PER_LINE + i;
            out.push_str(&format!(" 0x{:02x}", byte));
            if index < last {
                out.push(',');
            }
        }
        out.push('\n');
    }
    out
}
