//! Golden texture harness
//!
//! Digests are SHA-256 over the raw texel buffers (row-major, all channels),
//! captured from the reference generator. Raw buffers are hashed rather than
//! encoded files so the digests do not depend on PNG compression settings.

use areatex::generate::{AreaTables, CoverageGrid, GeneratorSettings, TableGenerator};
use areatex::area::AreaResult;
use areatex::tables::{SIZE_DIAG, SUBSAMPLE_OFFSETS_DIAG};
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

/// Full DX10 area texture.
pub const AREA_TEX_DX10_SHA256: &str =
    "f5b94857e71fa09396de6c5e1e73f72bfdee8e6a8a422cf8a7397fb8205cd9df";

/// Full DX9 area texture.
pub const AREA_TEX_DX9_SHA256: &str =
    "fe52dea367b6c6c722676242f1d8d16cfd778e1a491465e01de1ff69f1686f50";

/// DX10 area texture with only the orthogonal column filled.
pub const AREA_TEX_ORTHO_ONLY_SHA256: &str =
    "3546045adaa1ea5049017cc237aa4153805a0d4645058e1aed6bedd89091800a";

/// Search texture (RGB).
pub const SEARCH_TEX_SHA256: &str =
    "759d923abe488129a135e6cf688c84850c1195eb309eab7de47db210d144e720";

/// Lowercase hex SHA-256 of a byte buffer.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Tables for the default settings, computed once per test binary.
pub fn default_tables() -> &'static AreaTables {
    static TABLES: OnceLock<AreaTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        TableGenerator::new(GeneratorSettings::default())
            .generate()
            .expect("should generate tables")
    })
}

/// Default orthogonal grids with every diagonal grid left empty.
pub fn ortho_only_tables() -> AreaTables {
    let ortho = TableGenerator::new(GeneratorSettings::default())
        .generate_ortho()
        .expect("should generate orthogonal tables");
    let empty = CoverageGrid::from_fn(SIZE_DIAG, |_, _| AreaResult::ZERO);
    AreaTables { ortho, diag: vec![vec![empty; 16]; SUBSAMPLE_OFFSETS_DIAG.len()] }
}

/// Assert a buffer hashes to the expected digest.
pub fn assert_digest(name: &str, bytes: &[u8], expected: &str) {
    let actual = sha256_hex(bytes);
    assert_eq!(actual, expected, "digest mismatch for {}", name);
}
