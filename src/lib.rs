//! Areatex - Library for generating morphological anti-aliasing lookup textures
//!
//! This library provides functionality to:
//! - Compute pixel coverage areas for orthogonal and diagonal edge patterns
//! - Batch the solvers over every pattern, distance pair and sub-pixel phase
//! - Pack the results into the area texture atlas and build the search texture
//! - Write textures as PNG/TGA and embed them as C++ or Rust byte arrays

pub mod area;
pub mod atlas;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod generate;
pub mod geometry;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod search;
pub mod tables;
