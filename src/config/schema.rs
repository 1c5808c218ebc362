//! Configuration schema types for `areatex.toml`
//!
//! Defines the structure and validation rules for texture generation settings.

use crate::generate::GeneratorSettings;
use crate::geometry::SMOOTH_MAX_DISTANCE;
use crate::output::TextureFormat;
use crate::tables::{ortho_grid_size, SAMPLES_DIAG, SIZE_DIAG, SIZE_ORTHO};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest distance domain accepted for either pattern family.
pub const MAX_DISTANCES: u32 = 1024;

/// Largest diagonal sample grid side accepted.
pub const MAX_DIAG_SAMPLES: u32 = 1024;

/// Area solver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaConfig {
    /// Distances computed per axis for orthogonal patterns
    #[serde(default = "default_ortho_size")]
    pub ortho_size: u32,
    /// Distances computed per axis for diagonal patterns
    #[serde(default = "default_diag_size")]
    pub diag_size: u32,
    /// Samples per axis for diagonal coverage
    #[serde(default = "default_diag_samples")]
    pub diag_samples: u32,
    /// Distance at which U-shape smoothing stops
    #[serde(default = "default_smooth_max_distance")]
    pub smooth_max_distance: f64,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            ortho_size: default_ortho_size(),
            diag_size: default_diag_size(),
            diag_samples: default_diag_samples(),
            smooth_max_distance: default_smooth_max_distance(),
        }
    }
}

impl AreaConfig {
    /// Settings for the table generator.
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            ortho_distances: self.ortho_size,
            diag_distances: self.diag_size,
            diag_samples: self.diag_samples,
            smooth_max_distance: self.smooth_max_distance,
        }
    }
}

fn default_ortho_size() -> u32 {
    ortho_grid_size(SIZE_ORTHO)
}

fn default_diag_size() -> u32 {
    SIZE_DIAG
}

fn default_diag_samples() -> u32 {
    SAMPLES_DIAG
}

fn default_smooth_max_distance() -> f64 {
    SMOOTH_MAX_DISTANCE
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory textures and sources are written to
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Texture file format
    #[serde(default)]
    pub format: TextureFormat,
    /// Also write the DX9 channel layout
    #[serde(default = "default_true")]
    pub dx9: bool,
    /// Write C++ byte arrays next to the textures
    #[serde(default)]
    pub cpp: bool,
    /// Write Rust byte constants next to the textures
    #[serde(default)]
    pub rust: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            format: TextureFormat::default(),
            dx9: default_true(),
            cpp: false,
            rust: false,
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("textures")
}

fn default_true() -> bool {
    true
}

/// Build settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Parallel jobs (defaults to available parallelism)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

/// Complete areatex.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreatexConfig {
    /// Area solver settings
    #[serde(default)]
    pub area: AreaConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "area.ortho_size")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "areatex.toml: '{}' {}", self.field, self.message)
    }
}

impl AreatexConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message });
        };

        // The atlas reads orthogonal distances quadratically
        let min_ortho = default_ortho_size();
        if self.area.ortho_size < min_ortho || self.area.ortho_size > MAX_DISTANCES {
            push(
                "area.ortho_size",
                format!("must be between {} and {}", min_ortho, MAX_DISTANCES),
            );
        }

        if self.area.diag_size < SIZE_DIAG || self.area.diag_size > MAX_DISTANCES {
            push("area.diag_size", format!("must be between {} and {}", SIZE_DIAG, MAX_DISTANCES));
        }

        if self.area.diag_samples < 2 || self.area.diag_samples > MAX_DIAG_SAMPLES {
            push("area.diag_samples", format!("must be between 2 and {}", MAX_DIAG_SAMPLES));
        }

        let smooth = self.area.smooth_max_distance;
        if !smooth.is_finite() || smooth <= 0.0 {
            push("area.smooth_max_distance", "must be a positive number".to_string());
        }

        if self.output.dir.as_os_str().is_empty() {
            push("output.dir", "must be a non-empty path".to_string());
        }

        if self.build.jobs == Some(0) {
            push("build.jobs", "must be a positive integer".to_string());
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
