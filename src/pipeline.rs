//! End-to-end texture builds.
//!
//! Ties generation, atlas assembly and output together: one call produces
//! every file for a texture family in an output directory and reports each
//! artifact through the progress reporter.

use crate::atlas::{assemble_area_texture, to_dx9, AtlasError, TextureLayout};
use crate::codegen::{
    channel_bytes, emit_cpp, emit_rust, AREA_TEX_CPP_NAME, AREA_TEX_RUST_NAME, SEARCH_TEX_CPP_NAME,
    SEARCH_TEX_RUST_NAME,
};
use crate::config::AreatexConfig;
use crate::generate::{GenerateError, GeneratorSettings, TableGenerator};
use crate::output::{save_source, save_texture, texture_path, OutputError};
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::search::generate_search_texture;
use crate::tables::{ortho_grid_size, SIZE_ORTHO};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// File name of the C++ area texture header.
pub const AREA_TEX_HEADER: &str = "AreaTex.h";

/// File name of the Rust area texture module.
pub const AREA_TEX_MODULE: &str = "area_tex.rs";

/// File name stem of the search texture.
pub const SEARCH_TEX_STEM: &str = "SearchTex";

/// File name of the C++ search texture header.
pub const SEARCH_TEX_HEADER: &str = "SearchTex.h";

/// File name of the Rust search texture module.
pub const SEARCH_TEX_MODULE: &str = "search_tex.rs";

/// Channels per texel kept in emitted area texture bytes.
const AREA_TEX_CHANNELS: usize = 2;

/// Channels per texel kept in emitted search texture bytes.
const SEARCH_TEX_CHANNELS: usize = 1;

/// Errors from a texture build.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Table generation failed
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// Atlas assembly failed
    #[error(transparent)]
    Atlas(#[from] AtlasError),
    /// Writing a file failed
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Generate the area textures and write them to `out_dir`.
///
/// Writes the DX10 texture, the DX9 texture if enabled, and the C++ and
/// Rust sources if enabled. Returns the written paths in that order.
pub fn build_area_textures(
    config: &AreatexConfig,
    out_dir: &Path,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<Vec<PathBuf>, PipelineError> {
    let start = Instant::now();
    let result = write_area_textures(config, out_dir, &reporter);
    report_completion(&reporter, &result, start);
    result
}

fn write_area_textures(
    config: &AreatexConfig,
    out_dir: &Path,
    reporter: &Arc<dyn ProgressReporter>,
) -> Result<Vec<PathBuf>, PipelineError> {
    let settings = config.area.generator_settings();
    if let Some(message) = unaddressed_distances(&settings) {
        reporter.report(ProgressEvent::Warning { message });
    }

    let mut generator = TableGenerator::new(settings).with_reporter(Arc::clone(reporter));
    if let Some(jobs) = config.build.jobs {
        generator = generator.with_jobs(jobs);
    }

    let tables = generator.generate()?;
    let dx10 = assemble_area_texture(&tables)?;
    let format = config.output.format;
    let mut written = Vec::new();

    let path = texture_path(out_dir, TextureLayout::Dx10.file_stem(), format);
    save_texture(&DynamicImage::ImageRgba8(dx10.clone()), &path)?;
    record(reporter, &mut written, path);

    if config.output.dx9 {
        let path = texture_path(out_dir, TextureLayout::Dx9.file_stem(), format);
        save_texture(&DynamicImage::ImageRgba8(to_dx9(&dx10)), &path)?;
        record(reporter, &mut written, path);
    }

    let bytes = channel_bytes(&dx10, AREA_TEX_CHANNELS);
    if config.output.cpp {
        let path = out_dir.join(AREA_TEX_HEADER);
        save_source(&emit_cpp(AREA_TEX_CPP_NAME, &bytes), &path)?;
        record(reporter, &mut written, path);
    }
    if config.output.rust {
        let path = out_dir.join(AREA_TEX_MODULE);
        save_source(&emit_rust(AREA_TEX_RUST_NAME, &bytes), &path)?;
        record(reporter, &mut written, path);
    }

    Ok(written)
}

/// Generate the search texture and write it to `out_dir`.
///
/// Writes the texture, then the C++ and Rust sources if enabled.
pub fn build_search_texture(
    config: &AreatexConfig,
    out_dir: &Path,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<Vec<PathBuf>, PipelineError> {
    let start = Instant::now();
    let result = write_search_texture(config, out_dir, &reporter);
    report_completion(&reporter, &result, start);
    result
}

fn write_search_texture(
    config: &AreatexConfig,
    out_dir: &Path,
    reporter: &Arc<dyn ProgressReporter>,
) -> Result<Vec<PathBuf>, PipelineError> {
    let image = generate_search_texture();
    let mut written = Vec::new();

    let path = texture_path(out_dir, SEARCH_TEX_STEM, config.output.format);
    save_texture(&DynamicImage::ImageRgb8(image.clone()), &path)?;
    record(reporter, &mut written, path);

    let bytes = channel_bytes(&image, SEARCH_TEX_CHANNELS);
    if config.output.cpp {
        let path = out_dir.join(SEARCH_TEX_HEADER);
        save_source(&emit_cpp(SEARCH_TEX_CPP_NAME, &bytes), &path)?;
        record(reporter, &mut written, path);
    }
    if config.output.rust {
        let path = out_dir.join(SEARCH_TEX_MODULE);
        save_source(&emit_rust(SEARCH_TEX_RUST_NAME, &bytes), &path)?;
        record(reporter, &mut written, path);
    }

    Ok(written)
}

/// Describe orthogonal distances the atlas compression never reads, if any.
fn unaddressed_distances(settings: &GeneratorSettings) -> Option<String> {
    let addressable = ortho_grid_size(SIZE_ORTHO);
    (settings.ortho_distances > addressable).then(|| {
        format!(
            "orthogonal distances {}..{} are generated but not stored in the atlas",
            addressable, settings.ortho_distances
        )
    })
}

fn record(reporter: &Arc<dyn ProgressReporter>, written: &mut Vec<PathBuf>, path: PathBuf) {
    reporter.report(ProgressEvent::ArtifactWritten { path: path.clone() });
    written.push(path);
}

fn report_completion(
    reporter: &Arc<dyn ProgressReporter>,
    result: &Result<Vec<PathBuf>, PipelineError>,
    start: Instant,
) {
    let duration_ms = start.elapsed().as_millis() as u64;
    let (success, artifacts) = match result {
        Ok(paths) => (true, paths.len()),
        Err(e) => {
            reporter.report(ProgressEvent::Error { message: e.to_string() });
            (false, 0)
        }
    };
    reporter.report(ProgressEvent::GenerationCompleted { success, artifacts, duration_ms });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TextureFormat;
    use crate::progress::NullProgress;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<ProgressEvent>>);

    impl ProgressReporter for Recorder {
        fn report(&self, event: ProgressEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_build_search_texture_with_sources() {
        let temp = TempDir::new().unwrap();
        let mut config = AreatexConfig::default();
        config.output.cpp = true;
        config.output.rust = true;

        let written =
            build_search_texture(&config, temp.path(), Arc::new(NullProgress::new())).unwrap();
        assert_eq!(
            written,
            vec![
                temp.path().join("SearchTex.png"),
                temp.path().join("SearchTex.h"),
                temp.path().join("search_tex.rs"),
            ]
        );

        let header = std::fs::read_to_string(temp.path().join("SearchTex.h")).unwrap();
        assert!(header.starts_with("static const unsigned char searchTexBytes[] = {"));
        assert_eq!(header.matches("0x").count(), 66 * 33);

        let module = std::fs::read_to_string(temp.path().join("search_tex.rs")).unwrap();
        assert!(module.starts_with("pub const SEARCH_TEX_BYTES: [u8; 2178] = ["));
    }

    #[test]
    fn test_build_search_texture_tga_reports_artifacts() {
        let temp = TempDir::new().unwrap();
        let mut config = AreatexConfig::default();
        config.output.format = TextureFormat::Tga;
        let recorder = Arc::new(Recorder::default());

        let written = build_search_texture(&config, temp.path(), recorder.clone()).unwrap();
        assert_eq!(written, vec![temp.path().join("SearchTex.tga")]);

        let loaded = image::open(&written[0]).unwrap().to_rgb8();
        assert_eq!(loaded, generate_search_texture());

        let events = recorder.0.lock().unwrap();
        assert!(matches!(events[0], ProgressEvent::ArtifactWritten { .. }));
        assert!(matches!(
            events[1],
            ProgressEvent::GenerationCompleted { success: true, artifacts: 1, .. }
        ));
    }

    #[test]
    fn test_unaddressed_distances_warning() {
        let mut settings = GeneratorSettings::default();
        assert_eq!(unaddressed_distances(&settings), None);

        settings.ortho_distances = 241;
        let message = unaddressed_distances(&settings).unwrap();
        assert!(message.contains("226..241"), "got {}", message);
    }

    #[test]
    fn test_failure_reports_error() {
        let temp = TempDir::new().unwrap();
        // A regular file where the output directory should be
        let blocker = temp.path().join("blocked");
        std::fs::write(&blocker, b"").unwrap();
        let recorder = Arc::new(Recorder::default());

        let result =
            build_search_texture(&AreatexConfig::default(), &blocker.join("out"), recorder.clone());
        assert!(matches!(result, Err(PipelineError::Output(_))));

        let events = recorder.0.lock().unwrap();
        assert!(events.iter().any(|e| matches!(e, ProgressEvent::Error { .. })));
        assert!(matches!(
            events.last(),
            Some(ProgressEvent::GenerationCompleted { success: false, artifacts: 0, .. })
        ));
    }
}
