//! Area texture command

use std::process::ExitCode;

use super::{fail, output_overrides, prepare_config, reporter, OutputArgs, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::pipeline::build_area_textures;

/// Run the area command
pub fn run_area(args: &OutputArgs, jobs: Option<usize>, no_dx9: bool) -> ExitCode {
    let overrides =
        CliOverrides { jobs, dx9: no_dx9.then_some(false), ..output_overrides(args) };

    let (config, out_dir) = match prepare_config(args, overrides) {
        Ok(loaded) => loaded,
        Err(e) => return fail("loading config", &e),
    };

    match build_area_textures(&config, &out_dir, reporter(args)) {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => fail("generating area textures", &e),
    }
}
