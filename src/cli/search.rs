//! Search texture command

use std::process::ExitCode;

use super::{fail, output_overrides, prepare_config, reporter, OutputArgs, EXIT_SUCCESS};
use crate::pipeline::build_search_texture;

/// Run the search command
pub fn run_search(args: &OutputArgs) -> ExitCode {
    let (config, out_dir) = match prepare_config(args, output_overrides(args)) {
        Ok(loaded) => loaded,
        Err(e) => return fail("loading config", &e),
    };

    match build_search_texture(&config, &out_dir, reporter(args)) {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => fail("generating search texture", &e),
    }
}
