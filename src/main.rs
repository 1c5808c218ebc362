//! Areatex - Command-line tool for generating anti-aliasing lookup textures

use std::process::ExitCode;

use areatex::cli;

fn main() -> ExitCode {
    cli::run()
}
