//! Small helpers shared across CLI tests.
//!
//! The tests write graphs into temporary directories and drive commands with
//! scripted input. These helpers keep the cases concise.

use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use roadmap_core::DEFAULT_MAP_SIZE;
use tempfile::TempDir;

use super::render::OutputFormat;
use super::{Cli, CliError, Command, ExecutionSummary, GenerateCommand, OutputArgs, run_cli_with};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn output_args(path: &Path, format: OutputFormat) -> OutputArgs {
    OutputArgs {
        seed: Some(7),
        map_size: DEFAULT_MAP_SIZE,
        format,
        output: path.to_path_buf(),
        trace: false,
    }
}

/// The four-node walkthrough written to `path`.
pub(super) fn walkthrough(path: &Path, format: OutputFormat) -> Cli {
    Cli {
        command: Command::Generate(GenerateCommand {
            nodes: 4,
            max_edges: 1,
            stores: 1,
            warehouses: 1,
            good_types: None,
            supply: vec![3],
            demand: vec![2],
            output: output_args(path, format),
        }),
    }
}

pub(super) fn graph_path(dir: &TempDir) -> PathBuf {
    dir.path().join("graph.txt")
}

/// Runs `cli` with scripted input, returning the result and console output.
pub(super) fn run_scripted(
    cli: Cli,
    script: &str,
) -> (Result<ExecutionSummary, CliError>, String) {
    let mut console = Vec::new();
    let result = run_cli_with(cli, Cursor::new(script.to_owned()), &mut console);
    let console = match String::from_utf8(console) {
        Ok(text) => text,
        Err(err) => panic!("console output must be UTF-8: {err}"),
    };
    (result, console)
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli_with(cli, io::empty(), io::sink()) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
