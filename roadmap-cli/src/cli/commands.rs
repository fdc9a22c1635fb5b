//! Command implementations and argument parsing for the roadmap CLI.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use roadmap_core::{
    DEFAULT_MAP_SIZE, GenerationParameters, GenerationRequest, NodeRole, RoadmapBuilder,
    RoadmapError, RoadmapGraph,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::prompt::{PromptError, PromptSession, SessionError};
use super::render::{self, OutputFormat, RenderError};

/// Output file used when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "graph.txt";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "roadmap", about = "Generate random shipping roadmap graphs.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a graph from command-line parameters.
    Generate(GenerateCommand),
    /// Ask for the parameters one question at a time.
    Interactive(InteractiveCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes to place.
    #[arg(long)]
    pub nodes: usize,

    /// Upper bound on outgoing edges per node.
    #[arg(long = "max-edges")]
    pub max_edges: usize,

    /// Number of stores.
    #[arg(long)]
    pub stores: usize,

    /// Number of warehouses.
    #[arg(long)]
    pub warehouses: usize,

    /// Number of good types (defaults to the number of supply totals).
    #[arg(long = "good-types")]
    pub good_types: Option<usize>,

    /// Comma-separated total supply per good type.
    #[arg(long, value_delimiter = ',', required = true)]
    pub supply: Vec<u64>,

    /// Comma-separated total demand per good type.
    #[arg(long, value_delimiter = ',', required = true)]
    pub demand: Vec<u64>,

    /// Generator and output settings.
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options accepted by the `interactive` command.
#[derive(Debug, Args, Clone)]
pub struct InteractiveCommand {
    /// Generator and output settings.
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Settings shared by every command.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Seed for reproducible graphs; a fresh one is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge length of the square map in kilometres.
    #[arg(long = "map-size", default_value_t = DEFAULT_MAP_SIZE)]
    pub map_size: f64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Dot)]
    pub format: OutputFormat,

    /// Destination file, or `-` for stdout.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Print every node and edge after generation. Goes to stderr when the
    /// graph is written to stdout.
    #[arg(long)]
    pub trace: bool,
}

/// Where the serialised graph goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output.
    Stdout,
    /// A file, created or truncated.
    File(PathBuf),
}

impl OutputTarget {
    /// Interprets `-` as stdout and anything else as a file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path == Path::new("-") {
            Self::Stdout
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Returns `true` when the graph is written to stdout.
    #[must_use]
    pub const fn is_stdout(&self) -> bool {
        matches!(self, Self::Stdout)
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The output file could not be created or flushed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Serialising the graph failed.
    #[error("failed to render graph to {target}: {source}")]
    Render {
        /// Destination being written.
        target: OutputTarget,
        /// Underlying serialiser failure.
        #[source]
        source: RenderError,
    },
    /// Writing to the console failed.
    #[error("failed to write to the console: {0}")]
    Console(#[source] io::Error),
    /// The interactive session could not read its answers.
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// Validation or generation failed.
    #[error(transparent)]
    Core(#[from] RoadmapError),
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Prompt(prompt) => Self::Prompt(prompt),
            SessionError::Invalid(core) => Self::Core(core),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Where the graph was written.
    pub output: OutputTarget,
    /// Format used for the graph.
    pub format: OutputFormat,
    /// Seed that reproduces the graph.
    pub seed: u64,
    /// Number of nodes.
    pub nodes: usize,
    /// Number of directed edges.
    pub edges: usize,
    /// Number of stores.
    pub stores: usize,
    /// Number of warehouses.
    pub warehouses: usize,
}

impl ExecutionSummary {
    fn from_graph(graph: &RoadmapGraph, output: OutputTarget, format: OutputFormat) -> Self {
        Self {
            output,
            format,
            seed: graph.seed(),
            nodes: graph.nodes().len(),
            edges: graph.edge_count(),
            stores: graph.nodes_with_role(NodeRole::Store).count(),
            warehouses: graph.nodes_with_role(NodeRole::Warehouse).count(),
        }
    }
}

/// Executes `cli` against the process's stdin and stdout.
///
/// # Errors
/// Returns [`CliError`] when validation, generation or output fails.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_cli_with(cli, stdin.lock(), stdout.lock())
}

/// Executes `cli`, reading answers from `input` and writing prompts and traces
/// to `console`.
///
/// # Errors
/// Returns [`CliError`] when validation, generation or output fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io;
/// # use clap::Parser;
/// # use roadmap_cli::cli::{Cli, run_cli_with};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let path = dir.path().join("graph.txt");
/// let cli = Cli::try_parse_from([
///     "roadmap", "generate", "--nodes", "4", "--max-edges", "1", "--stores", "1",
///     "--warehouses", "1", "--supply", "3", "--demand", "2", "--seed", "1",
///     "--output", path.to_str().ok_or("non UTF-8 temp path")?,
/// ])?;
/// let summary = run_cli_with(cli, io::empty(), io::sink())?;
/// assert_eq!(summary.nodes, 4);
/// assert!(std::fs::read_to_string(&path)?.starts_with("graph G {"));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli, input, console),
    fields(command = field::Empty),
)]
pub fn run_cli_with(
    cli: Cli,
    input: impl BufRead,
    mut console: impl Write,
) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", field::display("generate"));
            run_generate(command, &mut console)
        }
        Command::Interactive(command) => {
            span.record("command", field::display("interactive"));
            run_interactive(command, input, &mut console)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command, console),
    fields(nodes = command.nodes, goods = field::Empty),
)]
pub(super) fn run_generate(
    command: GenerateCommand,
    console: impl Write,
) -> Result<ExecutionSummary, CliError> {
    let GenerateCommand {
        nodes,
        max_edges,
        stores,
        warehouses,
        good_types,
        supply,
        demand,
        output,
    } = command;
    let good_type_count = good_types.unwrap_or(supply.len());
    Span::current().record("goods", good_type_count);

    let params = GenerationRequest {
        node_count: nodes,
        max_edges_per_node: max_edges,
        store_count: stores,
        warehouse_count: warehouses,
        good_type_count,
        supply,
        demand,
    }
    .validate()?;
    generate_and_write(&params, &output, console)
}

#[instrument(name = "cli.interactive", err, skip(command, input, console))]
pub(super) fn run_interactive(
    command: InteractiveCommand,
    input: impl BufRead,
    mut console: impl Write,
) -> Result<ExecutionSummary, CliError> {
    let params = PromptSession::new(input, &mut console).collect()?;
    writeln!(
        console,
        "Okay, generating the shipping roadmap graph now. Hold on tight."
    )
    .map_err(CliError::Console)?;
    let summary = generate_and_write(&params, &command.output, &mut console)?;
    writeln!(console, "The shipping roadmap graph has been constructed.")
        .map_err(CliError::Console)?;
    Ok(summary)
}

fn generate_and_write(
    params: &GenerationParameters,
    args: &OutputArgs,
    mut console: impl Write,
) -> Result<ExecutionSummary, CliError> {
    let graph = RoadmapBuilder::new()
        .with_map_size(args.map_size)
        .with_optional_seed(args.seed)
        .build()?
        .generate(params)?;

    let target = OutputTarget::from_path(&args.output);
    if args.trace {
        let stderr = io::stderr();
        write_trace_for(&graph, &target, &mut console, stderr.lock())?;
    }
    write_output(&graph, args.format, &target)?;

    let summary = ExecutionSummary::from_graph(&graph, target, args.format);
    info!(
        output = %summary.output,
        format = %summary.format,
        seed = summary.seed,
        edges = summary.edges,
        "graph written"
    );
    Ok(summary)
}

/// Writes the trace to `console`, or to `diagnostics` when the graph itself
/// goes to stdout so the two never interleave.
pub(super) fn write_trace_for(
    graph: &RoadmapGraph,
    target: &OutputTarget,
    console: impl Write,
    diagnostics: impl Write,
) -> Result<(), CliError> {
    fn write_to(graph: &RoadmapGraph, mut sink: impl Write) -> io::Result<()> {
        render::write_trace(graph, &mut sink)?;
        sink.flush()
    }

    if target.is_stdout() {
        write_to(graph, diagnostics)
    } else {
        write_to(graph, console)
    }
    .map_err(CliError::Console)
}

#[instrument(name = "cli.write_output", err, skip(graph, target), fields(target = %target))]
pub(super) fn write_output(
    graph: &RoadmapGraph,
    format: OutputFormat,
    target: &OutputTarget,
) -> Result<(), CliError> {
    let render_failed = |source| CliError::Render {
        target: target.clone(),
        source,
    };
    match target {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            render::write_graph(graph, format, &mut writer).map_err(render_failed)?;
            writer.flush().map_err(CliError::Console)
        }
        OutputTarget::File(path) => {
            let io_failed = |source| CliError::Io {
                path: path.clone(),
                source,
            };
            let file = File::create(path).map_err(io_failed)?;
            let mut writer = BufWriter::new(file);
            render::write_graph(graph, format, &mut writer).map_err(render_failed)?;
            writer.flush().map_err(io_failed)
        }
    }
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use roadmap_cli::cli::{ExecutionSummary, OutputFormat, OutputTarget, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     output: OutputTarget::Stdout,
///     format: OutputFormat::Text,
///     seed: 9,
///     nodes: 4,
///     edges: 5,
///     stores: 1,
///     warehouses: 1,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.starts_with("output: stdout\nformat: text\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "output: {}", summary.output)?;
    writeln!(writer, "format: {}", summary.format)?;
    writeln!(writer, "seed: {}", summary.seed)?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    writeln!(writer, "stores: {}", summary.stores)?;
    writeln!(writer, "warehouses: {}", summary.warehouses)?;
    Ok(())
}

/// Renders `summary` to `stdout`, or to `stderr` when the graph itself was
/// written to stdout.
///
/// # Errors
/// Returns [`io::Error`] if writing to or flushing the chosen stream fails.
pub fn render_summary_for(
    summary: &ExecutionSummary,
    stdout: impl Write,
    stderr: impl Write,
) -> io::Result<()> {
    fn write_to(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
        render_summary(summary, &mut writer)?;
        writer.flush()
    }

    if summary.output.is_stdout() {
        write_to(summary, stderr)
    } else {
        write_to(summary, stdout)
    }
}
